use std::path::Path;

use super::DocumentAdapter;
use super::page::{PageSpec, Wrap, paginate};
use crate::DocumentError;

const FORM_FEED: char = '\u{c}';

/// Plain-text contracts.
///
/// Rendering paginates with form feeds and, by default, does not wrap, so a
/// clause inserted on one run is still found verbatim on the next.
pub struct TextAdapter {
    spec: PageSpec,
}

impl Default for TextAdapter {
    fn default() -> Self {
        Self::new(PageSpec::letter().with_wrap(Wrap::None))
    }
}

impl TextAdapter {
    pub fn new(spec: PageSpec) -> Self {
        Self { spec }
    }
}

impl DocumentAdapter for TextAdapter {
    fn extract_text(&self, path: &Path) -> Result<String, DocumentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(raw.replace(FORM_FEED, ""))
    }

    fn render(&self, text: &str, out: &Path) -> Result<(), DocumentError> {
        let pages: Vec<String> = paginate(text, &self.spec)
            .into_iter()
            .map(|lines| lines.join("\n"))
            .collect();
        let separator = format!("\n{FORM_FEED}");
        let mut body = pages.join(separator.as_str());
        body.push('\n');
        std::fs::write(out, body).map_err(|e| DocumentError::Render {
            path: out.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regtrack_core::split_paragraphs;

    #[test]
    fn render_then_extract_preserves_paragraphs() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out.txt");
        let adapter = TextAdapter::default();

        let lines: Vec<String> = (0..40).map(|i| format!("Paragraph {i}.")).collect();
        let text = lines.join("\n\n");
        adapter.render(&text, &out).unwrap();

        let raw = std::fs::read_to_string(&out).unwrap();
        assert!(raw.contains(FORM_FEED), "expected a page break");

        let extracted = adapter.extract_text(&out).unwrap();
        assert_eq!(split_paragraphs(&extracted), lines);
    }

    #[test]
    fn wrapped_renderer_wraps() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out.txt");
        let adapter = TextAdapter::new(PageSpec::letter());
        adapter.render(&"word ".repeat(60), &out).unwrap();
        let raw = std::fs::read_to_string(&out).unwrap();
        assert!(raw.lines().all(|l| l.chars().count() <= 110));
        assert_eq!(raw.lines().count(), 3);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = TextAdapter::default()
            .extract_text(Path::new("/nonexistent/contract.txt"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
