use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

use super::DocumentAdapter;
use super::page::{PageSpec, paginate};
use crate::DocumentError;

const FONT_SIZE: f32 = 10.0;
const LAYER: &str = "Layer 1";

/// PDF contracts: text extraction via `pdf-extract`, rendering via `printpdf`.
///
/// Rendering wraps at the page spec's character budget and starts a new page
/// when the bottom margin is reached.
#[derive(Default)]
pub struct PdfAdapter {
    spec: PageSpec,
}

impl PdfAdapter {
    pub fn new(spec: PageSpec) -> Self {
        Self { spec }
    }
}

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

impl DocumentAdapter for PdfAdapter {
    fn extract_text(&self, path: &Path) -> Result<String, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| DocumentError::Extract {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn render(&self, text: &str, out: &Path) -> Result<(), DocumentError> {
        let render_err = |reason: String| DocumentError::Render {
            path: out.to_path_buf(),
            reason,
        };

        let spec = &self.spec;
        let title = out
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("contract");
        let (doc, first_page, first_layer) =
            PdfDocument::new(title, mm(spec.width), mm(spec.height), LAYER);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| render_err(e.to_string()))?;

        let pages = paginate(text, spec);
        for (n, lines) in pages.iter().enumerate() {
            let (page, layer) = if n == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(mm(spec.width), mm(spec.height), LAYER)
            };
            let canvas = doc.get_page(page).get_layer(layer);
            for (row, line) in lines.iter().enumerate() {
                canvas.use_text(
                    line.as_str(),
                    FONT_SIZE,
                    mm(spec.margin),
                    mm(spec.baseline(row)),
                    &font,
                );
            }
        }
        debug!(pages = pages.len(), path = %out.display(), "rendered pdf");

        let file = File::create(out).map_err(|e| render_err(e.to_string()))?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| render_err(e.to_string()))
    }
}
