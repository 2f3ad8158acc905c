//! Contract document adapters: text extraction and rendering.
//!
//! Plain text is always available; PDF needs the `pdf` feature.

pub mod page;
mod text;
pub use text::TextAdapter;

#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "pdf")]
pub use pdf::PdfAdapter;

use std::path::Path;

use crate::DocumentError;

/// Reads text out of a contract file and writes text back as a new document.
pub trait DocumentAdapter {
    /// Extracted plain text, paragraphs separated by blank lines.
    fn extract_text(&self, path: &Path) -> Result<String, DocumentError>;

    /// Write `text` as a paginated document at `out`.
    fn render(&self, text: &str, out: &Path) -> Result<(), DocumentError>;
}

/// Lower-cased extension, if any.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Pick the adapter for a contract file by extension.
pub fn adapter_for(path: &Path) -> Result<Box<dyn DocumentAdapter>, DocumentError> {
    match extension(path).as_deref() {
        Some("txt") => Ok(Box::new(TextAdapter::default())),
        #[cfg(feature = "pdf")]
        Some("pdf") => Ok(Box::new(PdfAdapter::default())),
        _ => Err(DocumentError::Unsupported(path.to_path_buf())),
    }
}

/// Whether [`adapter_for`] can handle this file.
pub fn is_supported(path: &Path) -> bool {
    adapter_for(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_supported_case_insensitively() {
        assert!(is_supported(Path::new("contract.txt")));
        assert!(is_supported(Path::new("CONTRACT.TXT")));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = adapter_for(Path::new("contract.docx")).err().unwrap();
        assert!(matches!(err, DocumentError::Unsupported(_)));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_is_supported_with_feature() {
        assert!(is_supported(Path::new("contract.pdf")));
    }
}
