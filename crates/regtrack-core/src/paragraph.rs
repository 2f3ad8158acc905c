//! Paragraph segmentation of extracted contract text.

const SEPARATOR: &str = "\n\n";

/// Split raw text on blank-line boundaries, trimming each block and
/// discarding empty ones.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_paragraphs`] for already-trimmed paragraphs.
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let text = "Intro paragraph.\n\nOld safety policy applies.\nContinued.\n\nTermination clause here.";
        assert_eq!(
            split_paragraphs(text),
            vec![
                "Intro paragraph.",
                "Old safety policy applies.\nContinued.",
                "Termination clause here.",
            ]
        );
    }

    #[test]
    fn drops_empty_blocks() {
        let text = "\n\nA.\n\n\n\n   \n\nB.\n\n";
        assert_eq!(split_paragraphs(text), vec!["A.", "B."]);
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(split_paragraphs("A.\r\n\r\nB."), vec!["A.", "B."]);
    }

    #[test]
    fn empty_text_has_no_paragraphs() {
        assert!(split_paragraphs("").is_empty());
    }

    #[test]
    fn join_uses_blank_line() {
        assert_eq!(join_paragraphs(&["A.", "B."]), "A.\n\nB.");
    }
}
