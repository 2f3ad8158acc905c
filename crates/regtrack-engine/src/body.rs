/// A contract body as paragraphs, with a parallel lower-cased view for
/// case-insensitive matching.
///
/// Both views always have the same length and matching indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractBody {
    paragraphs: Vec<String>,
    lowered: Vec<String>,
}

impl ContractBody {
    pub fn new(paragraphs: Vec<String>) -> Self {
        let lowered = paragraphs.iter().map(|p| p.to_lowercase()).collect();
        Self {
            paragraphs,
            lowered,
        }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn into_paragraphs(self) -> Vec<String> {
        self.paragraphs
    }

    /// Whether `needle` occurs anywhere in the paragraphs joined by single
    /// newlines, ignoring case.
    pub fn contains(&self, needle: &str) -> bool {
        self.lowered.join("\n").contains(&needle.to_lowercase())
    }

    /// Drop every paragraph containing `keyword` (ignoring case).
    ///
    /// Returns the number of paragraphs removed.
    pub fn remove_matching(&mut self, keyword: &str) -> usize {
        let keyword = keyword.to_lowercase();
        let before = self.paragraphs.len();
        let (paragraphs, lowered): (Vec<_>, Vec<_>) = std::mem::take(&mut self.paragraphs)
            .into_iter()
            .zip(std::mem::take(&mut self.lowered))
            .filter(|(_, lp)| !lp.contains(&keyword))
            .unzip();
        self.paragraphs = paragraphs;
        self.lowered = lowered;
        before - self.paragraphs.len()
    }

    /// Index of the first paragraph containing `keyword` (ignoring case).
    pub fn find(&self, keyword: &str) -> Option<usize> {
        let keyword = keyword.to_lowercase();
        self.lowered.iter().position(|lp| lp.contains(&keyword))
    }

    /// Insert `paragraph` immediately after `index`, or at the top when `None`.
    pub fn insert_after(&mut self, index: Option<usize>, paragraph: &str) {
        let at = index.map_or(0, |i| (i + 1).min(self.paragraphs.len()));
        self.paragraphs.insert(at, paragraph.to_string());
        self.lowered.insert(at, paragraph.to_lowercase());
    }
}
