//! Page layout shared by the document renderers.

/// Line-wrapping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// Lines are kept as they are.
    None,
    /// Greedy word wrap at this many characters.
    Chars(usize),
}

/// Page geometry in points, plus the wrap policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub line_height: f32,
    pub wrap: Wrap,
}

impl PageSpec {
    /// US letter, 50pt margins, 12pt leading, wrapped at 110 characters.
    pub const fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 50.0,
            line_height: 12.0,
            wrap: Wrap::Chars(110),
        }
    }

    pub const fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Baselines that fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        let usable = (self.height - 2.0 * self.margin).max(0.0);
        (usable / self.line_height).floor() as usize + 1
    }

    /// Baseline of the `row`-th line on a page, measured from the bottom edge.
    pub fn baseline(&self, row: usize) -> f32 {
        self.height - self.margin - row as f32 * self.line_height
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::letter()
    }
}

/// Greedy word wrap. A word longer than `width` gets a line of its own.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() > width {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    out.push(current);
    out
}

/// Lay `text` out into pages of lines.
///
/// Always yields at least one page. Blank input lines are kept so paragraph
/// breaks survive rendering.
pub fn paginate(text: &str, spec: &PageSpec) -> Vec<Vec<String>> {
    let per_page = spec.lines_per_page();
    let mut pages = vec![Vec::new()];

    for raw in text.split('\n') {
        let lines = match spec.wrap {
            Wrap::None => vec![raw.to_string()],
            Wrap::Chars(width) => wrap_line(raw, width),
        };
        for line in lines {
            if pages.last().is_some_and(|p: &Vec<String>| p.len() >= per_page) {
                pages.push(Vec::new());
            }
            if let Some(page) = pages.last_mut() {
                page.push(line);
            }
        }
    }
    pages
}
