//! Text normalization.
//!
//! Substring matching works on a single-line view with collapsed
//! whitespace, while structural parsing needs the original line breaks.
//! [`TextViews`] keeps both views of the same raw text side by side.

use unicode_normalization::UnicodeNormalization;

/// Collapse every run of whitespace (newlines included) into one space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unicode compatibility normalization (NFKC): fullwidth letters and
/// digits, ligatures and compatibility spaces become their plain forms
pub fn normalize_unicode(text: &str) -> String {
    text.nfkc().collect()
}

/// Line-preserving and single-line views of one text
#[derive(Debug, Clone, PartialEq)]
pub struct TextViews {
    /// Every line of the source, whitespace-collapsed and trimmed; blank lines stay as ""
    pub lines: Vec<String>,
    /// Whole text on one line
    pub normalized: String,
    /// `normalized`, lowercased
    pub lowercase: String,
}

impl TextViews {
    /// Views of NFKC-normalized text, as used for resumes
    pub fn new(raw: &str) -> Self {
        Self::from_text(&normalize_unicode(raw))
    }

    /// Views of the text as written; vacancy text is only lowercased
    pub fn verbatim(raw: &str) -> Self {
        Self::from_text(raw)
    }

    fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(normalize_whitespace).collect();
        let normalized = normalize_whitespace(text);
        let lowercase = normalized.to_lowercase();

        Self {
            lines,
            normalized,
            lowercase,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn non_blank_line_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_empty()).count()
    }
}
