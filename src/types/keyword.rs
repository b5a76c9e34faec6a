//! Raw keyword input

/// Raw user-supplied keyword text, one candidate per line.
///
/// The text is kept exactly as entered: duplicates, blank lines and
/// surrounding whitespace all pass through to the oracle unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordBatch(String);

impl KeywordBatch {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw text, untouched.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing but whitespace was entered.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Iterate over the candidate lines, blank ones included.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }
}

impl From<String> for KeywordBatch {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for KeywordBatch {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
