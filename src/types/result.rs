//! Structured classification output

use serde::Deserialize;

/// Name of the single required field in oracle output.
pub const NON_SOLAR_FIELD: &str = "non_solar_keywords";

/// The oracle's filtered keyword list.
///
/// Order is whatever the oracle emitted; it is not stable across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassificationResult {
    pub non_solar_keywords: Vec<String>,
}

impl ClassificationResult {
    /// Parse an oracle payload strictly against the output schema.
    pub fn parse(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// The keywords joined one per line, as copied by copy-list.
    pub fn to_lines(&self) -> String {
        self.non_solar_keywords.join("\n")
    }
}
