//! Classification request types

use serde_json::Value;

use super::KeywordBatch;

/// One fully composed request to the classification oracle.
///
/// Built fresh for every submission by [`crate::prompt::build_request`]
/// and never persisted. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRequest {
    template: &'static str,
    keywords: KeywordBatch,
    prompt: String,
    schema: Value,
    temperature: f32,
}

impl ClassificationRequest {
    pub(crate) fn new(
        template: &'static str,
        keywords: KeywordBatch,
        prompt: String,
        schema: Value,
        temperature: f32,
    ) -> Self {
        Self {
            template,
            keywords,
            prompt,
            schema,
            temperature,
        }
    }

    /// The instruction template the prompt was built from.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// The keyword batch interpolated into the template.
    pub fn keywords(&self) -> &KeywordBatch {
        &self.keywords
    }

    /// The composed prompt text sent to the oracle.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// JSON schema the oracle output is declared against.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}
