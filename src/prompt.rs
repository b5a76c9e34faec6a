//! Prompt builder: fixed instruction template plus output schema.
//!
//! The builder is a pure substitution. It does not validate the batch;
//! callers check for blank input before building a request.

use serde_json::{Value, json};

use crate::types::{ClassificationRequest, KeywordBatch, NON_SOLAR_FIELD};

/// Sampling temperature for every classification request.
pub const TEMPERATURE: f32 = 0.0;

/// Marker in [`PROMPT_TEMPLATE`] replaced by the raw keyword text.
pub const KEYWORDS_PLACEHOLDER: &str = "{{keywords}}";

/// Instruction template sent to the oracle.
pub const PROMPT_TEMPLATE: &str = r#"
You are an expert keyword filter AI.

Your task: From the given list of search terms, extract ONLY the keywords that are NOT related to solar energy in any way.

Solar-related keywords include:
- solar, solar energy, solar system, solar panel, solar power
- solar pv, solar quotes, solar rebates, solar offers, solar installers
- solar battery, battery storage, battery company, battery system
- solar inverter, inverter company, inverter brand
- solar company, solar panel company, solar battery company, solar inverter company
- the same terms in any other language (e.g. "paneles solares", "Solaranlage", "panneaux solaires", "fotovoltaico")
- and all solar-related technologies, products, or services

Also exclude any brand names related to solar like:
Sunboost, Captain Green, Fortune Solar, Grand Solar, Solahart, SunPower, Trina, Jinko, LONGi, Canadian Solar, LG Solar, Fronius, Enphase, GoodWe, Growatt, Sungrow, Huawei, BYD, Tesla Powerwall, Alpha ESS, Fox ESS, Sonnen, Solaredge, REC, Risen, JA Solar, SolarMax, and similar.

Rules:
1. If a keyword even slightly refers to solar, energy, battery, inverter, or any brand above → EXCLUDE it.
2. If you're unsure → treat it as solar-related and exclude it.
3. Keep only unrelated keywords (completely non-solar).
4. Analyze the following list of keywords.
5. Return ONLY a JSON object with a single key "non_solar_keywords" which contains an array of the filtered strings.

Input:
{{keywords}}
"#;

/// JSON schema the oracle output is declared against.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            NON_SOLAR_FIELD: {
                "type": "array",
                "items": { "type": "string" },
                "description": "An array of keywords that are completely unrelated to solar energy."
            }
        },
        "required": [NON_SOLAR_FIELD]
    })
}

/// Compose the prompt for `keywords`.
///
/// The batch is interpolated verbatim at the first placeholder, with no
/// escaping; the oracle treats the whole prompt as text.
pub fn render_prompt(keywords: &KeywordBatch) -> String {
    PROMPT_TEMPLATE.replacen(KEYWORDS_PLACEHOLDER, keywords.as_str(), 1)
}

/// Build the request for one submission.
pub fn build_request(keywords: &KeywordBatch) -> ClassificationRequest {
    ClassificationRequest::new(
        PROMPT_TEMPLATE,
        keywords.clone(),
        render_prompt(keywords),
        output_schema(),
        TEMPERATURE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_exactly_one_placeholder() {
        assert_eq!(PROMPT_TEMPLATE.matches(KEYWORDS_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn placeholder_text_inside_keywords_is_not_expanded_again() {
        let batch = KeywordBatch::new("{{keywords}}\nhiking boots");
        let prompt = render_prompt(&batch);
        assert!(prompt.ends_with("Input:\n{{keywords}}\nhiking boots\n"));
    }

    #[test]
    fn schema_requires_the_single_field() {
        let schema = output_schema();
        assert_eq!(schema["required"], json!(["non_solar_keywords"]));
        assert_eq!(schema["properties"]["non_solar_keywords"]["type"], "array");
        assert_eq!(
            schema["properties"]["non_solar_keywords"]["items"]["type"],
            "string"
        );
    }
}
