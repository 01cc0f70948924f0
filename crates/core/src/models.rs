use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

/// Body of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
        }
    }
}

/// Output of one inference run. `input` is the normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub input: String,
    pub translation: String,
    pub sentiment_score: f64,
}

/// Wire shape of a `POST /translate` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub input_text: String,
    pub translation: String,
    pub sentiment_score: f64,
}

impl From<TranslationResult> for TranslationResponse {
    fn from(result: TranslationResult) -> Self {
        Self {
            input_text: result.input,
            translation: result.translation,
            sentiment_score: result.sentiment_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
        }
    }
}
