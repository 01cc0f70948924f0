mod disabled;
mod google;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use translateai_core::DEFAULT_TARGET_LANGUAGE;

pub use disabled::DisabledProvider;
pub use google::{extract_translation, GoogleTranslateProvider, DEFAULT_GOOGLE_ENDPOINT};

static LANGUAGE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(?:-[a-z0-9]{2,4})?$").expect("language code pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("translation provider is disabled")]
    Disabled,
    #[error("unsupported target language `{0}`")]
    UnsupportedLanguage(String),
    #[error("translation provider timed out after {0:?}")]
    Timeout(Duration),
    #[error("translation provider unreachable: {0}")]
    Network(String),
    #[error("translation provider rate limited the request")]
    RateLimited,
    #[error("translation provider answered with status {0}")]
    Status(u16),
    #[error("translation provider response malformed: {0}")]
    MalformedResponse(String),
    #[error("translation provider returned an empty translation")]
    EmptyTranslation,
}

impl ProviderError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::UnsupportedLanguage(_) => "unsupported_language",
            Self::Timeout(_) => "timeout",
            Self::Network(_) => "network",
            Self::RateLimited => "rate_limited",
            Self::Status(_) => "status",
            Self::MalformedResponse(_) => "malformed_response",
            Self::EmptyTranslation => "empty_translation",
        }
    }
}

/// External translation capability. Source language is always auto-detected.
/// One attempt per call, no retries.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    Disabled,
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "disabled" | "none" | "off" => Ok(Self::Disabled),
            other => anyhow::bail!("unknown translation provider `{other}`"),
        }
    }
}

pub fn build_provider(
    kind: ProviderKind,
    endpoint: &str,
    timeout: Duration,
) -> Result<Arc<dyn TranslationProvider>> {
    Ok(match kind {
        ProviderKind::Google => Arc::new(GoogleTranslateProvider::new(endpoint, timeout)?),
        ProviderKind::Disabled => Arc::new(DisabledProvider),
    })
}

/// Trims and lowercases a target language code; blank means English.
/// Codes look like `es`, `haw` or `zh-cn`.
pub fn normalize_language_code(raw: &str) -> Result<String, ProviderError> {
    let code = raw.trim().to_lowercase();
    if code.is_empty() {
        return Ok(DEFAULT_TARGET_LANGUAGE.to_string());
    }
    if LANGUAGE_CODE_RE.is_match(&code) {
        Ok(code)
    } else {
        Err(ProviderError::UnsupportedLanguage(raw.trim().to_string()))
    }
}
