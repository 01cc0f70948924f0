use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use translateai_agents::DEFAULT_PROVIDER_TIMEOUT;
use translateai_translation::{ProviderKind, DEFAULT_GOOGLE_ENDPOINT};

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_SERVICE_NAME: &str = "TranslateAI";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub service_name: String,
    /// `*` (or an empty list) admits any origin.
    pub allowed_origins: Vec<String>,
    pub provider: ProviderKind,
    pub provider_url: String,
    pub provider_timeout: Duration,
    pub sentiment_lexicon: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            allowed_origins: vec!["*".to_string()],
            provider: ProviderKind::Google,
            provider_url: DEFAULT_GOOGLE_ENDPOINT.to_string(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            sentiment_lexicon: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let provider = match non_empty("TRANSLATEAI_PROVIDER") {
            Some(value) => value
                .parse::<ProviderKind>()
                .context("invalid TRANSLATEAI_PROVIDER")?,
            None => defaults.provider,
        };

        let provider_timeout = non_empty("TRANSLATEAI_PROVIDER_TIMEOUT_SECONDS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.provider_timeout);

        let max_body_bytes = non_empty("TRANSLATEAI_MAX_BODY_BYTES")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|bytes| *bytes > 0)
            .unwrap_or(defaults.max_body_bytes);

        let allowed_origins = non_empty("TRANSLATEAI_ALLOWED_ORIGINS")
            .map(|value| parse_allowed_origins(&value))
            .unwrap_or(defaults.allowed_origins);

        Ok(Self {
            bind: non_empty("TRANSLATEAI_BIND").unwrap_or(defaults.bind),
            service_name: non_empty("TRANSLATEAI_SERVICE_NAME").unwrap_or(defaults.service_name),
            allowed_origins,
            provider,
            provider_url: non_empty("TRANSLATEAI_PROVIDER_URL").unwrap_or(defaults.provider_url),
            provider_timeout,
            sentiment_lexicon: non_empty("TRANSLATEAI_SENTIMENT_LEXICON").map(PathBuf::from),
            max_body_bytes,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        admits_any_origin(&self.allowed_origins)
    }
}

pub(crate) fn admits_any_origin(origins: &[String]) -> bool {
    origins.is_empty() || origins.iter().any(|origin| origin == "*")
}

fn parse_allowed_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
