use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{ProviderError, TranslationProvider};

pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Adapter for the public `translate_a/single` endpoint (`client=gtx`).
#[derive(Debug, Clone)]
pub struct GoogleTranslateProvider {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl GoogleTranslateProvider {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid translation provider url `{endpoint}`"))?;
        let client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(6)))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    fn request_url(&self, text: &str, target_language: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "auto")
            .append_pair("tl", target_language)
            .append_pair("dt", "t")
            .append_pair("q", text);
        url
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn provider_name(&self) -> &'static str {
        "google"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(self.request_url(text, target_language))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ProviderError::Timeout(self.timeout)
                } else {
                    ProviderError::Network(err.to_string())
                }
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            StatusCode::BAD_REQUEST => {
                return Err(ProviderError::UnsupportedLanguage(
                    target_language.to_string(),
                ))
            }
            status => return Err(ProviderError::Status(status.as_u16())),
        }

        let body = response.json::<Value>().await.map_err(|err| {
            if err.is_timeout() {
                ProviderError::Timeout(self.timeout)
            } else {
                ProviderError::MalformedResponse(err.to_string())
            }
        })?;

        extract_translation(&body)
    }
}

/// Joins the translated segments of a `translate_a/single` payload, which
/// looks like `[[["hola ", "hello ", ...], ["mundo", "world", ...]], null, "en"]`.
pub fn extract_translation(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::MalformedResponse("missing segment list".to_string()))?;

    let translated = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect::<String>();

    if translated.trim().is_empty() {
        return Err(ProviderError::EmptyTranslation);
    }
    Ok(translated)
}
