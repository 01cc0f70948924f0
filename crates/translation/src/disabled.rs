use async_trait::async_trait;

use crate::{ProviderError, TranslationProvider};

/// Offline mode: every call fails, so callers fall back to the input text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProvider;

#[async_trait]
impl TranslationProvider for DisabledProvider {
    fn provider_name(&self) -> &'static str {
        "disabled"
    }

    async fn translate(&self, _text: &str, _target_language: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Disabled)
    }
}
