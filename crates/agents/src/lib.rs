use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};
use translateai_core::{normalize_text, TranslationResult};
use translateai_ml::SentimentScorer;
use translateai_observability::AppMetrics;
use translateai_translation::{normalize_language_code, ProviderError, TranslationProvider};

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

/// Runs normalize -> score -> translate for one piece of text. Holds no
/// per-request state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct TranslatorAgent {
    scorer: Arc<dyn SentimentScorer>,
    translator: Arc<dyn TranslationProvider>,
    metrics: Arc<AppMetrics>,
    provider_timeout: Duration,
}

impl TranslatorAgent {
    pub fn new(
        scorer: Arc<dyn SentimentScorer>,
        translator: Arc<dyn TranslationProvider>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            scorer,
            translator,
            metrics,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.translator.provider_name()
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.model_name()
    }

    /// Never fails: a provider error yields the normalized input as the
    /// translation, an unscorable text yields a neutral score.
    #[instrument(skip(self, raw_text), fields(provider = self.translator.provider_name()))]
    pub async fn run_inference(&self, raw_text: &str, target_language: &str) -> TranslationResult {
        let started = Instant::now();
        self.metrics.inc_request();

        let clean = normalize_text(raw_text);
        let sentiment_score = self.scorer.score(&clean);

        let translation = if clean.is_empty() {
            self.metrics.inc_empty_input();
            debug!("normalized input is empty, provider not called");
            String::new()
        } else {
            match self.translate(&clean, target_language).await {
                Ok(translated) => {
                    self.metrics.inc_translated();
                    translated
                }
                Err(err) => {
                    self.metrics.inc_fallback(err.kind());
                    warn!(
                        error_kind = err.kind(),
                        error = %err,
                        "translation failed, returning normalized input"
                    );
                    clean.clone()
                }
            }
        };

        self.metrics.observe_latency(started.elapsed());
        info!(
            input_chars = clean.chars().count(),
            sentiment_score,
            "inference handled"
        );

        TranslationResult {
            input: clean,
            translation,
            sentiment_score,
        }
    }

    /// Single provider attempt bounded by the configured timeout.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let target = normalize_language_code(target_language)?;

        let translated = tokio::time::timeout(
            self.provider_timeout,
            self.translator.translate(text, &target),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.provider_timeout))??;

        if translated.trim().is_empty() {
            return Err(ProviderError::EmptyTranslation);
        }
        Ok(translated)
    }
}
