mod lexicon;
mod pattern;

use std::path::Path;
use std::sync::Arc;

pub use lexicon::Lexicon;
pub use pattern::LexiconSentimentScorer;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("cannot score empty text")]
    EmptyInput,
    #[error("scorer produced a non-finite polarity")]
    NonFinite,
}

/// Polarity scoring capability. Implementations must be deterministic for
/// identical input.
pub trait SentimentScorer: Send + Sync {
    fn model_name(&self) -> &'static str;

    fn polarity(&self, text: &str) -> Result<f64, ScoreError>;

    /// Polarity in `[-1.0, 1.0]`; anything the model cannot score is neutral.
    fn score(&self, text: &str) -> f64 {
        match self.polarity(text) {
            Ok(value) if value.is_finite() => value.clamp(-1.0, 1.0),
            _ => 0.0,
        }
    }
}

/// Builds the process scorer. A custom lexicon that fails to load falls back
/// to the built-in one.
pub fn load_scorer(lexicon_path: Option<&Path>) -> Arc<dyn SentimentScorer> {
    let Some(path) = lexicon_path else {
        return Arc::new(LexiconSentimentScorer::new(Lexicon::builtin()));
    };

    match Lexicon::from_jsonl(path) {
        Ok(lexicon) => {
            tracing::info!(
                path = %path.display(),
                words = lexicon.len(),
                "loaded custom sentiment lexicon"
            );
            Arc::new(LexiconSentimentScorer::new(lexicon))
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "custom sentiment lexicon unusable, using built-in lexicon"
            );
            Arc::new(LexiconSentimentScorer::new(Lexicon::builtin()))
        }
    }
}
