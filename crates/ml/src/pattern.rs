use crate::{Lexicon, ScoreError, SentimentScorer};

const NEGATION_FACTOR: f64 = -0.5;
const NEGATION_WINDOW: usize = 2;

/// Averages lexicon polarities over the words of a text. An intensifier right
/// before a word scales it, a negator within the two preceding words flips
/// and halves it.
#[derive(Debug, Clone)]
pub struct LexiconSentimentScorer {
    lexicon: Lexicon,
}

impl LexiconSentimentScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl Default for LexiconSentimentScorer {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn model_name(&self) -> &'static str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> Result<f64, ScoreError> {
        let tokens = text
            .split_whitespace()
            .map(|word| word.to_lowercase().replace('\u{2019}', "'"))
            .collect::<Vec<_>>();
        if tokens.is_empty() {
            return Err(ScoreError::EmptyInput);
        }

        let mut assessments = Vec::new();
        for (index, token) in tokens.iter().enumerate() {
            let Some(mut value) = self.lexicon.polarity(token) else {
                continue;
            };

            if let Some(factor) = index
                .checked_sub(1)
                .and_then(|prev| self.lexicon.intensity(&tokens[prev]))
            {
                value *= factor;
            }

            let window = &tokens[index.saturating_sub(NEGATION_WINDOW)..index];
            if window.iter().any(|word| self.lexicon.is_negator(word)) {
                value *= NEGATION_FACTOR;
            }

            assessments.push(value.clamp(-1.0, 1.0));
        }

        if assessments.is_empty() {
            return Ok(0.0);
        }

        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        if !mean.is_finite() {
            return Err(ScoreError::NonFinite);
        }
        Ok(mean.clamp(-1.0, 1.0))
    }
}
