use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

const BUILTIN_POLARITY: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("cool", 0.35),
    ("delightful", 1.0),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fine", 0.42),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("like", 0.2),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("thanks", 0.2),
    ("useful", 0.3),
    ("wonderful", 1.0),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("disappointing", -0.6),
    ("dislike", -0.5),
    ("dull", -0.31),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("slow", -0.3),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("useless", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const BUILTIN_INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.2),
    ("so", 1.2),
    ("super", 1.3),
    ("too", 1.1),
    ("totally", 1.3),
    ("very", 1.3),
];

const BUILTIN_NEGATORS: &[&str] = &[
    "aren't", "can't", "didn't", "doesn't", "don't", "isn't", "never", "no", "not",
    "wasn't", "won't",
];

#[derive(Debug, Deserialize)]
struct LexiconEntry {
    word: String,
    polarity: Option<f64>,
    intensity: Option<f64>,
    #[serde(default)]
    negation: bool,
}

/// Word tables driving [`crate::LexiconSentimentScorer`].
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negators: HashSet<String>,
}

impl Lexicon {
    pub fn builtin() -> Self {
        Self {
            polarity: BUILTIN_POLARITY
                .iter()
                .map(|(word, value)| (word.to_string(), *value))
                .collect(),
            intensifiers: BUILTIN_INTENSIFIERS
                .iter()
                .map(|(word, value)| (word.to_string(), *value))
                .collect(),
            negators: BUILTIN_NEGATORS.iter().map(|word| word.to_string()).collect(),
        }
    }

    /// One JSON object per line: `{"word": "good", "polarity": 0.7}`,
    /// `{"word": "very", "intensity": 1.3}` or `{"word": "not", "negation": true}`.
    pub fn from_jsonl(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "failed reading sentiment lexicon at {}",
                path.as_ref().display()
            )
        })?;

        let mut lexicon = Self::default();
        for (index, line) in raw
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
        {
            let entry: LexiconEntry = serde_json::from_str(line)
                .with_context(|| format!("invalid lexicon line {}", index + 1))?;
            let word = entry.word.trim().to_lowercase();
            if word.is_empty() {
                continue;
            }

            if entry.negation {
                lexicon.negators.insert(word.clone());
            }
            if let Some(factor) = entry.intensity.filter(|value| value.is_finite()) {
                lexicon.intensifiers.insert(word.clone(), factor.abs());
            }
            if let Some(value) = entry.polarity.filter(|value| value.is_finite()) {
                lexicon.polarity.insert(word, value.clamp(-1.0, 1.0));
            }
        }

        if lexicon.polarity.is_empty() {
            anyhow::bail!("sentiment lexicon contains zero polarity words");
        }

        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.polarity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polarity.is_empty()
    }

    pub fn polarity(&self, word: &str) -> Option<f64> {
        self.polarity.get(word).copied()
    }

    pub fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    pub fn is_negator(&self, word: &str) -> bool {
        self.negators.contains(word)
    }
}
