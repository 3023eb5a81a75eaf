// Detection Pipeline
// segmenter -> feature extractor -> scorer -> explainer, assembled behind a
// single Classifier. Pure and reentrant: no I/O, no shared mutable state.

pub mod explainer;
pub mod feature_extractor;
pub mod scorer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ClassifyResponse;
use crate::services::lexicon::Lexicon;
use crate::services::text_processor::segment;

pub use scorer::ScoreConfig;

fn default_top_k() -> usize {
    6
}

/// Everything tunable about a classifier instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    pub score: ScoreConfig,
    /// Sentences reported per side of the explanation.
    pub explain_top_k: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            score: ScoreConfig::default(),
            explain_top_k: default_top_k(),
        }
    }
}

/// A configured classification pipeline. Construction is cheap; one instance
/// can serve any number of calls, from any thread, with no cross-call state.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    lexicon: Lexicon,
    config: DetectorConfig,
}

impl Classifier {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            lexicon: Lexicon::default(),
            config,
        }
    }

    pub fn with_lexicon(config: DetectorConfig, lexicon: Lexicon) -> Self {
        Self { lexicon, config }
    }

    /// Run the full pipeline over one document.
    pub fn classify(&self, text: &str) -> ClassifyResponse {
        let (sentences, words) = segment(text);
        let features = feature_extractor::extract(&self.lexicon, text, &sentences, &words);
        let scores = self.config.score.score(&features);
        let explanation = explainer::explain(
            &self.lexicon,
            &sentences,
            &features,
            self.config.explain_top_k,
        );

        debug!(
            sentences = features.sentence_count,
            words = features.word_count,
            label = ?scores.label,
            "classified document"
        );

        ClassifyResponse {
            scores,
            explanation,
            features,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Classify with the default calibration and lexicon.
pub fn classify(text: &str) -> ClassifyResponse {
    Classifier::default().classify(text)
}
