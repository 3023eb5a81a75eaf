// QuillCheck Data Models
// Shapes exchanged between the classification core and its callers

use serde::{Deserialize, Serialize};

// ============ Classification Label ============

/// Discrete verdict derived from the calibrated probabilities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    LikelyAi,
    LikelyHuman,
    Unclear,
}

// ============ Feature Record ============

/// Flat record of every signal the extractor computes for one document.
/// Consumed read-only by the scorer and the explainer; all ratios are 0
/// when their denominator is 0 and bounded to [0, 1] where noted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub sentence_count: usize,
    pub word_count: usize,
    /// Word count per sentence, in original order.
    pub sentence_word_counts: Vec<usize>,
    pub mean_sentence_len: f64,
    /// Population standard deviation of sentence word counts.
    pub sentence_len_stddev: f64,
    /// stddev / mean; rhythmic-variety proxy. 0 when mean is 0.
    pub burstiness: f64,
    /// Unique words / total words, in [0, 1].
    pub type_token_ratio: f64,
    /// Fraction of words in the closed stopword set, in [0, 1].
    pub stopword_ratio: f64,
    /// Repeat fraction averaged over 2/3/4-gram windows, in [0, 1].
    pub ngram_repetition: f64,
    /// Fraction of sentences carrying a bullet/ordinal/step prefix.
    pub list_share: f64,
    /// Count of sentences with a "step N" heading specifically.
    pub step_hits: usize,
    /// Fraction of sentences opening with a transition/discourse marker.
    pub transition_share: f64,
    /// Fraction of sentences opening with a bare imperative verb.
    pub imperative_share: f64,
    /// Contraction matches / total words, in [0, 1].
    pub contraction_ratio: f64,
    /// Second-person pronouns / total words, in [0, 1].
    pub second_person_ratio: f64,
    pub numeral_hits: usize,
    pub year_hits: usize,
    pub quote_hits: usize,
    pub entity_hits: usize,
    pub citation_hits: usize,
    /// Distinct punctuation chars / total punctuation chars, in [0, 1].
    pub punctuation_diversity: f64,
    /// Sentences matching the being-verb + "-ed" window heuristic.
    pub passive_hits: usize,
}

// ============ Score Result ============

/// Calibrated probabilities; the three always sum to 1.0 within rounding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub ai_probability: f64,
    pub human_probability: f64,
    pub mixed_probability: f64,
    pub label: Label,
}

impl ScoreResult {
    /// Rounded integer percent for each bucket, for progress-bar rendering.
    pub fn percentages(&self) -> (i32, i32, i32) {
        (
            scale_pct(self.ai_probability),
            scale_pct(self.human_probability),
            scale_pct(self.mixed_probability),
        )
    }
}

/// Clamp a probability to [0, 1] and express it as a whole percent.
pub fn scale_pct(p: f64) -> i32 {
    (p.clamp(0.0, 1.0) * 100.0).round() as i32
}

// ============ Explanation ============

/// One sentence selected as representative of a side, with the names of
/// every rule it satisfied and the rank score used to order it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaggedSentence {
    /// 1-based position of the sentence in the original document.
    pub position: usize,
    pub text: String,
    pub tags: Vec<String>,
    pub rank_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub ai_top: Vec<TaggedSentence>,
    pub human_top: Vec<TaggedSentence>,
}

// ============ Classify Response ============

/// Everything one classification call produces. No cross-call state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub scores: ScoreResult,
    pub explanation: Explanation,
    pub features: FeatureRecord,
    pub version: String,
}
