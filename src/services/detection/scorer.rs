// Scoring
// Turns a FeatureRecord into calibrated ai/human/mixed probabilities and a
// label. All weights and band edges live in ScoreConfig as plain data, so a
// different calibration is a different config value, not different code.

use serde::{Deserialize, Serialize};

use crate::models::{FeatureRecord, Label, ScoreResult};

const EPSILON: f64 = 1e-9;

/// Linear ramp from 0 at `low` to 1 at `high`, clamped outside the band.
fn scale(value: f64, low: f64, high: f64) -> f64 {
    if high <= low {
        return if value >= high { 1.0 } else { 0.0 };
    }
    ((value - low) / (high - low)).clamp(0.0, 1.0)
}

/// One weighted contribution: evidence strength ramps across [low, high].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
    pub weight: f64,
}

impl Band {
    /// Contribution that grows as the value rises through the band.
    fn rising(&self, value: f64) -> f64 {
        self.weight * scale(value, self.low, self.high)
    }

    /// Contribution that grows as the value falls through the band.
    fn falling(&self, value: f64) -> f64 {
        self.weight * (1.0 - scale(value, self.low, self.high))
    }
}

/// Band that peaks in the middle: full strength between the rise and fall
/// ramps, fading to zero outside both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MidBand {
    pub rise_low: f64,
    pub rise_high: f64,
    pub fall_low: f64,
    pub fall_high: f64,
    pub weight: f64,
}

impl MidBand {
    fn centered(&self, value: f64) -> f64 {
        self.weight
            * scale(value, self.rise_low, self.rise_high)
            * (1.0 - scale(value, self.fall_low, self.fall_high))
    }
}

/// Full scorer calibration. `Default` carries the shipped tuning; the config
/// store round-trips this through JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreConfig {
    // AI-leaning evidence
    pub low_burstiness: Band,
    pub low_type_token: Band,
    pub stopword_ratio: Band,
    pub ngram_repetition: Band,
    pub list_share: Band,
    pub step_hits: Band,
    pub imperative_share: Band,
    pub transition_share: Band,
    /// Mean sentence length in the "template prose" register.
    pub template_length: MidBand,

    // Human-leaning evidence
    pub high_burstiness: Band,
    pub high_type_token: Band,
    pub numeral_hits: Band,
    pub year_hits: Band,
    pub citation_hits: Band,
    pub entity_hits: Band,
    pub quote_hits: Band,
    pub contraction_ratio: Band,
    pub second_person_ratio: Band,
    pub punctuation_diversity: Band,

    /// Rhythm evidence needs at least this many sentences to mean anything.
    pub min_sentences_for_rhythm: usize,
    /// Damping applied to `1 − |ai − human|` when forming the mixed bucket.
    pub mixed_damping: f64,
    /// Hard ceiling on the mixed bucket.
    pub mixed_cap: f64,
    /// Probability a side must reach for a "likely" label.
    pub likely_threshold: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            low_burstiness: Band { low: 0.25, high: 0.65, weight: 1.6 },
            low_type_token: Band { low: 0.38, high: 0.62, weight: 1.4 },
            stopword_ratio: Band { low: 0.42, high: 0.60, weight: 0.6 },
            ngram_repetition: Band { low: 0.02, high: 0.18, weight: 1.3 },
            list_share: Band { low: 0.10, high: 0.60, weight: 1.8 },
            step_hits: Band { low: 0.0, high: 3.0, weight: 0.8 },
            imperative_share: Band { low: 0.10, high: 0.50, weight: 1.0 },
            transition_share: Band { low: 0.08, high: 0.35, weight: 1.0 },
            template_length: MidBand {
                rise_low: 9.0,
                rise_high: 14.0,
                fall_low: 20.0,
                fall_high: 28.0,
                weight: 0.4,
            },
            high_burstiness: Band { low: 0.45, high: 0.95, weight: 1.5 },
            high_type_token: Band { low: 0.55, high: 0.85, weight: 1.2 },
            numeral_hits: Band { low: 0.5, high: 4.0, weight: 1.2 },
            year_hits: Band { low: 0.5, high: 2.0, weight: 0.8 },
            citation_hits: Band { low: 0.5, high: 2.0, weight: 1.4 },
            entity_hits: Band { low: 0.5, high: 3.0, weight: 1.2 },
            quote_hits: Band { low: 1.0, high: 6.0, weight: 0.7 },
            contraction_ratio: Band { low: 0.005, high: 0.04, weight: 1.1 },
            second_person_ratio: Band { low: 0.005, high: 0.05, weight: 0.9 },
            punctuation_diversity: Band { low: 0.2, high: 0.6, weight: 0.5 },
            min_sentences_for_rhythm: 3,
            mixed_damping: 0.5,
            mixed_cap: 0.34,
            likely_threshold: 0.65,
        }
    }
}

impl ScoreConfig {
    /// Total AI-leaning evidence strength.
    fn ai_strength(&self, f: &FeatureRecord) -> f64 {
        let mut strength = 0.0;
        if f.sentence_count >= self.min_sentences_for_rhythm {
            strength += self.low_burstiness.falling(f.burstiness);
        }
        // A document with no words has no vocabulary to be narrow.
        if f.word_count > 0 {
            strength += self.low_type_token.falling(f.type_token_ratio);
        }
        strength += self.stopword_ratio.rising(f.stopword_ratio);
        strength += self.ngram_repetition.rising(f.ngram_repetition);
        strength += self.list_share.rising(f.list_share);
        strength += self.step_hits.rising(f.step_hits as f64);
        strength += self.imperative_share.rising(f.imperative_share);
        strength += self.transition_share.rising(f.transition_share);
        strength += self.template_length.centered(f.mean_sentence_len);
        strength
    }

    /// Total human-leaning evidence strength.
    fn human_strength(&self, f: &FeatureRecord) -> f64 {
        let mut strength = 0.0;
        if f.sentence_count >= self.min_sentences_for_rhythm {
            strength += self.high_burstiness.rising(f.burstiness);
        }
        strength += self.high_type_token.rising(f.type_token_ratio);
        strength += self.numeral_hits.rising(f.numeral_hits as f64);
        strength += self.year_hits.rising(f.year_hits as f64);
        strength += self.citation_hits.rising(f.citation_hits as f64);
        strength += self.entity_hits.rising(f.entity_hits as f64);
        strength += self.quote_hits.rising(f.quote_hits as f64);
        strength += self.contraction_ratio.rising(f.contraction_ratio);
        strength += self.second_person_ratio.rising(f.second_person_ratio);
        // Punctuation without any words is noise, not style.
        if f.word_count > 0 {
            strength += self.punctuation_diversity.rising(f.punctuation_diversity);
        }
        strength
    }

    /// Score a feature record into calibrated probabilities and a label.
    pub fn score(&self, features: &FeatureRecord) -> ScoreResult {
        let ai_raw = self.ai_strength(features);
        let human_raw = self.human_strength(features);
        let total = ai_raw + human_raw;

        let (ai_share, human_share) = if total < EPSILON {
            (0.5, 0.5)
        } else {
            (ai_raw / total, human_raw / total)
        };

        // Overlap between the sides becomes the mixed bucket, damped and
        // capped so it never dominates a clear verdict.
        let overlap = 1.0 - (ai_share - human_share).abs();
        let mixed = (overlap * self.mixed_damping).min(self.mixed_cap);

        let ai = ai_share * (1.0 - mixed);
        let human = human_share * (1.0 - mixed);

        let (ai, human, mixed) = round_simplex(ai, human, mixed);

        let label = if ai >= self.likely_threshold {
            Label::LikelyAi
        } else if human >= self.likely_threshold {
            Label::LikelyHuman
        } else {
            Label::Unclear
        };

        ScoreResult {
            ai_probability: ai,
            human_probability: human,
            mixed_probability: mixed,
            label,
        }
    }
}

/// Round each bucket to 4 decimals, then assign the leftover mass to the
/// largest bucket so the three sum to exactly 1.0. Ties go ai, human, mixed.
fn round_simplex(ai: f64, human: f64, mixed: f64) -> (f64, f64, f64) {
    let round4 = |v: f64| (v * 10_000.0).round() / 10_000.0;
    let mut parts = [round4(ai), round4(human), round4(mixed)];
    let remainder = 1.0 - parts.iter().sum::<f64>();

    let mut largest = 0;
    for i in 1..parts.len() {
        if parts[i] > parts[largest] {
            largest = i;
        }
    }
    parts[largest] = round4(parts[largest] + remainder);
    (parts[0], parts[1], parts[2])
}
