// Explanation
// Per-sentence rule tables for both sides of the verdict. Each rule is a
// named predicate with a weight; a sentence's rank is the sum of the weights
// it matched. Rules live in data tables so the sets can be audited and
// extended without touching the ranking code.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{Explanation, FeatureRecord, TaggedSentence};
use crate::services::detection::feature_extractor::has_passive_window;
use crate::services::lexicon::{contraction_re, numeral_re, year_re, Lexicon};
use crate::services::text_processor::{has_structural_prefix, tokenize};

/// Everything a rule may look at for one sentence.
pub struct RuleCtx<'a> {
    pub sentence: &'a str,
    pub tokens: &'a [String],
    pub lexicon: &'a Lexicon,
    pub features: &'a FeatureRecord,
}

struct TagRule {
    name: &'static str,
    weight: f64,
    matches: fn(&RuleCtx) -> bool,
}

fn hedge_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(it is important to|it['’]s important to|it is worth noting|in today['’]s world|plays a (crucial|vital|key) role|when it comes to|at the end of the day|a wide range of|in order to fully)\b",
        )
        .expect("hedge regex")
    })
}

const AI_RULES: &[TagRule] = &[
    TagRule {
        name: "Rigid Guidance",
        weight: 2.0,
        matches: |ctx| has_structural_prefix(ctx.sentence),
    },
    TagRule {
        name: "Imperative Tone",
        weight: 1.5,
        matches: |ctx| ctx.lexicon.starts_with_imperative(ctx.tokens),
    },
    TagRule {
        name: "Transition Opener",
        weight: 1.5,
        matches: |ctx| ctx.lexicon.starts_with_transition(ctx.sentence),
    },
    TagRule {
        name: "Formulaic Hedge",
        weight: 1.5,
        matches: |ctx| hedge_re().is_match(ctx.sentence),
    },
    TagRule {
        name: "Low Variety",
        weight: 1.0,
        matches: |ctx| {
            let total = ctx.tokens.len();
            if total < 8 {
                return false;
            }
            let distinct: std::collections::HashSet<&str> =
                ctx.tokens.iter().map(String::as_str).collect();
            (distinct.len() as f64) < 0.75 * total as f64
        },
    },
    TagRule {
        name: "Passive Construction",
        weight: 1.0,
        matches: |ctx| has_passive_window(ctx.lexicon, ctx.tokens),
    },
    TagRule {
        name: "Uniform Cadence",
        weight: 0.5,
        matches: |ctx| {
            ctx.features.sentence_count >= 3
                && ctx.features.burstiness < 0.35
                && (ctx.tokens.len() as f64 - ctx.features.mean_sentence_len).abs() <= 1.5
        },
    },
];

const HUMAN_RULES: &[TagRule] = &[
    TagRule {
        name: "Journalistic Style",
        weight: 2.0,
        matches: |ctx| ctx.lexicon.citation_hits(&ctx.sentence.to_lowercase()) > 0,
    },
    TagRule {
        name: "Named Source",
        weight: 1.5,
        matches: |ctx| ctx.lexicon.entity_hits(&ctx.sentence.to_lowercase()) > 0,
    },
    TagRule {
        name: "Concrete Numbers",
        weight: 1.5,
        matches: |ctx| numeral_re().is_match(ctx.sentence),
    },
    TagRule {
        name: "Conversational Voice",
        weight: 1.5,
        matches: |ctx| contraction_re().is_match(ctx.sentence),
    },
    TagRule {
        name: "Dated Reference",
        weight: 1.0,
        matches: |ctx| year_re().is_match(ctx.sentence),
    },
    TagRule {
        name: "Direct Address",
        weight: 1.0,
        matches: |ctx| ctx.tokens.iter().any(|t| ctx.lexicon.is_second_person(t)),
    },
    TagRule {
        name: "Quoted Material",
        weight: 1.0,
        matches: |ctx| ctx.sentence.contains('"') || ctx.sentence.contains('“'),
    },
    TagRule {
        name: "Varied Length",
        weight: 0.5,
        matches: |ctx| {
            ctx.features.sentence_count >= 3
                && ctx.features.burstiness >= 0.45
                && ctx.features.mean_sentence_len > 0.0
                && (ctx.tokens.len() as f64 - ctx.features.mean_sentence_len).abs()
                    > 0.5 * ctx.features.mean_sentence_len
        },
    },
];

fn evaluate(rules: &[TagRule], ctx: &RuleCtx) -> (Vec<String>, f64) {
    let mut tags = Vec::new();
    let mut score = 0.0;
    for rule in rules {
        if (rule.matches)(ctx) {
            tags.push(rule.name.to_string());
            score += rule.weight;
        }
    }
    (tags, score)
}

/// Rank sentences for one side: highest rank score first, earlier position
/// wins ties; sentences matching no rule are excluded entirely.
fn rank_side(
    rules: &[TagRule],
    lexicon: &Lexicon,
    sentences: &[String],
    features: &FeatureRecord,
    top_k: usize,
) -> Vec<TaggedSentence> {
    let mut ranked: Vec<TaggedSentence> = Vec::new();
    for (index, sentence) in sentences.iter().enumerate() {
        let tokens = tokenize(sentence);
        let ctx = RuleCtx {
            sentence,
            tokens: &tokens,
            lexicon,
            features,
        };
        let (tags, score) = evaluate(rules, &ctx);
        if tags.is_empty() {
            continue;
        }
        ranked.push(TaggedSentence {
            position: index + 1,
            text: sentence.clone(),
            tags,
            rank_score: score,
        });
    }
    ranked.sort_by(|a, b| {
        b.rank_score
            .partial_cmp(&a.rank_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.position.cmp(&b.position))
    });
    ranked.truncate(top_k);
    ranked
}

/// Select the top-K most AI-leaning and most human-leaning sentences.
pub fn explain(
    lexicon: &Lexicon,
    sentences: &[String],
    features: &FeatureRecord,
    top_k: usize,
) -> Explanation {
    Explanation {
        ai_top: rank_side(AI_RULES, lexicon, sentences, features, top_k),
        human_top: rank_side(HUMAN_RULES, lexicon, sentences, features, top_k),
    }
}
