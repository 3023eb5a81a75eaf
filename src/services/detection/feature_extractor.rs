// Feature Extraction
// One pass over a segmented document producing the flat FeatureRecord the
// scorer and explainer consume. Every ratio is 0 when its denominator is 0.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::FeatureRecord;
use crate::services::lexicon::{contraction_re, numeral_re, year_re, Lexicon};
use crate::services::text_processor::{has_structural_prefix, is_step_heading, tokenize};

/// Quoted span of at least two chars between straight or curly double quotes.
fn quote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"["“][^"“”]{2,}["”]"#).expect("quote regex"))
}

const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '-', '–', '—', '(', ')', '"', '\'', '“', '”', '‘', '’', '…',
];

/// Compute every signal for one document. `sentences` and `words` come from
/// the segmenter; `text` is the raw input, used for character-level counts.
pub fn extract(
    lexicon: &Lexicon,
    text: &str,
    sentences: &[String],
    words: &[String],
) -> FeatureRecord {
    let sentence_word_counts: Vec<usize> = sentences.iter().map(|s| tokenize(s).len()).collect();
    let sentence_count = sentences.len();
    let word_count = words.len();

    let mean_sentence_len = mean(&sentence_word_counts);
    let sentence_len_stddev = stddev(&sentence_word_counts, mean_sentence_len);
    let burstiness = if mean_sentence_len > 0.0 {
        sentence_len_stddev / mean_sentence_len
    } else {
        0.0
    };

    let type_token_ratio = ratio(distinct_count(words), word_count);
    let stopword_count = words.iter().filter(|w| lexicon.is_stopword(w)).count();
    let stopword_ratio = ratio(stopword_count, word_count);

    let ngram_repetition = ngram_repeat_rate(words);

    let list_hits = sentences.iter().filter(|s| has_structural_prefix(s)).count();
    let step_hits = sentences.iter().filter(|s| is_step_heading(s)).count();

    let mut transition_hits = 0usize;
    let mut imperative_hits = 0usize;
    let mut passive_hits = 0usize;
    for sentence in sentences {
        let tokens = tokenize(sentence);
        if lexicon.starts_with_transition(sentence) {
            transition_hits += 1;
        }
        if lexicon.starts_with_imperative(&tokens) {
            imperative_hits += 1;
        }
        if has_passive_window(lexicon, &tokens) {
            passive_hits += 1;
        }
    }

    let lower = text.to_lowercase();
    let second_person_count = words.iter().filter(|w| lexicon.is_second_person(w)).count();

    FeatureRecord {
        sentence_count,
        word_count,
        sentence_word_counts,
        mean_sentence_len,
        sentence_len_stddev,
        burstiness,
        type_token_ratio,
        stopword_ratio,
        ngram_repetition,
        list_share: ratio(list_hits, sentence_count),
        step_hits,
        transition_share: ratio(transition_hits, sentence_count),
        imperative_share: ratio(imperative_hits, sentence_count),
        contraction_ratio: ratio(contraction_re().find_iter(text).count(), word_count),
        second_person_ratio: ratio(second_person_count, word_count),
        numeral_hits: numeral_re().find_iter(text).count(),
        year_hits: year_re().find_iter(text).count(),
        quote_hits: quote_re().find_iter(text).count(),
        entity_hits: lexicon.entity_hits(&lower),
        citation_hits: lexicon.citation_hits(&lower),
        punctuation_diversity: punctuation_diversity(text),
        passive_hits,
    }
}

fn mean(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

/// Population standard deviation.
fn stddev(counts: &[usize], mean: f64) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let variance = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / counts.len() as f64;
    variance.sqrt()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn distinct_count(words: &[String]) -> usize {
    let mut seen = std::collections::HashSet::new();
    words.iter().filter(|w| seen.insert(w.as_str())).count()
}

/// Repeat fraction for one n: sum of (count − 1) over repeated windows,
/// divided by the number of windows.
fn repeat_rate_for(words: &[String], n: usize) -> f64 {
    if words.len() < n {
        return 0.0;
    }
    let mut counts: HashMap<String, usize> = HashMap::new();
    let total = words.len() - n + 1;
    for window in words.windows(n) {
        *counts.entry(window.join(" ")).or_insert(0) += 1;
    }
    let repeats: usize = counts.values().filter(|&&c| c > 1).map(|&c| c - 1).sum();
    repeats as f64 / total as f64
}

/// Mean repeat fraction over 2-, 3-, and 4-gram windows.
fn ngram_repeat_rate(words: &[String]) -> f64 {
    let ns = [2usize, 3, 4];
    ns.iter().map(|&n| repeat_rate_for(words, n)).sum::<f64>() / ns.len() as f64
}

/// Passive-voice heuristic: a being verb followed by an "-ed" word within
/// the next three tokens. Catches "was rejected", misses irregulars.
pub fn has_passive_window(lexicon: &Lexicon, tokens: &[String]) -> bool {
    for (i, token) in tokens.iter().enumerate() {
        if !lexicon.is_being_verb(token) {
            continue;
        }
        for follower in tokens.iter().skip(i + 1).take(3) {
            if follower.len() > 3 && follower.ends_with("ed") {
                return true;
            }
        }
    }
    false
}

fn punctuation_diversity(text: &str) -> f64 {
    let mut seen = std::collections::HashSet::new();
    let mut total = 0usize;
    for c in text.chars().filter(|c| PUNCTUATION.contains(c)) {
        seen.insert(c);
        total += 1;
    }
    ratio(seen.len(), total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::text_processor::segment;

    fn extract_from(text: &str) -> FeatureRecord {
        let lexicon = Lexicon::default();
        let (sentences, words) = segment(text);
        extract(&lexicon, text, &sentences, &words)
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let record = extract_from("");
        assert_eq!(record.sentence_count, 0);
        assert_eq!(record.word_count, 0);
        assert_eq!(record.burstiness, 0.0);
        assert_eq!(record.type_token_ratio, 0.0);
        assert_eq!(record.ngram_repetition, 0.0);
        assert_eq!(record.punctuation_diversity, 0.0);
    }

    #[test]
    fn test_uniform_sentences_have_zero_burstiness() {
        let record = extract_from("One two three four. Five six seven eight. Nine ten more here.");
        assert_eq!(record.sentence_word_counts, vec![4, 4, 4]);
        assert!(record.sentence_len_stddev.abs() < 1e-12);
        assert!(record.burstiness.abs() < 1e-12);
    }

    #[test]
    fn test_varied_sentences_have_higher_burstiness() {
        let uniform = extract_from("One two three four. Five six seven eight. Nine ten more here.");
        let varied = extract_from("Go. The quick brown fox jumped over the lazy sleeping dog. No.");
        assert!(varied.burstiness > uniform.burstiness);
    }

    #[test]
    fn test_type_token_ratio_bounds() {
        let distinct = extract_from("alpha beta gamma delta");
        assert!((distinct.type_token_ratio - 1.0).abs() < 1e-12);
        let repeated = extract_from("word word word word");
        assert!((repeated.type_token_ratio - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ngram_repetition_detects_repeated_phrases() {
        let clean = extract_from("Every token here differs from all the others completely now.");
        let loopy =
            extract_from("the best way forward is the best way forward is the best way forward");
        assert!(loopy.ngram_repetition > clean.ngram_repetition);
        assert!(loopy.ngram_repetition > 0.2);
    }

    #[test]
    fn test_list_and_step_features() {
        let record = extract_from("Step 1: Prepare.\nStep 2: Execute.\n- Review the output");
        assert_eq!(record.sentence_count, 3);
        assert_eq!(record.step_hits, 2);
        assert!((record.list_share - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transition_and_imperative_shares() {
        let record = extract_from(
            "However, plans changed. Consider the alternative. The team moved on. Use a checklist.",
        );
        assert!((record.transition_share - 0.25).abs() < 1e-12);
        assert!((record.imperative_share - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_journalistic_counts() {
        let text = "In 2025, TechCrunch reported $82 million in revenue, according to Appfigures. \
                    \"We didn't expect it,\" the founder said.";
        let record = extract_from(text);
        assert!(record.numeral_hits >= 2);
        assert_eq!(record.year_hits, 1);
        assert_eq!(record.quote_hits, 1);
        assert!(record.entity_hits >= 2);
        assert!(record.citation_hits >= 2);
        assert!(record.contraction_ratio > 0.0);
    }

    #[test]
    fn test_passive_window() {
        let lexicon = Lexicon::default();
        assert!(has_passive_window(&lexicon, &tokenize("the bid was quietly rejected")));
        assert!(!has_passive_window(&lexicon, &tokenize("she rejected the bid")));
        // Window limit: the participle sits four tokens after the verb.
        assert!(!has_passive_window(
            &lexicon,
            &tokenize("it is a very long gap before rejected")
        ));
    }

    #[test]
    fn test_punctuation_diversity() {
        let monotone = extract_from("One. Two. Three. Four.");
        assert!((monotone.punctuation_diversity - 0.25).abs() < 1e-12);
        let mixed = extract_from("Wait — really? Yes; obviously!");
        assert!(mixed.punctuation_diversity > monotone.punctuation_diversity);
    }
}
