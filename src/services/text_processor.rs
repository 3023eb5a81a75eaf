// Text Processing Service
// Sentence segmentation and word tokenization for the classification pipeline

use regex::Regex;
use std::sync::OnceLock;

/// Lines opening with an ordinal (`1.` / `1)`), a bullet glyph, or a
/// `step N` heading are kept whole; a naive splitter would shred them.
fn structural_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(\d+[.)]|[-*•✓❌–—]|step\s*\d+)").expect("structural prefix regex")
    })
}

/// Boundary after `.`/`?`/`!` + whitespace when the next char opens a new
/// sentence (uppercase, quote, or bracket). The regex crate has no
/// lookahead, so the follower is captured and re-emitted after a NUL marker.
fn boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([.?!])\s+(["“”'‘(\[A-Z])"#).expect("sentence boundary regex")
    })
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z0-9'’]+").expect("token regex"))
}

/// Normalize CRLF / bare CR to LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split text into sentence-like units.
///
/// Lines are the outer unit: the text is split on one-or-more newlines and
/// each trimmed non-empty line is processed independently, so list items and
/// step headings never merge with surrounding prose. Fragments without a
/// single ASCII letter are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    let normalized = normalize_line_endings(text);
    let mut sentences = Vec::new();

    for line in normalized.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if structural_prefix_re().is_match(line) {
            push_if_alphabetic(&mut sentences, line);
            continue;
        }

        let marked = boundary_re().replace_all(line, "$1\u{0}$2");
        for fragment in marked.split('\u{0}') {
            push_if_alphabetic(&mut sentences, fragment.trim());
        }
    }

    sentences
}

fn push_if_alphabetic(out: &mut Vec<String>, fragment: &str) {
    if fragment.chars().any(|c| c.is_ascii_alphabetic()) {
        out.push(fragment.to_string());
    }
}

/// Lowercase word tokens: maximal runs of `[a-z0-9'’]`.
/// Used for both whole-document and per-sentence counts.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    token_re()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether a sentence carries a list/ordinal/step prefix.
pub fn has_structural_prefix(sentence: &str) -> bool {
    structural_prefix_re().is_match(sentence.trim_start())
}

/// Whether a sentence is specifically a `step N` heading.
pub fn is_step_heading(sentence: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)^step\s*\d+").expect("step heading regex"));
    re.is_match(sentence.trim_start())
}

/// One pass over the document: ordered sentences plus ordered word tokens.
/// Empty input yields two empty sequences.
pub fn segment(text: &str) -> (Vec<String>, Vec<String>) {
    (split_sentences(text), tokenize(text))
}
