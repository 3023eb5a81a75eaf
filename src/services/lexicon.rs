// Lexicon
// Closed word lists and shared patterns used by the feature extractor and
// the explainer. Owned by the classifier instance rather than free-floating
// process state, so alternative tunings can coexist in one process.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "of", "in", "on", "for", "to", "and", "or", "as", "at", "by", "from", "is",
    "are", "was", "were", "be", "been", "being", "that", "which", "who", "whom", "with", "without",
    "about", "over", "under", "into", "onto", "if", "then", "else", "so", "this", "these", "those",
    "it", "its", "they", "them", "he", "she", "his", "her", "we", "us", "you", "your", "i", "me",
    "my", "our", "not", "no", "do", "does", "did", "has", "have", "had", "will", "would", "could",
    "should", "can", "may", "might", "but", "than", "too", "very", "just", "also", "there", "when",
    "where", "how", "what", "why", "all", "some", "any", "each", "more", "most", "other", "such",
];

const TRANSITION_OPENERS: &[&str] = &[
    "however",
    "moreover",
    "furthermore",
    "additionally",
    "in conclusion",
    "in summary",
    "overall",
    "first",
    "firstly",
    "second",
    "secondly",
    "third",
    "finally",
    "lastly",
    "in addition",
    "on the other hand",
    "as a result",
    "therefore",
    "consequently",
    "ultimately",
];

const IMPERATIVE_VERBS: &[&str] = &[
    "start", "use", "avoid", "try", "consider", "ensure", "make", "keep", "remember", "focus",
    "choose", "follow", "check", "review", "create", "build", "add", "remove", "set", "take",
    "begin", "stop", "learn", "practice", "apply",
];

// Both apostrophe forms: the tokenizer preserves curly quotes as-is.
const SECOND_PERSON: &[&str] = &[
    "you", "your", "yours", "yourself", "yourselves", "you're", "you've", "you'll", "you'd",
    "you’re", "you’ve", "you’ll", "you’d",
];

/// Proper nouns and organizations treated as named-entity evidence.
const NAMED_ENTITIES: &[&str] = &[
    "techcrunch",
    "appfigures",
    "reuters",
    "bloomberg",
    "forbes",
    "wired",
    "bbc",
    "cnn",
    "nytimes",
    "google",
    "apple",
    "microsoft",
    "amazon",
    "meta",
    "openai",
    "nasa",
    "spotify",
    "netflix",
    "tesla",
    "samsung",
];

const CITATION_PHRASES: &[&str] = &[
    "according to",
    "reported",
    "reports",
    "reportedly",
    "study",
    "survey",
    "announced",
    "said in a statement",
    "told reporters",
    "press release",
    "interview",
    "spokesperson",
];

/// Second tokens that disqualify an imperative reading of the opener,
/// e.g. "Use of this method..." is nominal, not a command.
const IMPERATIVE_EXCLUDED_FOLLOWERS: &[&str] = &["of", "is", "was", "are", "were"];

pub fn contraction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\w+['’](t|re|ve|ll|d|m|s)\b").expect("contraction regex"))
}

/// Numbers, currency amounts, and percentages.
pub fn numeral_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$€£]\d[\d,.]*|\d[\d,.]*%|\b\d[\d,.]*\b").expect("numeral regex"))
}

/// Plausible calendar years.
pub fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year regex"))
}

const BEING_VERBS: &[&str] = &["is", "are", "was", "were", "be", "been", "being"];

/// Alternation of the entries, word-bounded on both ends so `"meta"` never
/// fires inside "metaphor" and "reported" never double-counts "reportedly".
fn word_bounded(entries: &[&str]) -> Regex {
    Regex::new(&format!(r"\b(?:{})\b", entries.join("|"))).expect("word-bounded lexicon regex")
}

/// Closed vocabulary tables shared across the pipeline. Construct once and
/// inject; `Default` carries the English tuning.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: HashSet<&'static str>,
    transition_openers: Vec<&'static str>,
    imperative_verbs: HashSet<&'static str>,
    second_person: HashSet<&'static str>,
    entity_re: Regex,
    citation_re: Regex,
    being_verbs: HashSet<&'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            transition_openers: TRANSITION_OPENERS.to_vec(),
            imperative_verbs: IMPERATIVE_VERBS.iter().copied().collect(),
            second_person: SECOND_PERSON.iter().copied().collect(),
            entity_re: word_bounded(NAMED_ENTITIES),
            citation_re: word_bounded(CITATION_PHRASES),
            being_verbs: BEING_VERBS.iter().copied().collect(),
        }
    }
}

impl Lexicon {
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_second_person(&self, word: &str) -> bool {
        self.second_person.contains(word)
    }

    pub fn is_being_verb(&self, word: &str) -> bool {
        self.being_verbs.contains(word)
    }

    /// Whether a sentence opens with a transition/discourse marker. The
    /// marker must end at a word boundary, so "Secondhand" is not "second".
    pub fn starts_with_transition(&self, sentence: &str) -> bool {
        let lower = sentence.trim_start().to_lowercase();
        self.transition_openers.iter().any(|marker| {
            lower
                .strip_prefix(marker)
                .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric()))
        })
    }

    /// Whether a sentence opens with a bare imperative verb. Nominal uses
    /// ("Use of ...") are excluded via the follower token.
    pub fn starts_with_imperative(&self, tokens: &[String]) -> bool {
        let Some(first) = tokens.first() else {
            return false;
        };
        if !self.imperative_verbs.contains(first.as_str()) {
            return false;
        }
        match tokens.get(1) {
            Some(second) => !IMPERATIVE_EXCLUDED_FOLLOWERS.contains(&second.as_str()),
            None => true,
        }
    }

    /// Named-entity occurrences in a lowercased text.
    pub fn entity_hits(&self, lower_text: &str) -> usize {
        self.entity_re.find_iter(lower_text).count()
    }

    /// Citation/journalistic phrase occurrences in a lowercased text.
    pub fn citation_hits(&self, lower_text: &str) -> usize {
        self.citation_re.find_iter(lower_text).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_stopword_membership() {
        let lex = Lexicon::default();
        assert!(lex.is_stopword("the"));
        assert!(lex.is_stopword("been"));
        assert!(!lex.is_stopword("galaxy"));
    }

    #[test]
    fn test_transition_opener() {
        let lex = Lexicon::default();
        assert!(lex.starts_with_transition("However, it failed."));
        assert!(lex.starts_with_transition("In conclusion, we agree."));
        assert!(!lex.starts_with_transition("The result was mixed."));
    }

    #[test]
    fn test_imperative_with_exclusion() {
        let lex = Lexicon::default();
        assert!(lex.starts_with_imperative(&toks(&["use", "a", "timer"])));
        assert!(!lex.starts_with_imperative(&toks(&["use", "of", "timers"])));
        assert!(!lex.starts_with_imperative(&toks(&["the", "use", "case"])));
    }

    #[test]
    fn test_entity_and_citation_hits() {
        let lex = Lexicon::default();
        let text = "appfigures reported the figures, according to techcrunch";
        assert_eq!(lex.entity_hits(text), 2);
        assert!(lex.citation_hits(text) >= 2);
    }

    #[test]
    fn test_entity_hits_require_word_boundaries() {
        let lex = Lexicon::default();
        assert_eq!(lex.entity_hits("the metaphor was apt"), 0);
        assert_eq!(lex.entity_hits("the metadata told a story"), 0);
        assert_eq!(lex.entity_hits("meta posted its results"), 1);
    }

    #[test]
    fn test_citation_phrases_count_once() {
        let lex = Lexicon::default();
        // "reportedly" is one hit, not "reported" plus "reportedly".
        assert_eq!(lex.citation_hits("the deal reportedly collapsed"), 1);
        assert_eq!(lex.citation_hits("she was studying all week"), 0);
    }

    #[test]
    fn test_transition_requires_word_boundary() {
        let lex = Lexicon::default();
        assert!(!lex.starts_with_transition("Secondhand smoke lingered."));
        assert!(!lex.starts_with_transition("Overalls were the uniform."));
        assert!(lex.starts_with_transition("Second, we check the seams."));
        assert!(lex.starts_with_transition("Overall it held up."));
    }

    #[test]
    fn test_second_person_covers_curly_apostrophes() {
        let lex = Lexicon::default();
        assert!(lex.is_second_person("you're"));
        assert!(lex.is_second_person("you’re"));
        assert!(lex.is_second_person("you’ll"));
    }

    #[test]
    fn test_contraction_pattern() {
        assert_eq!(contraction_re().find_iter("don't can't it's fine").count(), 3);
        assert_eq!(contraction_re().find_iter("plain words only").count(), 0);
    }

    #[test]
    fn test_numeral_and_year_patterns() {
        let text = "In 2025, 337 apps made $82 million, up 12%.";
        assert!(year_re().is_match(text));
        assert!(numeral_re().find_iter(text).count() >= 4);
    }
}
