// End-to-end behavior of the classification pipeline on realistic prose.

use quillcheck::models::Label;
use quillcheck::services::classify;

const HOW_TO_TEXT: &str = "However, the best approach is to keep the routine simple. \
Moreover, the routine works best when the routine stays simple. \
Consider the following points before starting the process.\n\
- Keep the process simple and keep the process focused.\n\
- Avoid distractions and avoid delays during the process.\n\
- Review the process and review the results.\n\
Finally, it is important to remember the process.";

const NEWS_TEXT: &str = "TechCrunch reported in March 2025 that 337 apps had crossed \
$1 million in annual consumer spending, according to data from Appfigures. That's up \
21% from the year before. \"We didn't expect the curve to bend this fast,\" one \
analyst said in an interview. Growth was uneven, though. A handful of titles, mostly \
games, pulled in nearly half the total.";

// Same 32 words in the same order; only the sentence boundaries move.
const UNIFORM_CADENCE: &str = "The quiet harbor town woke early that morning. \
Fishermen dragged their nets across the cold sand. \
Gulls circled above the rusted green trawler hull. \
Children watched from the pier with mild interest.";

const VARIED_CADENCE: &str = "The quiet harbor town. \
Woke early that morning fishermen dragged their nets across the cold sand gulls. \
Circled above the rusted. \
Green trawler hull children watched from the pier with mild interest.";

#[test]
fn probabilities_form_a_simplex() {
    for text in ["", HOW_TO_TEXT, NEWS_TEXT, UNIFORM_CADENCE, "One word."] {
        let scores = classify(text).scores;
        let sum = scores.ai_probability + scores.human_probability + scores.mixed_probability;
        assert!((sum - 1.0).abs() < 1e-9, "simplex violated for {text:?}: {sum}");
        for p in [
            scores.ai_probability,
            scores.human_probability,
            scores.mixed_probability,
        ] {
            assert!((0.0..=1.0).contains(&p));
        }
    }
}

#[test]
fn empty_and_blank_input_yield_even_split() {
    for text in ["", "   \n\n\t  ", "!!! ??? ---"] {
        let response = classify(text);
        assert_eq!(response.scores.label, Label::Unclear, "for {text:?}");
        assert!((response.scores.ai_probability - 0.33).abs() < 1e-9);
        assert!((response.scores.human_probability - 0.33).abs() < 1e-9);
        assert!((response.scores.mixed_probability - 0.34).abs() < 1e-9);
        assert!(response.explanation.ai_top.is_empty());
        assert!(response.explanation.human_top.is_empty());
    }
}

#[test]
fn uniform_cadence_reads_more_ai_than_varied() {
    let uniform = classify(UNIFORM_CADENCE);
    let varied = classify(VARIED_CADENCE);

    // Identical vocabulary, so only the rhythm differs.
    assert_eq!(uniform.features.word_count, varied.features.word_count);
    assert!(uniform.features.burstiness < varied.features.burstiness);

    assert!(uniform.scores.ai_probability > varied.scores.ai_probability);
    assert!(uniform.scores.human_probability < varied.scores.human_probability);
}

#[test]
fn how_to_listicle_reads_likely_ai() {
    let response = classify(HOW_TO_TEXT);
    assert_eq!(response.scores.label, Label::LikelyAi);
    assert!(response.scores.ai_probability > response.scores.human_probability);

    // The bullet items should surface in the explanation with their tags.
    let tags: Vec<&str> = response
        .explanation
        .ai_top
        .iter()
        .flat_map(|t| t.tags.iter().map(String::as_str))
        .collect();
    assert!(tags.contains(&"Rigid Guidance"));
    assert!(tags.contains(&"Transition Opener"));
}

#[test]
fn journalistic_prose_reads_likely_human() {
    let response = classify(NEWS_TEXT);
    assert_eq!(response.scores.label, Label::LikelyHuman);
    assert!(response.scores.human_probability > 0.65);

    assert!(response.features.year_hits >= 1);
    assert!(response.features.numeral_hits >= 3);
    assert!(response.features.entity_hits >= 2);
    assert!(response.features.citation_hits >= 2);

    let top = &response.explanation.human_top[0];
    assert!(top.tags.contains(&"Journalistic Style".to_string()));
}

#[test]
fn step_headings_survive_segmentation() {
    let text = "Step 1: Gather the materials. Then wait.\n\
                Step 2: Mix the base coat. Apply it evenly.\n\
                Step 3: Let everything dry overnight.";
    let response = classify(text);
    // Each step line is one sentence; interior periods do not split it.
    assert_eq!(response.features.sentence_count, 3);
    assert_eq!(response.features.step_hits, 3);
    assert!((response.features.list_share - 1.0).abs() < 1e-12);
}

#[test]
fn classification_is_deterministic() {
    let first = classify(NEWS_TEXT);
    let second = classify(NEWS_TEXT);
    assert_eq!(first, second);
}

#[test]
fn explanations_are_bounded_and_tagged() {
    let long_list: String = (1..=20)
        .map(|i| format!("{i}. Use a consistent template for section {i}.\n"))
        .collect();
    let response = classify(&long_list);

    assert!(response.explanation.ai_top.len() <= 6);
    assert!(response.explanation.human_top.len() <= 6);
    for tagged in response
        .explanation
        .ai_top
        .iter()
        .chain(response.explanation.human_top.iter())
    {
        assert!(!tagged.tags.is_empty());
        assert!(tagged.position >= 1 && tagged.position <= response.features.sentence_count);
        assert!(tagged.rank_score > 0.0);
    }
}
