use std::sync::Arc;

use asq_scoring::error::Error;
use asq_scoring::models::answer::EssayAnswer;
use asq_scoring::models::answer_option::{AnswerOption, AnswerOptions, DisplayDefinition};
use asq_scoring::models::configuration::{
    EditorConfiguration, EssayEditorConfiguration, EssayScoringConfiguration, EssayScoringMode,
    TextMatching,
};
use asq_scoring::models::play_configuration::QuestionPlayConfiguration;
use asq_scoring::models::question::{Question, QuestionData};
use asq_scoring::models::question_type::StrategyDefaults;
use asq_scoring::models::scoring_definition::EssayScoringDefinition;
use asq_scoring::services::question_type_service::QuestionTypeService;
use asq_scoring::services::scoring_service::ScoringService;
use asq_scoring::utils::text::{contains_words, normalize_words};

fn scoring_service() -> ScoringService {
    let registry = QuestionTypeService::standard(StrategyDefaults::default()).expect("registry");
    ScoringService::new(Arc::new(registry))
}

fn essay(matching: TextMatching, mode: EssayScoringMode, points: f64, options: &[(&str, f64)]) -> Question {
    let options = options
        .iter()
        .enumerate()
        .map(|(i, (text, points))| {
            AnswerOption::create(
                (i + 1).to_string(),
                DisplayDefinition::Empty,
                EssayScoringDefinition::create(*text, *points),
            )
        })
        .collect();
    Question::create(
        QuestionData::create("Essay", "Explain.", "", "", 5).expect("question data"),
        QuestionPlayConfiguration::create(
            Some(EditorConfiguration::Essay(EssayEditorConfiguration { max_length: Some(2000) })),
            Some(EssayScoringConfiguration::create(matching, mode, points)),
            None,
        ),
        AnswerOptions::create(options).expect("answer options"),
    )
}

#[test]
fn finds_required_text_case_insensitively() {
    let q = essay(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticAny, 0.0, &[("Right", 5.0)]);
    let service = scoring_service();
    assert_eq!(service.score(&q, &EssayAnswer::create("the right answer")).unwrap(), 5.0);
    assert_eq!(service.score(&q, &EssayAnswer::create("the wrong answer")).unwrap(), 0.0);
}

#[test]
fn max_score_depends_on_mode() {
    let options = [("alpha", 1.0), ("beta", 2.0), ("gamma", 4.0)];
    let service = scoring_service();
    let any = essay(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticAny, 10.0, &options);
    let all = essay(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticAll, 10.0, &options);
    let one = essay(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticOne, 10.0, &options);
    assert_eq!(service.max_score(&any).unwrap(), 7.0);
    assert_eq!(service.max_score(&all).unwrap(), 10.0);
    assert_eq!(service.max_score(&one).unwrap(), 10.0);
}

#[test]
fn manual_essays_are_not_scored_automatically() {
    let q = essay(TextMatching::CaseInsensitive, EssayScoringMode::Manual, 3.0, &[]);
    let err = scoring_service().score(&q, &EssayAnswer::create("anything")).unwrap_err();
    assert!(matches!(err, Error::InvalidState(_)));
}

#[test]
fn multi_word_phrases_are_matched_as_a_window() {
    let q = essay(TextMatching::Levenshtein2, EssayScoringMode::AutomaticAll, 4.0, &[("binary search tree", 0.0)]);
    let service = scoring_service();
    assert_eq!(service.score(&q, &EssayAnswer::create("I would use a <b>binary</b> serch tre.")).unwrap(), 4.0);
    assert_eq!(service.score(&q, &EssayAnswer::create("I would use a binary heap")).unwrap(), 0.0);
}

#[test]
fn larger_distance_never_loses_a_match() {
    let words = normalize_words("The quick brown fox jumps over the lazy dog", true);
    let needles = ["quick brown", "quikc brwn", "lazy cat", "jumps ovr teh", "elephant"];
    for needle in needles {
        let needle = normalize_words(needle, true);
        let mut found_before = false;
        for distance in 0..=5 {
            let found = contains_words(&words, &needle, distance);
            assert!(found || !found_before, "match lost at distance {}", distance);
            found_before = found;
        }
    }
}

#[test]
fn incomplete_without_text_or_points() {
    let service = scoring_service();
    let no_points = essay(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticAny, 0.0, &[("Right", 0.0)]);
    let no_text = essay(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticOne, 1.0, &[("", 0.0)]);
    let complete = essay(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticAny, 0.0, &[("Right", 5.0)]);
    assert!(!service.is_complete(&no_points));
    assert!(!service.is_complete(&no_text));
    assert!(service.is_complete(&complete));
}
