use std::sync::Arc;

use asq_scoring::dto::form_dto::FormValues;
use asq_scoring::error::Error;
use asq_scoring::models::answer::{EssayAnswer, TextSubsetAnswer};
use asq_scoring::models::answer_option::AnswerOptions;
use asq_scoring::models::configuration::{EditorConfiguration, ScoringConfiguration, TextMatching};
use asq_scoring::models::legacy::QuestionLegacyData;
use asq_scoring::models::play_configuration::QuestionPlayConfiguration;
use asq_scoring::models::question::{Question, QuestionData};
use asq_scoring::models::question_type::{EditorKind, PresenterKind, ScoringKind, StrategyDefaults};
use asq_scoring::services::question_type_service::QuestionTypeService;
use asq_scoring::services::scoring_service::ScoringService;
use serde_json::json;

fn values(value: serde_json::Value) -> FormValues {
    serde_json::from_value(value).expect("form values")
}

#[test]
fn empty_slots_fall_back_to_registry_defaults() {
    let defaults = StrategyDefaults {
        editor: EditorKind::Essay,
        scoring: ScoringKind::Essay,
        presenter: PresenterKind::Tabs,
    };
    let service = QuestionTypeService::standard(defaults).unwrap();
    let play = QuestionPlayConfiguration::default();

    assert_eq!(service.editor_kind(&play), EditorKind::Essay);
    assert_eq!(service.scoring_kind(&play), ScoringKind::Essay);
    assert_eq!(service.presenter_kind(&play), PresenterKind::Tabs);
    assert_eq!(service.editor_for(&play).unwrap().kind(), EditorKind::Essay);
    assert!(!service.has_answer_options(&play));
}

#[test]
fn legacy_questions_load_as_choice_types() {
    let service = QuestionTypeService::standard(StrategyDefaults::default()).unwrap();
    for (id, key) in [(1, "single_choice"), (2, "multiple_choice"), (16, "kprim")] {
        let question_type = service.resolve_legacy(&QuestionLegacyData::create(id)).unwrap();
        assert_eq!(question_type.key, key);
    }
    let labels: Vec<u32> = QuestionLegacyData::question_types().iter().map(|(id, _)| *id).collect();
    assert_eq!(labels, vec![0, 1, 2, 16]);
}

#[test]
fn registering_twice_or_resolving_unknown_keys_fails() {
    let mut service = QuestionTypeService::standard(StrategyDefaults::default()).unwrap();
    assert!(matches!(
        service.add_question_type("kprim", "kprim_form", EditorKind::Kprim, ScoringKind::Kprim),
        Err(Error::DuplicateKey(_))
    ));
    service
        .add_question_type("short_essay", "short_essay_form", EditorKind::Essay, ScoringKind::Essay)
        .unwrap();
    assert_eq!(service.resolve("short_essay").unwrap().form_factory, "short_essay_form");
    assert!(matches!(service.config_fields("cloze", &QuestionPlayConfiguration::default()), Err(Error::NotFound(_))));
}

#[test]
fn empty_registry_has_no_strategies() {
    let service = QuestionTypeService::new(StrategyDefaults::default());
    assert!(service.question_types().is_empty());
    assert!(matches!(service.scoring(ScoringKind::Numeric), Err(Error::NotFound(_))));
}

#[test]
fn text_subset_authored_through_forms_scores_answers() {
    let registry = Arc::new(QuestionTypeService::standard(StrategyDefaults::default()).unwrap());

    let keys: Vec<String> = registry
        .config_fields("text_subset", &QuestionPlayConfiguration::default())
        .unwrap()
        .into_iter()
        .map(|f| f.key)
        .collect();
    assert!(keys.contains(&"tse_requested_answers".to_string()));
    assert!(keys.contains(&"tss_text_matching".to_string()));

    let play = registry
        .read_play_configuration(
            "text_subset",
            &values(json!({ "tse_requested_answers": "2", "tss_text_matching": TextMatching::Levenshtein1.code() })),
        )
        .unwrap();
    assert!(matches!(play.editor_configuration(), Some(EditorConfiguration::TextSubset(_))));
    assert!(matches!(play.scoring_configuration(), Some(ScoringConfiguration::TextSubset(_))));

    let rows = vec![
        values(json!({ "tsd_text": "Paris", "tsd_points": 2 })),
        values(json!({ "tsd_text": "Rome", "tsd_points": "1" })),
        values(json!({ "tsd_text": "Bern", "tsd_points": 3 })),
    ];
    let options: AnswerOptions = registry.build_answer_options(&play, &rows).unwrap();
    assert_eq!(options.len(), 3);

    let question = Question::create(QuestionData::create("Capitals", "Name two capitals.", "", "", 2).unwrap(), play, options);
    let service = ScoringService::new(registry.clone());

    assert!(registry.is_complete(&question));
    assert_eq!(service.max_score(&question).unwrap(), 5.0);
    assert_eq!(service.score(&question, &TextSubsetAnswer::create(["Pari", "Bern"])).unwrap(), 5.0);
    assert_eq!(service.score(&question, &TextSubsetAnswer::create(["Bern", "Bern"])).unwrap(), 3.0);
    assert!(matches!(
        service.score(&question, &TextSubsetAnswer::create(["Paris", "Rome", "Bern"])),
        Err(Error::Validation(_))
    ));
    assert!(service.score(&question, &EssayAnswer::create("Paris")).is_err());
}

#[test]
fn unreadable_forms_are_rejected() {
    let registry = QuestionTypeService::standard(StrategyDefaults::default()).unwrap();
    let missing = registry.read_play_configuration("numeric", &values(json!({ "ns_points": 1 })));
    assert!(matches!(missing, Err(Error::Validation(_))));

    let zero_requested = registry.read_play_configuration(
        "text_subset",
        &values(json!({ "tse_requested_answers": 0, "tss_text_matching": 1 })),
    );
    assert!(matches!(zero_requested, Err(Error::Constraint(_))));
}
