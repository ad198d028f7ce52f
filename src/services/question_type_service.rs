use std::collections::HashMap;
use std::sync::Arc;

use crate::dto::form_dto::{FieldDefinition, FormValues};
use crate::error::{Error, Result};
use crate::models::answer_option::{AnswerOption, AnswerOptions};
use crate::models::legacy::QuestionLegacyData;
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::{
    EditorKind, PresenterKind, QuestionType, ScoringKind, StrategyDefaults,
};
use crate::services::editors::{
    Editor, ErrorTextEditor, EssayEditor, KprimEditor, MatchingEditor, MultipleChoiceEditor,
    NumericEditor, OrderingEditor, TextSubsetEditor,
};
use crate::services::scoring::{
    ErrorTextScoring, EssayScoring, KprimScoring, MatchingScoring, MultipleChoiceScoring,
    NumericScoring, OrderingScoring, ScoringStrategy, TextSubsetScoring,
};

/// Registry of question types and the strategies they resolve to.
///
/// Built once at startup and shared read-only afterwards, usually behind an
/// `Arc`.
pub struct QuestionTypeService {
    defaults: StrategyDefaults,
    question_types: Vec<QuestionType>,
    editors: HashMap<EditorKind, Arc<dyn Editor>>,
    scorings: HashMap<ScoringKind, Arc<dyn ScoringStrategy>>,
}

impl QuestionTypeService {
    pub fn new(defaults: StrategyDefaults) -> Self {
        Self {
            defaults,
            question_types: Vec::new(),
            editors: HashMap::new(),
            scorings: HashMap::new(),
        }
    }

    /// Registry with every built-in strategy and question type.
    pub fn standard(defaults: StrategyDefaults) -> Result<Self> {
        let mut service = Self::new(defaults);

        let editors: Vec<Arc<dyn Editor>> = vec![
            Arc::new(MultipleChoiceEditor),
            Arc::new(KprimEditor),
            Arc::new(EssayEditor),
            Arc::new(MatchingEditor),
            Arc::new(NumericEditor),
            Arc::new(TextSubsetEditor),
            Arc::new(OrderingEditor),
            Arc::new(ErrorTextEditor),
        ];
        for editor in editors {
            service.register_editor(editor);
        }

        let scorings: Vec<Arc<dyn ScoringStrategy>> = vec![
            Arc::new(MultipleChoiceScoring),
            Arc::new(KprimScoring),
            Arc::new(EssayScoring),
            Arc::new(MatchingScoring),
            Arc::new(NumericScoring),
            Arc::new(TextSubsetScoring),
            Arc::new(OrderingScoring),
            Arc::new(ErrorTextScoring),
        ];
        for scoring in scorings {
            service.register_scoring(scoring);
        }

        // single choice is multiple choice capped at one answer
        let types = [
            ("single_choice", EditorKind::MultipleChoice, ScoringKind::MultipleChoice),
            ("multiple_choice", EditorKind::MultipleChoice, ScoringKind::MultipleChoice),
            ("kprim", EditorKind::Kprim, ScoringKind::Kprim),
            ("essay", EditorKind::Essay, ScoringKind::Essay),
            ("matching", EditorKind::Matching, ScoringKind::Matching),
            ("numeric", EditorKind::Numeric, ScoringKind::Numeric),
            ("text_subset", EditorKind::TextSubset, ScoringKind::TextSubset),
            ("ordering", EditorKind::Ordering, ScoringKind::Ordering),
            ("error_text", EditorKind::ErrorText, ScoringKind::ErrorText),
        ];
        for (key, editor, scoring) in types {
            service.add_question_type(key, &format!("{}_form", key), editor, scoring)?;
        }

        tracing::info!(
            question_types = service.question_types.len(),
            default_editor = %defaults.editor,
            default_scoring = %defaults.scoring,
            "Question type registry ready"
        );
        Ok(service)
    }

    pub fn register_editor(&mut self, editor: Arc<dyn Editor>) {
        tracing::debug!(editor = %editor.kind(), "Registering editor");
        self.editors.insert(editor.kind(), editor);
    }

    pub fn register_scoring(&mut self, scoring: Arc<dyn ScoringStrategy>) {
        tracing::debug!(scoring = %scoring.kind(), "Registering scoring");
        self.scorings.insert(scoring.kind(), scoring);
    }

    pub fn add_question_type(
        &mut self,
        key: &str,
        form_factory: &str,
        editor: EditorKind,
        scoring: ScoringKind,
    ) -> Result<()> {
        if self.question_types.iter().any(|t| t.key == key) {
            return Err(Error::DuplicateKey(format!(
                "Question type \"{}\" is already registered",
                key
            )));
        }
        self.question_types.push(QuestionType {
            key: key.to_string(),
            form_factory: form_factory.to_string(),
            editor,
            scoring,
        });
        Ok(())
    }

    pub fn resolve(&self, key: &str) -> Result<&QuestionType> {
        self.question_types
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| Error::NotFound(format!("Question type \"{}\" is not registered", key)))
    }

    pub fn resolve_legacy(&self, legacy: &QuestionLegacyData) -> Result<&QuestionType> {
        self.resolve(legacy.question_type_key()?)
    }

    /// Registered question types in registration order.
    pub fn question_types(&self) -> &[QuestionType] {
        &self.question_types
    }

    pub fn defaults(&self) -> &StrategyDefaults {
        &self.defaults
    }

    pub fn editor(&self, kind: EditorKind) -> Result<&dyn Editor> {
        self.editors
            .get(&kind)
            .map(|e| e.as_ref())
            .ok_or_else(|| Error::NotFound(format!("No editor registered for {}", kind)))
    }

    pub fn scoring(&self, kind: ScoringKind) -> Result<&dyn ScoringStrategy> {
        self.scorings
            .get(&kind)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::NotFound(format!("No scoring registered for {}", kind)))
    }

    pub fn editor_kind(&self, play: &QuestionPlayConfiguration) -> EditorKind {
        play.editor_kind(&self.defaults)
    }

    pub fn scoring_kind(&self, play: &QuestionPlayConfiguration) -> ScoringKind {
        play.scoring_kind(&self.defaults)
    }

    pub fn presenter_kind(&self, play: &QuestionPlayConfiguration) -> PresenterKind {
        play.presenter_kind(&self.defaults)
    }

    pub fn editor_for(&self, play: &QuestionPlayConfiguration) -> Result<&dyn Editor> {
        self.editor(self.editor_kind(play))
    }

    pub fn scoring_for(&self, play: &QuestionPlayConfiguration) -> Result<&dyn ScoringStrategy> {
        self.scoring(self.scoring_kind(play))
    }

    /// True when both editor and scoring are configured and together they
    /// define at least one per-option field.
    pub fn has_answer_options(&self, play: &QuestionPlayConfiguration) -> bool {
        if play.editor_configuration().is_none() || play.scoring_configuration().is_none() {
            return false;
        }
        match (self.editor_for(play), self.scoring_for(play)) {
            (Ok(editor), Ok(scoring)) => {
                !editor.display_definition_fields().is_empty()
                    || !scoring.scoring_definition_fields().is_empty()
            }
            _ => false,
        }
    }

    /// Both the resolved editor and the resolved scoring report complete.
    pub fn is_complete(&self, question: &Question) -> bool {
        let play = question.play_configuration();
        match (self.editor_for(play), self.scoring_for(play)) {
            (Ok(editor), Ok(scoring)) => editor.is_complete(question) && scoring.is_complete(question),
            _ => false,
        }
    }

    /// Question-wide fields of a question type, prefilled from `play`.
    pub fn config_fields(&self, key: &str, play: &QuestionPlayConfiguration) -> Result<Vec<FieldDefinition>> {
        let question_type = self.resolve(key)?;
        let mut fields = self.editor(question_type.editor)?.generate_fields(play);
        fields.extend(self.scoring(question_type.scoring)?.generate_fields(play));
        Ok(fields)
    }

    /// Per-option fields of a question type.
    pub fn option_fields(&self, key: &str) -> Result<Vec<FieldDefinition>> {
        let question_type = self.resolve(key)?;
        let mut fields = self.editor(question_type.editor)?.display_definition_fields();
        fields.extend(self.scoring(question_type.scoring)?.scoring_definition_fields());
        Ok(fields)
    }

    /// Play configuration of a question type read back from its form.
    pub fn read_play_configuration(&self, key: &str, values: &FormValues) -> Result<QuestionPlayConfiguration> {
        let question_type = self.resolve(key)?;
        let editor = self.editor(question_type.editor)?.read_config(values)?;
        let scoring = self.scoring(question_type.scoring)?.read_config(values)?;
        Ok(QuestionPlayConfiguration::create(Some(editor), Some(scoring), None))
    }

    /// One answer option per form row, numbered "1", "2", ... in row order.
    pub fn build_answer_options(
        &self,
        play: &QuestionPlayConfiguration,
        rows: &[FormValues],
    ) -> Result<AnswerOptions> {
        let editor = self.editor_for(play)?;
        let scoring = self.scoring_for(play)?;
        let options = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Ok(AnswerOption::create(
                    (i + 1).to_string(),
                    editor.read_display_definition(row)?,
                    scoring.read_scoring_definition(row)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        AnswerOptions::create(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::{
        EditorConfiguration, EssayEditorConfiguration, EssayScoringConfiguration, EssayScoringMode,
        MultipleChoiceEditorConfiguration, MultipleChoiceScoringConfiguration, NumericEditorConfiguration,
        NumericScoringConfiguration, ScoringConfiguration, TextMatching,
    };
    use crate::models::question::QuestionData;
    use crate::services::scoring::MockScoringStrategy;
    use serde_json::json;

    fn registry() -> QuestionTypeService {
        QuestionTypeService::standard(StrategyDefaults::default()).unwrap()
    }

    #[test]
    fn standard_registers_every_type_in_order() {
        let registry = registry();
        let keys: Vec<&str> = registry.question_types().iter().map(|t| t.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "single_choice",
                "multiple_choice",
                "kprim",
                "essay",
                "matching",
                "numeric",
                "text_subset",
                "ordering",
                "error_text"
            ]
        );
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut service = registry();
        let err = service
            .add_question_type("essay", "essay_form", EditorKind::Essay, ScoringKind::Essay)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
    }

    #[test]
    fn unknown_key_is_not_found() {
        assert!(matches!(registry().resolve("cloze"), Err(Error::NotFound(_))));
    }

    #[test]
    fn legacy_ids_resolve_to_registered_types() {
        let service = registry();
        let kprim = service.resolve_legacy(&QuestionLegacyData::create(16)).unwrap();
        assert_eq!(kprim.scoring, ScoringKind::Kprim);
        assert!(matches!(
            service.resolve_legacy(&QuestionLegacyData::create(0)),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn answer_options_need_both_configurations_and_fields() {
        let service = registry();
        let mc = QuestionPlayConfiguration::create(
            Some(EditorConfiguration::MultipleChoice(MultipleChoiceEditorConfiguration::default())),
            Some(MultipleChoiceScoringConfiguration::create(1)),
            None,
        );
        let editor_only = QuestionPlayConfiguration::create(
            Some(EditorConfiguration::MultipleChoice(MultipleChoiceEditorConfiguration::default())),
            None,
            None,
        );
        let numeric = QuestionPlayConfiguration::create(
            Some(EditorConfiguration::Numeric(NumericEditorConfiguration::default())),
            Some(ScoringConfiguration::Numeric(NumericScoringConfiguration {
                points: 1.0,
                lower_bound: 0.0,
                upper_bound: 1.0,
            })),
            None,
        );
        let essay = QuestionPlayConfiguration::create(
            Some(EditorConfiguration::Essay(EssayEditorConfiguration::default())),
            Some(EssayScoringConfiguration::create(TextMatching::CaseInsensitive, EssayScoringMode::AutomaticAny, 0.0)),
            None,
        );
        assert!(service.has_answer_options(&mc));
        assert!(!service.has_answer_options(&editor_only));
        assert!(!service.has_answer_options(&numeric));
        assert!(service.has_answer_options(&essay));
    }

    #[test]
    fn builds_options_from_rows() {
        let service = registry();
        let play = QuestionPlayConfiguration::create(None, Some(MultipleChoiceScoringConfiguration::create(1)), None);
        let rows: Vec<FormValues> = vec![
            serde_json::from_value(json!({ "mcdd_text": "Paris", "mcsd_selected": 1, "mcsd_unselected": 0 })).unwrap(),
            serde_json::from_value(json!({ "mcdd_text": "Rome", "mcsd_selected": "0", "mcsd_unselected": "0" })).unwrap(),
        ];
        let options = service.build_answer_options(&play, &rows).unwrap();
        let ids: Vec<&str> = options.options().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(options.get("2").unwrap().display_definition().text(), Some("Rome"));
    }

    #[test]
    fn completeness_dispatches_to_resolved_scoring() {
        let mut scoring = MockScoringStrategy::new();
        scoring.expect_kind().return_const(ScoringKind::MultipleChoice);
        scoring.expect_is_complete().times(1).return_const(false);

        let mut service = registry();
        service.register_scoring(Arc::new(scoring));

        let option = AnswerOption::create(
            "1",
            crate::models::answer_option::DisplayDefinition::image_and_text("Yes", None),
            crate::models::scoring_definition::MultipleChoiceScoringDefinition::create(1.0, 0.0),
        );
        let question = Question::create(
            QuestionData::create("Mocked", "", "", "", 1).unwrap(),
            QuestionPlayConfiguration::create(None, Some(MultipleChoiceScoringConfiguration::create(1)), None),
            AnswerOptions::create(vec![option]).unwrap(),
        );
        assert!(!service.is_complete(&question));
    }
}
