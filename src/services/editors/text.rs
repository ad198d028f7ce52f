use serde_json::json;

use super::{configured_for, Editor};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::Result;
use crate::models::configuration::{
    EditorConfiguration, EssayEditorConfiguration, NumericEditorConfiguration,
    TextSubsetEditorConfiguration,
};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::EditorKind;
use crate::utils::form::{read_optional_u32, read_u32};

pub const VAR_MAX_LENGTH: &str = "ee_max_length";
pub const VAR_MAX_CHARS: &str = "ne_max_num_of_chars";
pub const VAR_REQUESTED_ANSWERS: &str = "tse_requested_answers";

/// Free text input, optionally capped in length.
pub struct EssayEditor;

impl Editor for EssayEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Essay
    }

    fn is_complete(&self, _question: &Question) -> bool {
        true
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let max_length = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::Essay(c)) => c.max_length.map(|l| json!(l)),
            _ => None,
        };
        vec![FieldDefinition::new("asq_label_max_length", FieldType::Number, VAR_MAX_LENGTH)
            .with_value(max_length)]
    }

    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        let config = EditorConfiguration::Essay(EssayEditorConfiguration {
            max_length: read_optional_u32(values, VAR_MAX_LENGTH)?,
        });
        config.validate_fields()?;
        Ok(config)
    }
}

pub struct NumericEditor;

impl Editor for NumericEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Numeric
    }

    fn is_complete(&self, _question: &Question) -> bool {
        true
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let max_chars = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::Numeric(c)) => c.max_num_of_chars.map(|l| json!(l)),
            _ => None,
        };
        vec![FieldDefinition::new("asq_label_max_nr_of_chars", FieldType::Number, VAR_MAX_CHARS)
            .with_value(max_chars)]
    }

    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        let config = EditorConfiguration::Numeric(NumericEditorConfiguration {
            max_num_of_chars: read_optional_u32(values, VAR_MAX_CHARS)?,
        });
        config.validate_fields()?;
        Ok(config)
    }
}

/// A number of text inputs, one per requested answer.
pub struct TextSubsetEditor;

impl TextSubsetEditor {
    fn configuration(question: &Question) -> TextSubsetEditorConfiguration {
        match question.play_configuration().editor_configuration() {
            Some(EditorConfiguration::TextSubset(c)) => c.clone(),
            _ => TextSubsetEditorConfiguration::default(),
        }
    }
}

impl Editor for TextSubsetEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::TextSubset
    }

    fn is_complete(&self, question: &Question) -> bool {
        Self::configuration(question).number_of_requested_answers as usize
            <= question.answer_options().len()
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let requested = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::TextSubset(c)) => c.number_of_requested_answers,
            _ => TextSubsetEditorConfiguration::default().number_of_requested_answers,
        };
        vec![
            FieldDefinition::new("asq_label_requested_answers", FieldType::Number, VAR_REQUESTED_ANSWERS)
                .required()
                .with_value(Some(json!(requested))),
        ]
    }

    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        let config = EditorConfiguration::TextSubset(TextSubsetEditorConfiguration {
            number_of_requested_answers: read_u32(values, VAR_REQUESTED_ANSWERS)?,
        });
        config.validate_fields()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::answer_option::{AnswerOption, AnswerOptions, DisplayDefinition};
    use crate::models::question::QuestionData;
    use crate::models::scoring_definition::TextSubsetScoringDefinition;

    fn text_subset(requested: u32, option_count: usize) -> Question {
        let options = (1..=option_count)
            .map(|i| {
                AnswerOption::create(
                    i.to_string(),
                    DisplayDefinition::Empty,
                    TextSubsetScoringDefinition::create(format!("answer {}", i), 1.0),
                )
            })
            .collect();
        Question::create(
            QuestionData::create("Subset", "", "", "", 1).unwrap(),
            QuestionPlayConfiguration::create(
                Some(EditorConfiguration::TextSubset(TextSubsetEditorConfiguration {
                    number_of_requested_answers: requested,
                })),
                None,
                None,
            ),
            AnswerOptions::create(options).unwrap(),
        )
    }

    #[test]
    fn requested_answers_cannot_exceed_options() {
        assert!(TextSubsetEditor.is_complete(&text_subset(2, 3)));
        assert!(!TextSubsetEditor.is_complete(&text_subset(4, 3)));
    }

    #[test]
    fn zero_requested_answers_is_rejected() {
        let values: FormValues = serde_json::from_value(json!({ "tse_requested_answers": "0" })).unwrap();
        assert!(matches!(TextSubsetEditor.read_config(&values), Err(Error::Constraint(_))));
    }

    #[test]
    fn free_text_editors_are_always_complete() {
        let q = text_subset(1, 0);
        assert!(EssayEditor.is_complete(&q));
        assert!(NumericEditor.is_complete(&q));
        assert!(EssayEditor.display_definition_fields().is_empty());
    }
}
