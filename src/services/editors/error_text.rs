use serde_json::json;

use super::{configured_for, Editor};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::Result;
use crate::models::configuration::{EditorConfiguration, ErrorTextEditorConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::EditorKind;
use crate::utils::form::{read_optional_u32, read_string};

pub const VAR_ERROR_TEXT: &str = "ete_error_text";
pub const VAR_TEXT_SIZE: &str = "ete_text_size";

/// Presents a text whose words learners click to mark them as wrong.
pub struct ErrorTextEditor;

impl ErrorTextEditor {
    /// The words of an error text as they are indexed by the scoring.
    /// Authoring markers (`#word`, `((several words))`) are removed.
    pub fn words(error_text: &str) -> Vec<String> {
        error_text
            .split_whitespace()
            .map(|w| w.trim_start_matches('#').replace("((", "").replace("))", ""))
            .filter(|w| !w.is_empty())
            .collect()
    }
}

impl Editor for ErrorTextEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::ErrorText
    }

    fn is_complete(&self, question: &Question) -> bool {
        match question.play_configuration().editor_configuration() {
            Some(EditorConfiguration::ErrorText(c)) => !c.error_text.trim().is_empty(),
            _ => false,
        }
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let config = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::ErrorText(c)) => Some(c),
            _ => None,
        };
        vec![
            FieldDefinition::new("asq_label_error_text", FieldType::TextArea, VAR_ERROR_TEXT)
                .required()
                .with_value(config.map(|c| json!(c.error_text))),
            FieldDefinition::new("asq_label_text_size", FieldType::Number, VAR_TEXT_SIZE)
                .with_value(config.and_then(|c| c.text_size).map(|s| json!(s))),
        ]
    }

    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        let config = EditorConfiguration::ErrorText(ErrorTextEditorConfiguration {
            error_text: read_string(values, VAR_ERROR_TEXT)?,
            text_size: read_optional_u32(values, VAR_TEXT_SIZE)?,
        });
        config.validate_fields()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer_option::AnswerOptions;
    use crate::models::question::QuestionData;

    #[test]
    fn words_drop_markers() {
        let words = ErrorTextEditor::words("The cat sat ((in the hat)) and #drinked milk");
        assert_eq!(words, vec!["The", "cat", "sat", "in", "the", "hat", "and", "drinked", "milk"]);
        assert_eq!(words[7], "drinked");
    }

    #[test]
    fn needs_a_text() {
        let question = |text: &str| {
            Question::create(
                QuestionData::create("Errors", "", "", "", 1).unwrap(),
                QuestionPlayConfiguration::create(
                    Some(EditorConfiguration::ErrorText(ErrorTextEditorConfiguration {
                        error_text: text.to_string(),
                        text_size: None,
                    })),
                    None,
                    None,
                ),
                AnswerOptions::empty(),
            )
        };
        assert!(ErrorTextEditor.is_complete(&question("A #wrong word")));
        assert!(!ErrorTextEditor.is_complete(&question("   ")));
    }
}
