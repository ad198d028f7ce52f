use serde_json::json;

use super::{
    all_options_have_text, configured_for, image_and_text_fields, read_image_and_text, shuffled,
    Editor,
};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::Result;
use crate::models::answer_option::{AnswerOption, DisplayDefinition};
use crate::models::configuration::{
    EditorConfiguration, KprimEditorConfiguration, MultipleChoiceEditorConfiguration,
};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::EditorKind;
use crate::utils::form::{read_bool, read_optional_string, read_optional_u32};

pub const VAR_SHUFFLE: &str = "mce_shuffle";
pub const VAR_THUMBNAIL: &str = "mce_thumb_size";
pub const VAR_SINGLE_LINE: &str = "mce_single_line";
pub const VAR_LABEL_TRUE: &str = "kpe_label_true";
pub const VAR_LABEL_FALSE: &str = "kpe_label_false";

/// Kprim questions always have exactly four statements.
pub const KPRIM_OPTION_COUNT: usize = 4;

pub struct MultipleChoiceEditor;

impl MultipleChoiceEditor {
    fn configuration(question: &Question) -> Option<&MultipleChoiceEditorConfiguration> {
        match question.play_configuration().editor_configuration() {
            Some(EditorConfiguration::MultipleChoice(c)) => Some(c),
            _ => None,
        }
    }
}

impl Editor for MultipleChoiceEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::MultipleChoice
    }

    fn is_complete(&self, question: &Question) -> bool {
        !question.answer_options().is_empty() && all_options_have_text(question)
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let config = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::MultipleChoice(c)) => Some(c),
            _ => None,
        };
        vec![
            FieldDefinition::new("asq_label_shuffle", FieldType::Checkbox, VAR_SHUFFLE)
                .with_value(config.map(|c| json!(c.shuffle_answers))),
            FieldDefinition::new("asq_label_thumb_size", FieldType::Number, VAR_THUMBNAIL)
                .with_value(config.and_then(|c| c.thumbnail_size).map(|s| json!(s))),
            FieldDefinition::new("asq_label_single_line", FieldType::Checkbox, VAR_SINGLE_LINE)
                .with_value(config.map(|c| json!(c.single_line))),
        ]
    }

    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        let config = EditorConfiguration::MultipleChoice(MultipleChoiceEditorConfiguration {
            shuffle_answers: read_bool(values, VAR_SHUFFLE)?,
            thumbnail_size: read_optional_u32(values, VAR_THUMBNAIL)?,
            single_line: read_bool(values, VAR_SINGLE_LINE)?,
        });
        config.validate_fields()?;
        Ok(config)
    }

    fn display_definition_fields(&self) -> Vec<FieldDefinition> {
        image_and_text_fields()
    }

    fn read_display_definition(&self, values: &FormValues) -> Result<DisplayDefinition> {
        read_image_and_text(values)
    }

    fn display_order<'a>(&self, question: &'a Question, seed: u64) -> Vec<&'a AnswerOption> {
        let options = question.answer_options().options();
        match Self::configuration(question) {
            Some(c) if c.shuffle_answers => shuffled(options, seed),
            _ => options.iter().collect(),
        }
    }
}

/// Four statements, each judged right or wrong.
pub struct KprimEditor;

impl KprimEditor {
    fn configuration(question: &Question) -> Option<&KprimEditorConfiguration> {
        match question.play_configuration().editor_configuration() {
            Some(EditorConfiguration::Kprim(c)) => Some(c),
            _ => None,
        }
    }
}

impl Editor for KprimEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Kprim
    }

    fn is_complete(&self, question: &Question) -> bool {
        question.answer_options().len() == KPRIM_OPTION_COUNT && all_options_have_text(question)
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let config = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::Kprim(c)) => c.clone(),
            _ => KprimEditorConfiguration::default(),
        };
        vec![
            FieldDefinition::new("asq_label_shuffle", FieldType::Checkbox, VAR_SHUFFLE)
                .with_value(Some(json!(config.shuffle_answers))),
            FieldDefinition::new("asq_label_thumb_size", FieldType::Number, VAR_THUMBNAIL)
                .with_value(config.thumbnail_size.map(|s| json!(s))),
            FieldDefinition::new("asq_label_true_label", FieldType::Text, VAR_LABEL_TRUE)
                .required()
                .with_value(Some(json!(config.label_true))),
            FieldDefinition::new("asq_label_false_label", FieldType::Text, VAR_LABEL_FALSE)
                .required()
                .with_value(Some(json!(config.label_false))),
        ]
    }

    /// Empty labels fall back to the standard right/wrong labels.
    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        let defaults = KprimEditorConfiguration::default();
        let config = EditorConfiguration::Kprim(KprimEditorConfiguration {
            shuffle_answers: read_bool(values, VAR_SHUFFLE)?,
            thumbnail_size: read_optional_u32(values, VAR_THUMBNAIL)?,
            label_true: read_optional_string(values, VAR_LABEL_TRUE)?.unwrap_or(defaults.label_true),
            label_false: read_optional_string(values, VAR_LABEL_FALSE)?.unwrap_or(defaults.label_false),
        });
        config.validate_fields()?;
        Ok(config)
    }

    fn display_definition_fields(&self) -> Vec<FieldDefinition> {
        image_and_text_fields()
    }

    fn read_display_definition(&self, values: &FormValues) -> Result<DisplayDefinition> {
        read_image_and_text(values)
    }

    fn display_order<'a>(&self, question: &'a Question, seed: u64) -> Vec<&'a AnswerOption> {
        let options = question.answer_options().options();
        match Self::configuration(question) {
            Some(c) if c.shuffle_answers => shuffled(options, seed),
            _ => options.iter().collect(),
        }
    }
}
