use serde_json::json;

use super::{
    all_options_have_text, configured_for, image_and_text_fields, read_image_and_text, shuffled,
    Editor,
};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::Result;
use crate::models::answer_option::{AnswerOption, DisplayDefinition};
use crate::models::configuration::{EditorConfiguration, OrderingEditorConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::EditorKind;
use crate::utils::form::read_bool;

pub const VAR_VERTICAL: &str = "oe_vertical";

/// Options are authored in their correct order and always presented
/// shuffled.
pub struct OrderingEditor;

impl Editor for OrderingEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Ordering
    }

    fn is_complete(&self, question: &Question) -> bool {
        !question.answer_options().is_empty() && all_options_have_text(question)
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let vertical = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::Ordering(c)) => Some(json!(c.vertical)),
            _ => None,
        };
        vec![FieldDefinition::new("asq_label_vertical", FieldType::Checkbox, VAR_VERTICAL)
            .with_value(vertical)]
    }

    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        Ok(EditorConfiguration::Ordering(OrderingEditorConfiguration {
            vertical: read_bool(values, VAR_VERTICAL)?,
        }))
    }

    fn display_definition_fields(&self) -> Vec<FieldDefinition> {
        image_and_text_fields()
    }

    fn read_display_definition(&self, values: &FormValues) -> Result<DisplayDefinition> {
        read_image_and_text(values)
    }

    fn display_order<'a>(&self, question: &'a Question, seed: u64) -> Vec<&'a AnswerOption> {
        shuffled(question.answer_options().options(), seed)
    }
}
