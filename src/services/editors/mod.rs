//! Editor strategies: the authoring side of a question type. An editor
//! owns the display definitions of the answer options and the editor
//! configuration, and decides in which order options are shown.

pub mod choice;
pub mod error_text;
pub mod matching;
pub mod ordering;
pub mod text;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::Result;
use crate::models::answer_option::{AnswerOption, DisplayDefinition};
use crate::models::configuration::{ConfigurationFor, EditorConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::EditorKind;
use crate::utils::form::{read_optional_string, read_string};

pub use choice::{KprimEditor, MultipleChoiceEditor};
pub use error_text::ErrorTextEditor;
pub use matching::MatchingEditor;
pub use ordering::OrderingEditor;
pub use text::{EssayEditor, NumericEditor, TextSubsetEditor};

pub const VAR_OPTION_TEXT: &str = "mcdd_text";
pub const VAR_OPTION_IMAGE: &str = "mcdd_image";

pub trait Editor: Send + Sync {
    fn kind(&self) -> EditorKind;

    /// Whether the editor configuration and the display definitions
    /// suffice to present the question.
    fn is_complete(&self, question: &Question) -> bool;

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition>;

    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration>;

    /// Inputs for one answer option's display definition. Editors without
    /// per-option display data have none.
    fn display_definition_fields(&self) -> Vec<FieldDefinition> {
        Vec::new()
    }

    fn read_display_definition(&self, _values: &FormValues) -> Result<DisplayDefinition> {
        Ok(DisplayDefinition::Empty)
    }

    /// Answer options in presentation order. The same seed always yields
    /// the same order.
    fn display_order<'a>(&self, question: &'a Question, _seed: u64) -> Vec<&'a AnswerOption> {
        question.answer_options().options().iter().collect()
    }
}

/// The play configuration's editor configuration if it was written for
/// `kind`.
pub(crate) fn configured_for(
    play: &QuestionPlayConfiguration,
    kind: EditorKind,
) -> Option<&EditorConfiguration> {
    play.editor_configuration()
        .filter(|c| c.configuration_for() == kind)
}

pub(crate) fn image_and_text_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("asq_label_answer_text", FieldType::Text, VAR_OPTION_TEXT).required(),
        FieldDefinition::new("asq_label_answer_image", FieldType::Image, VAR_OPTION_IMAGE),
    ]
}

pub(crate) fn read_image_and_text(values: &FormValues) -> Result<DisplayDefinition> {
    let text = read_string(values, VAR_OPTION_TEXT)?;
    let image = read_optional_string(values, VAR_OPTION_IMAGE)?;
    Ok(DisplayDefinition::image_and_text(text, image.as_deref()))
}

/// Every option carries a display text.
pub(crate) fn all_options_have_text(question: &Question) -> bool {
    question
        .answer_options()
        .options()
        .iter()
        .all(|o| o.display_definition().text().map_or(false, |t| !t.trim().is_empty()))
}

pub(crate) fn shuffled<T>(items: &[T], seed: u64) -> Vec<&T> {
    let mut order: Vec<&T> = items.iter().collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scoring_definition::ScoringDefinition;

    fn options(count: usize) -> Vec<AnswerOption> {
        (1..=count)
            .map(|i| AnswerOption::create(i.to_string(), DisplayDefinition::Empty, ScoringDefinition::Empty))
            .collect()
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let options = options(8);
        let first: Vec<&str> = shuffled(&options, 42).iter().map(|o| o.id()).collect();
        let second: Vec<&str> = shuffled(&options, 42).iter().map(|o| o.id()).collect();
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_by_key(|id| id.parse::<u32>().unwrap());
        assert_eq!(sorted, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn image_is_optional() {
        let values: FormValues = serde_json::from_value(serde_json::json!({ "mcdd_text": "Paris" })).unwrap();
        assert_eq!(
            read_image_and_text(&values).unwrap(),
            DisplayDefinition::image_and_text("Paris", None)
        );
    }
}
