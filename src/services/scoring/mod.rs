//! Scoring strategies, one per question type.
//!
//! Every strategy is a stateless unit struct; all working state of a
//! scoring call lives on the stack, so one instance can grade any number
//! of answers from any number of threads.

pub mod error_text;
pub mod essay;
pub mod kprim;
pub mod matching;
pub mod multiple_choice;
pub mod numeric;
pub mod ordering;
pub mod text_subset;

use crate::dto::form_dto::{FieldDefinition, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::Answer;
use crate::models::answer_option::AnswerOption;
use crate::models::configuration::{ConfigurationFor, ScoringConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::ScoringDefinition;

pub use error_text::ErrorTextScoring;
pub use essay::EssayScoring;
pub use kprim::KprimScoring;
pub use matching::MatchingScoring;
pub use multiple_choice::MultipleChoiceScoring;
pub use numeric::NumericScoring;
pub use ordering::OrderingScoring;
pub use text_subset::TextSubsetScoring;

#[cfg_attr(test, mockall::automock)]
pub trait ScoringStrategy: Send + Sync {
    fn kind(&self) -> ScoringKind;

    /// Points reached by `answer`. Totals are not clamped.
    fn score(&self, question: &Question, answer: &Answer) -> Result<f64>;

    /// The answer reaching the maximum score, built from configuration only.
    fn best_answer(&self, question: &Question) -> Result<Answer>;

    fn max_score(&self, question: &Question) -> Result<f64>;

    /// Whether configuration and options suffice to score answers.
    fn is_complete(&self, question: &Question) -> bool;

    /// Inputs for one answer option's scoring definition.
    fn scoring_definition_fields(&self) -> Vec<FieldDefinition>;

    /// Inputs for the question-wide scoring configuration, prefilled from
    /// `play` when it carries one of ours.
    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition>;

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration>;

    fn read_scoring_definition(&self, values: &FormValues) -> Result<ScoringDefinition>;
}

/// The question's scoring configuration narrowed to the variant `kind`
/// expects.
pub(crate) fn scoring_configuration<'a, T, F>(
    question: &'a Question,
    kind: ScoringKind,
    pick: F,
) -> Result<&'a T>
where
    F: FnOnce(&'a ScoringConfiguration) -> Option<&'a T>,
{
    let config = question
        .play_configuration()
        .scoring_configuration()
        .ok_or_else(|| Error::missing_configuration(kind))?;
    pick(config).ok_or_else(|| {
        Error::UnsupportedType(format!(
            "{} scoring cannot use a {} configuration",
            kind,
            config.configuration_for()
        ))
    })
}

/// Every answer option paired with its scoring definition narrowed to the
/// variant `kind` expects.
pub(crate) fn scoring_definitions<'a, T, F>(
    question: &'a Question,
    kind: ScoringKind,
    pick: F,
) -> Result<Vec<(&'a AnswerOption, &'a T)>>
where
    F: Fn(&'a ScoringDefinition) -> Option<&'a T>,
{
    question
        .answer_options()
        .options()
        .iter()
        .map(|option| {
            pick(option.scoring_definition())
                .map(|definition| (option, definition))
                .ok_or_else(|| {
                    Error::UnsupportedType(format!(
                        "Answer option \"{}\" has no {} scoring definition",
                        option.id(),
                        kind
                    ))
                })
        })
        .collect()
}

/// The play configuration's scoring configuration if it was written for
/// `kind`.
pub(crate) fn configured_for(
    play: &QuestionPlayConfiguration,
    kind: ScoringKind,
) -> Option<&ScoringConfiguration> {
    play.scoring_configuration()
        .filter(|c| c.configuration_for() == kind)
}
