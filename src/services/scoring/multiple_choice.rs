use serde_json::json;

use super::{configured_for, scoring_configuration, scoring_definitions, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, MultipleChoiceAnswer};
use crate::models::answer_option::AnswerOption;
use crate::models::configuration::{MultipleChoiceScoringConfiguration, ScoringConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::{MultipleChoiceScoringDefinition, ScoringDefinition};
use crate::utils::form::{read_float, read_u32};

pub const VAR_MAX_ANSWERS: &str = "mcs_max_answers";
pub const VAR_POINTS_CHECKED: &str = "mcsd_selected";
pub const VAR_POINTS_UNCHECKED: &str = "mcsd_unselected";

/// Scores single and multiple choice questions: every option contributes
/// its checked or unchecked points.
pub struct MultipleChoiceScoring;

type Definitions<'a> = Vec<(&'a AnswerOption, &'a MultipleChoiceScoringDefinition)>;

impl MultipleChoiceScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a MultipleChoiceScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::MultipleChoice(c) => Some(c),
            _ => None,
        })
    }

    fn definitions<'a>(&self, question: &'a Question) -> Result<Definitions<'a>> {
        scoring_definitions(question, self.kind(), ScoringDefinition::as_multiple_choice)
    }

    /// Options worth checking for the best result: the `max_answers`
    /// largest positive gains over leaving them unchecked.
    fn best_selection<'a>(definitions: &Definitions<'a>, max_answers: u32) -> Vec<&'a AnswerOption> {
        let mut gains: Vec<(&AnswerOption, f64)> = definitions
            .iter()
            .map(|(option, d)| (*option, d.points_if_checked - d.points_if_unchecked))
            .filter(|(_, gain)| *gain > 0.0)
            .collect();
        gains.sort_by(|a, b| b.1.total_cmp(&a.1));
        gains
            .into_iter()
            .take(max_answers as usize)
            .map(|(option, _)| option)
            .collect()
    }
}

impl ScoringStrategy for MultipleChoiceScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::MultipleChoice
    }

    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::MultipleChoice(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;

        if answer.selected_ids.len() > config.max_answers as usize {
            return Err(Error::too_many_answers(answer.selected_ids.len(), config.max_answers));
        }
        if let Some(unknown) = answer
            .selected_ids
            .iter()
            .find(|id| !question.answer_options().contains(id))
        {
            return Err(Error::Validation(format!("Unknown answer option \"{}\"", unknown)));
        }

        let score = self
            .definitions(question)?
            .iter()
            .map(|(option, d)| {
                if answer.selected_ids.contains(option.id()) {
                    d.points_if_checked
                } else {
                    d.points_if_unchecked
                }
            })
            .sum();
        Ok(score)
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        let config = self.configuration(question)?;
        let definitions = self.definitions(question)?;
        let selected = Self::best_selection(&definitions, config.max_answers);
        Ok(MultipleChoiceAnswer::create(selected.iter().map(|o| o.id())))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        let config = self.configuration(question)?;
        let definitions = self.definitions(question)?;
        let baseline: f64 = definitions.iter().map(|(_, d)| d.points_if_unchecked).sum();
        let gain: f64 = Self::best_selection(&definitions, config.max_answers)
            .iter()
            .filter_map(|option| option.scoring_definition().as_multiple_choice())
            .map(|d| d.points_if_checked - d.points_if_unchecked)
            .sum();
        Ok(baseline + gain)
    }

    fn is_complete(&self, question: &Question) -> bool {
        let (Ok(config), Ok(definitions)) = (self.configuration(question), self.definitions(question)) else {
            return false;
        };
        !definitions.is_empty()
            && config.max_answers as usize <= definitions.len()
            && definitions
                .iter()
                .any(|(_, d)| d.points_if_checked != 0.0 || d.points_if_unchecked != 0.0)
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("asq_label_checked", FieldType::Number, VAR_POINTS_CHECKED).required(),
            FieldDefinition::new("asq_label_unchecked", FieldType::Number, VAR_POINTS_UNCHECKED).required(),
        ]
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let max_answers = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::MultipleChoice(c)) => Some(json!(c.max_answers)),
            _ => None,
        };
        vec![FieldDefinition::new("asq_label_max_answer", FieldType::Number, VAR_MAX_ANSWERS)
            .required()
            .with_value(max_answers)]
    }

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        let config = MultipleChoiceScoringConfiguration::create(read_u32(values, VAR_MAX_ANSWERS)?);
        config.validate_fields()?;
        Ok(config)
    }

    fn read_scoring_definition(&self, values: &FormValues) -> Result<ScoringDefinition> {
        Ok(MultipleChoiceScoringDefinition::create(
            read_float(values, VAR_POINTS_CHECKED)?,
            read_float(values, VAR_POINTS_UNCHECKED)?,
        ))
    }
}
