use serde_json::json;

use super::{configured_for, scoring_configuration, scoring_definitions, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldOption, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, KprimAnswer};
use crate::models::answer_option::AnswerOption;
use crate::models::configuration::{KprimScoringConfiguration, ScoringConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::{KprimScoringDefinition, ScoringDefinition};
use crate::utils::form::{read_bool, read_float, read_optional_u32};

pub const VAR_POINTS: &str = "kprim_points";
pub const VAR_HALF_POINTS_AT: &str = "kprim_half_points_at";
pub const VAR_CORRECT: &str = "kpsd_correct";

/// Full points when every statement is judged correctly, half points from
/// `half_points_at` correct judgements on.
pub struct KprimScoring;

impl KprimScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a KprimScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::Kprim(c) => Some(c),
            _ => None,
        })
    }

    fn definitions<'a>(&self, question: &'a Question) -> Result<Vec<(&'a AnswerOption, &'a KprimScoringDefinition)>> {
        scoring_definitions(question, self.kind(), ScoringDefinition::as_kprim)
    }
}

impl ScoringStrategy for KprimScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::Kprim
    }

    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::Kprim(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;
        let definitions = self.definitions(question)?;

        if let Some(unknown) = answer
            .answers
            .keys()
            .find(|id| !question.answer_options().contains(id))
        {
            return Err(Error::Validation(format!("Unknown answer option \"{}\"", unknown)));
        }

        let correct = definitions
            .iter()
            .filter(|(option, d)| answer.answers.get(option.id()) == Some(&d.correct_value))
            .count();

        if correct == definitions.len() {
            return Ok(config.points);
        }
        match config.half_points_at {
            Some(threshold) if threshold > 0 && correct >= threshold as usize => Ok(config.points / 2.0),
            _ => Ok(0.0),
        }
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        let definitions = self.definitions(question)?;
        Ok(KprimAnswer::create(
            definitions.iter().map(|(option, d)| (option.id(), d.correct_value)),
        ))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        Ok(self.configuration(question)?.points)
    }

    fn is_complete(&self, question: &Question) -> bool {
        let (Ok(config), Ok(definitions)) = (self.configuration(question), self.definitions(question)) else {
            return false;
        };
        config.points > 0.0
            && config
                .half_points_at
                .map_or(true, |threshold| threshold as usize <= definitions.len())
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        vec![FieldDefinition::new("asq_label_correct_answer", FieldType::Radio, VAR_CORRECT)
            .required()
            .with_options(vec![
                FieldOption::new("asq_label_right", true),
                FieldOption::new("asq_label_wrong", false),
            ])]
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let (points, half_points_at) = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::Kprim(c)) => (Some(json!(c.points)), c.half_points_at.map(|h| json!(h))),
            _ => (None, None),
        };
        vec![
            FieldDefinition::new("asq_label_points", FieldType::Number, VAR_POINTS)
                .required()
                .with_value(points),
            FieldDefinition::new("asq_label_half_points", FieldType::Number, VAR_HALF_POINTS_AT)
                .with_value(half_points_at),
        ]
    }

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        let config = ScoringConfiguration::Kprim(KprimScoringConfiguration {
            points: read_float(values, VAR_POINTS)?,
            half_points_at: read_optional_u32(values, VAR_HALF_POINTS_AT)?,
        });
        config.validate_fields()?;
        Ok(config)
    }

    fn read_scoring_definition(&self, values: &FormValues) -> Result<ScoringDefinition> {
        Ok(KprimScoringDefinition::create(read_bool(values, VAR_CORRECT)?))
    }
}
