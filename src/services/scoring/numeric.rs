use serde_json::json;

use super::{configured_for, scoring_configuration, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, NumericAnswer};
use crate::models::configuration::{NumericScoringConfiguration, ScoringConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::ScoringDefinition;
use crate::utils::form::read_float;

pub const VAR_POINTS: &str = "ns_points";
pub const VAR_LOWER_BOUND: &str = "ns_lower_bound";
pub const VAR_UPPER_BOUND: &str = "ns_upper_bound";

pub struct NumericScoring;

impl NumericScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a NumericScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::Numeric(c) => Some(c),
            _ => None,
        })
    }
}

impl ScoringStrategy for NumericScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::Numeric
    }

    /// Bounds are inclusive.
    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::Numeric(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;
        if (config.lower_bound..=config.upper_bound).contains(&answer.value) {
            Ok(config.points)
        } else {
            Ok(0.0)
        }
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        let config = self.configuration(question)?;
        Ok(NumericAnswer::create((config.lower_bound + config.upper_bound) / 2.0))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        Ok(self.configuration(question)?.points)
    }

    fn is_complete(&self, question: &Question) -> bool {
        match self.configuration(question) {
            Ok(config) => config.points > 0.0 && config.lower_bound <= config.upper_bound,
            Err(_) => false,
        }
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        Vec::new()
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let config = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::Numeric(c)) => Some(c),
            _ => None,
        };
        vec![
            FieldDefinition::new("asq_label_points", FieldType::Number, VAR_POINTS)
                .required()
                .with_value(config.map(|c| json!(c.points))),
            FieldDefinition::new("asq_label_lower_bound", FieldType::Number, VAR_LOWER_BOUND)
                .required()
                .with_value(config.map(|c| json!(c.lower_bound))),
            FieldDefinition::new("asq_label_upper_bound", FieldType::Number, VAR_UPPER_BOUND)
                .required()
                .with_value(config.map(|c| json!(c.upper_bound))),
        ]
    }

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        let config = ScoringConfiguration::Numeric(NumericScoringConfiguration {
            points: read_float(values, VAR_POINTS)?,
            lower_bound: read_float(values, VAR_LOWER_BOUND)?,
            upper_bound: read_float(values, VAR_UPPER_BOUND)?,
        });
        config.validate_fields()?;
        Ok(config)
    }

    fn read_scoring_definition(&self, _values: &FormValues) -> Result<ScoringDefinition> {
        Ok(ScoringDefinition::Empty)
    }
}
