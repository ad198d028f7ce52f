use serde_json::json;

use super::{configured_for, scoring_configuration, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, OrderingAnswer};
use crate::models::configuration::{OrderingScoringConfiguration, ScoringConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::ScoringDefinition;
use crate::utils::form::read_float;

pub const VAR_POINTS: &str = "os_points";

/// All or nothing: the answer options are authored in their correct order.
pub struct OrderingScoring;

impl OrderingScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a OrderingScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::Ordering(c) => Some(c),
            _ => None,
        })
    }
}

impl ScoringStrategy for OrderingScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::Ordering
    }

    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::Ordering(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;
        let options = question.answer_options().options();

        let in_order = answer.selected_order.len() == options.len()
            && answer
                .selected_order
                .iter()
                .zip(options)
                .all(|(id, option)| id == option.id());
        Ok(if in_order { config.points } else { 0.0 })
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        Ok(OrderingAnswer::create(
            question.answer_options().options().iter().map(|o| o.id()),
        ))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        Ok(self.configuration(question)?.points)
    }

    fn is_complete(&self, question: &Question) -> bool {
        self.configuration(question).map_or(false, |c| c.points > 0.0)
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        Vec::new()
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let points = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::Ordering(c)) => Some(json!(c.points)),
            _ => None,
        };
        vec![FieldDefinition::new("asq_label_points", FieldType::Number, VAR_POINTS)
            .required()
            .with_value(points)]
    }

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        let config = ScoringConfiguration::Ordering(OrderingScoringConfiguration {
            points: read_float(values, VAR_POINTS)?,
        });
        config.validate_fields()?;
        Ok(config)
    }

    fn read_scoring_definition(&self, _values: &FormValues) -> Result<ScoringDefinition> {
        Ok(ScoringDefinition::Empty)
    }
}
