use serde_json::json;

use super::{configured_for, scoring_configuration, scoring_definitions, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldOption, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, EssayAnswer};
use crate::models::answer_option::AnswerOption;
use crate::models::configuration::{
    EssayScoringConfiguration, EssayScoringMode, ScoringConfiguration, TextMatching,
};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::{EssayScoringDefinition, ScoringDefinition};
use crate::utils::form::{read_float, read_int, read_optional_string, read_string};
use crate::utils::text::{contains_words, normalize_words};

pub const VAR_TEXT_MATCHING: &str = "es_text_matching";
pub const VAR_SCORING_MODE: &str = "es_scoring_mode";
pub const VAR_POINTS: &str = "es_points";
pub const VAR_TEXT: &str = "esd_text";
pub const VAR_OPTION_POINTS: &str = "esd_points";

/// Automatic essay scoring by searching the submitted text for the
/// reference phrases of the answer options.
pub struct EssayScoring;

impl EssayScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a EssayScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::Essay(c) => Some(c),
            _ => None,
        })
    }

    fn definitions<'a>(&self, question: &'a Question) -> Result<Vec<(&'a AnswerOption, &'a EssayScoringDefinition)>> {
        scoring_definitions(question, self.kind(), ScoringDefinition::as_essay)
    }
}

impl ScoringStrategy for EssayScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::Essay
    }

    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::Essay(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;
        if config.scoring_mode == EssayScoringMode::Manual {
            return Err(Error::InvalidState(
                "Manually scored essays cannot be scored automatically".to_string(),
            ));
        }

        let case_insensitive = config.matching_mode.is_case_insensitive();
        let max_distance = config.matching_mode.max_distance();
        let words = normalize_words(&answer.text, case_insensitive);

        let mut points = 0.0;
        for (_, definition) in self.definitions(question)? {
            let expected = normalize_words(&definition.text, case_insensitive);
            let found = contains_words(&words, &expected, max_distance);

            match config.scoring_mode {
                EssayScoringMode::AutomaticOne if found => return Ok(config.points),
                EssayScoringMode::AutomaticAll if !found => return Ok(0.0),
                EssayScoringMode::AutomaticAny if found => points += definition.points,
                _ => {}
            }
        }

        Ok(match config.scoring_mode {
            EssayScoringMode::AutomaticAll => config.points,
            EssayScoringMode::AutomaticAny => points,
            _ => 0.0,
        })
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        let text = self
            .definitions(question)?
            .iter()
            .map(|(_, d)| d.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(EssayAnswer::create(text))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        let config = self.configuration(question)?;
        if config.scoring_mode == EssayScoringMode::AutomaticAny {
            Ok(self.definitions(question)?.iter().map(|(_, d)| d.points).sum())
        } else {
            Ok(config.points)
        }
    }

    fn is_complete(&self, question: &Question) -> bool {
        let Ok(config) = self.configuration(question) else {
            return false;
        };
        if config.scoring_mode == EssayScoringMode::Manual {
            return true;
        }
        let Ok(definitions) = self.definitions(question) else {
            return false;
        };
        !definitions.is_empty()
            && definitions.iter().all(|(_, d)| {
                !normalize_words(&d.text, false).is_empty()
                    && (config.scoring_mode != EssayScoringMode::AutomaticAny || d.points > 0.0)
            })
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("asq_label_answer_text", FieldType::Text, VAR_TEXT).required(),
            FieldDefinition::new("asq_label_points", FieldType::Number, VAR_OPTION_POINTS),
        ]
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let config = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::Essay(c)) => Some(c),
            _ => None,
        };

        let matching_options = TextMatching::ALL
            .iter()
            .map(|m| FieldOption::new(m.label(), m.code()))
            .collect();
        let scoring_options = vec![
            FieldOption::new("asq_label_manual_scoring", EssayScoringMode::Manual.code()),
            FieldOption::new("asq_label_automatic_any", EssayScoringMode::AutomaticAny.code()),
            FieldOption::new("asq_label_automatic_all", EssayScoringMode::AutomaticAll.code()),
            FieldOption::new("asq_label_automatic_one", EssayScoringMode::AutomaticOne.code()),
        ];

        vec![
            FieldDefinition::new("asq_label_text_matching", FieldType::Select, VAR_TEXT_MATCHING)
                .required()
                .with_options(matching_options)
                .with_value(config.map(|c| json!(c.matching_mode.code()))),
            FieldDefinition::new("asq_label_scoring_mode", FieldType::Radio, VAR_SCORING_MODE)
                .required()
                .with_options(scoring_options)
                .with_value(config.map(|c| json!(c.scoring_mode.code()))),
            FieldDefinition::new("asq_label_points", FieldType::Number, VAR_POINTS)
                .with_value(config.map(|c| json!(c.points))),
        ]
    }

    /// Flat points are only read for the all/one modes; any-mode points
    /// come from the answer options.
    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        let scoring_mode = EssayScoringMode::from_code(read_int(values, VAR_SCORING_MODE)?)?;
        let points = match scoring_mode {
            EssayScoringMode::AutomaticAll | EssayScoringMode::AutomaticOne => read_float(values, VAR_POINTS)?,
            _ => 0.0,
        };
        let config = EssayScoringConfiguration::create(
            TextMatching::from_code(read_int(values, VAR_TEXT_MATCHING)?)?,
            scoring_mode,
            points,
        );
        config.validate_fields()?;
        Ok(config)
    }

    fn read_scoring_definition(&self, values: &FormValues) -> Result<ScoringDefinition> {
        let points = match read_optional_string(values, VAR_OPTION_POINTS)? {
            Some(_) => read_float(values, VAR_OPTION_POINTS)?,
            None => 0.0,
        };
        Ok(EssayScoringDefinition::create(read_string(values, VAR_TEXT)?, points))
    }
}
