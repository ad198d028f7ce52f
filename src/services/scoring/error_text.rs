use serde_json::json;

use super::{configured_for, scoring_configuration, scoring_definitions, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, ErrorTextAnswer};
use crate::models::answer_option::AnswerOption;
use crate::models::configuration::{ErrorTextScoringConfiguration, ScoringConfiguration};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::{ErrorTextScoringDefinition, ScoringDefinition};
use crate::utils::form::{read_float, read_optional_string, read_u32};

pub const VAR_POINTS_WRONG: &str = "ets_points_wrong";
pub const VAR_WORD_INDEX: &str = "etsd_word_index";
pub const VAR_WORD_LENGTH: &str = "etsd_word_length";
pub const VAR_CORRECT_TEXT: &str = "etsd_correct_text";
pub const VAR_POINTS: &str = "etsd_points";

/// Learners mark the wrong words of a text. Every answer option describes
/// one error as a run of word indexes.
pub struct ErrorTextScoring;

impl ErrorTextScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a ErrorTextScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::ErrorText(c) => Some(c),
            _ => None,
        })
    }

    fn definitions<'a>(&self, question: &'a Question) -> Result<Vec<(&'a AnswerOption, &'a ErrorTextScoringDefinition)>> {
        scoring_definitions(question, self.kind(), ScoringDefinition::as_error_text)
    }
}

impl ScoringStrategy for ErrorTextScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::ErrorText
    }

    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::ErrorText(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;
        let definitions = self.definitions(question)?;

        let hits: f64 = definitions
            .iter()
            .filter(|(_, d)| {
                !d.range().is_empty() && d.range().all(|i| answer.selected_word_indexes.contains(&i))
            })
            .map(|(_, d)| d.points)
            .sum();
        let stray = answer
            .selected_word_indexes
            .iter()
            .filter(|&&i| !definitions.iter().any(|(_, d)| d.range().contains(&i)))
            .count();
        Ok(hits - stray as f64 * config.points_wrong)
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        let definitions = self.definitions(question)?;
        Ok(ErrorTextAnswer::create(
            definitions.iter().flat_map(|(_, d)| d.range()),
        ))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        Ok(self.definitions(question)?.iter().map(|(_, d)| d.points).sum())
    }

    fn is_complete(&self, question: &Question) -> bool {
        let (Ok(_), Ok(definitions)) = (self.configuration(question), self.definitions(question)) else {
            return false;
        };
        !definitions.is_empty()
            && definitions
                .iter()
                .all(|(_, d)| d.points > 0.0 && d.range().len() == d.wrong_word_length && d.wrong_word_length >= 1)
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("asq_label_word_index", FieldType::Number, VAR_WORD_INDEX).required(),
            FieldDefinition::new("asq_label_word_length", FieldType::Number, VAR_WORD_LENGTH).required(),
            FieldDefinition::new("asq_label_correct_text", FieldType::Text, VAR_CORRECT_TEXT),
            FieldDefinition::new("asq_label_points", FieldType::Number, VAR_POINTS).required(),
        ]
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let points_wrong = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::ErrorText(c)) => Some(json!(c.points_wrong)),
            _ => None,
        };
        vec![FieldDefinition::new("asq_label_points_wrong", FieldType::Number, VAR_POINTS_WRONG)
            .with_value(points_wrong)]
    }

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        let points_wrong = match read_optional_string(values, VAR_POINTS_WRONG)? {
            Some(_) => read_float(values, VAR_POINTS_WRONG)?,
            None => 0.0,
        };
        let config = ScoringConfiguration::ErrorText(ErrorTextScoringConfiguration { points_wrong });
        config.validate_fields()?;
        Ok(config)
    }

    fn read_scoring_definition(&self, values: &FormValues) -> Result<ScoringDefinition> {
        Ok(ErrorTextScoringDefinition::create(
            read_u32(values, VAR_WORD_INDEX)? as usize,
            read_u32(values, VAR_WORD_LENGTH)? as usize,
            read_optional_string(values, VAR_CORRECT_TEXT)?.unwrap_or_default(),
            read_float(values, VAR_POINTS)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer_option::{AnswerOptions, DisplayDefinition};
    use crate::models::question::QuestionData;

    // "The cat sat in the hat and drinked milk" with "in the hat" and
    // "drinked" as errors.
    fn question(points_wrong: f64) -> Question {
        let options = vec![
            AnswerOption::create("1", DisplayDefinition::Empty, ErrorTextScoringDefinition::create(3, 3, "on the mat", 2.0)),
            AnswerOption::create("2", DisplayDefinition::Empty, ErrorTextScoringDefinition::create(7, 1, "drank", 1.0)),
        ];
        Question::create(
            QuestionData::create("Errors", "", "", "", 1).unwrap(),
            QuestionPlayConfiguration::create(
                None,
                Some(ScoringConfiguration::ErrorText(ErrorTextScoringConfiguration { points_wrong })),
                None,
            ),
            AnswerOptions::create(options).unwrap(),
        )
    }

    #[test]
    fn errors_count_only_when_fully_marked() {
        let q = question(0.0);
        assert_eq!(ErrorTextScoring.score(&q, &ErrorTextAnswer::create([3, 4, 5])).unwrap(), 2.0);
        assert_eq!(ErrorTextScoring.score(&q, &ErrorTextAnswer::create([3, 4])).unwrap(), 0.0);
        assert_eq!(ErrorTextScoring.score(&q, &ErrorTextAnswer::create([3, 4, 5, 7])).unwrap(), 3.0);
    }

    #[test]
    fn stray_marks_are_deducted() {
        let q = question(0.5);
        assert_eq!(ErrorTextScoring.score(&q, &ErrorTextAnswer::create([0, 7])).unwrap(), 0.5);
        assert_eq!(ErrorTextScoring.score(&q, &ErrorTextAnswer::create([0, 1])).unwrap(), -1.0);
    }

    #[test]
    fn best_answer_marks_every_error() {
        let q = question(1.0);
        let best = ErrorTextScoring.best_answer(&q).unwrap();
        assert_eq!(best, ErrorTextAnswer::create([3, 4, 5, 7]));
        assert_eq!(ErrorTextScoring.score(&q, &best).unwrap(), 3.0);
        assert_eq!(ErrorTextScoring.max_score(&q).unwrap(), 3.0);
        assert!(ErrorTextScoring.is_complete(&q));
    }

    #[test]
    fn overflowing_ranges_never_hit() {
        let options = vec![AnswerOption::create(
            "1",
            DisplayDefinition::Empty,
            ErrorTextScoringDefinition::create(usize::MAX, 1, "", 1.0),
        )];
        let q = Question::create(
            QuestionData::create("Errors", "", "", "", 1).unwrap(),
            QuestionPlayConfiguration::create(
                None,
                Some(ScoringConfiguration::ErrorText(ErrorTextScoringConfiguration { points_wrong: 0.5 })),
                None,
            ),
            AnswerOptions::create(options).unwrap(),
        );
        assert_eq!(ErrorTextScoring.score(&q, &ErrorTextAnswer::create([usize::MAX])).unwrap(), -0.5);
        assert_eq!(ErrorTextScoring.score(&q, &ErrorTextAnswer::create(Vec::new())).unwrap(), 0.0);
        assert!(!ErrorTextScoring.is_complete(&q));
    }
}
