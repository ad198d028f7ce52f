use serde_json::json;
use std::collections::HashSet;

use super::{configured_for, scoring_configuration, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, MatchingAnswer, MatchingPair};
use crate::models::configuration::{
    EditorConfiguration, MatchingEditorConfiguration, MatchingScoringConfiguration,
    ScoringConfiguration,
};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::ScoringDefinition;
use crate::utils::form::read_float;

pub const VAR_WRONG_DEDUCTION: &str = "ms_wrong_deduction";

/// Sums the points of the configured matches a learner drew; every
/// unconfigured pair costs the wrong deduction.
pub struct MatchingScoring;

impl MatchingScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a MatchingScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::Matching(c) => Some(c),
            _ => None,
        })
    }

    /// Matches are authored with the terms and definitions in the editor.
    fn editor_configuration<'a>(&self, question: &'a Question) -> Result<&'a MatchingEditorConfiguration> {
        match question.play_configuration().editor_configuration() {
            Some(EditorConfiguration::Matching(c)) => Ok(c),
            _ => Err(Error::InvalidState(
                "Question has no matching editor configuration".to_string(),
            )),
        }
    }
}

impl ScoringStrategy for MatchingScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::Matching
    }

    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::Matching(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;
        let editor = self.editor_configuration(question)?;

        // a pair drawn twice still counts once
        let mut seen = HashSet::new();
        let mut score = 0.0;
        let mut wrong = 0;
        for pair in answer.pairs.iter().filter(|p| seen.insert(*p)) {
            match editor.find_match(&pair.definition_id, &pair.term_id) {
                Some(mapping) => score += mapping.points,
                None => wrong += 1,
            }
        }
        Ok(score - wrong as f64 * config.wrong_deduction)
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        let editor = self.editor_configuration(question)?;
        let pairs = editor
            .matches
            .iter()
            .filter(|m| m.points > 0.0)
            .map(|m| MatchingPair {
                definition_id: m.definition_id.clone(),
                term_id: m.term_id.clone(),
            })
            .collect();
        Ok(Answer::Matching(MatchingAnswer { pairs }))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        let editor = self.editor_configuration(question)?;
        Ok(editor.matches.iter().map(|m| m.points).filter(|p| *p > 0.0).sum())
    }

    fn is_complete(&self, question: &Question) -> bool {
        let (Ok(_), Ok(editor)) = (self.configuration(question), self.editor_configuration(question)) else {
            return false;
        };
        editor.matches.iter().any(|m| m.points > 0.0)
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        Vec::new()
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let deduction = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::Matching(c)) => Some(json!(c.wrong_deduction)),
            _ => None,
        };
        vec![FieldDefinition::new("asq_label_wrong_deduction", FieldType::Number, VAR_WRONG_DEDUCTION)
            .with_value(deduction)]
    }

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        let wrong_deduction = match values.get(VAR_WRONG_DEDUCTION) {
            Some(_) => read_float(values, VAR_WRONG_DEDUCTION)?,
            None => 0.0,
        };
        let config = ScoringConfiguration::Matching(MatchingScoringConfiguration { wrong_deduction });
        config.validate_fields()?;
        Ok(config)
    }

    fn read_scoring_definition(&self, _values: &FormValues) -> Result<ScoringDefinition> {
        Ok(ScoringDefinition::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer_option::AnswerOptions;
    use crate::models::configuration::{MatchingItem, MatchingMapping};
    use crate::models::question::QuestionData;

    fn item(id: &str, text: &str) -> MatchingItem {
        MatchingItem { id: id.into(), text: text.into(), image: None }
    }

    fn mapping(definition_id: &str, term_id: &str, points: f64) -> MatchingMapping {
        MatchingMapping { definition_id: definition_id.into(), term_id: term_id.into(), points }
    }

    fn question(wrong_deduction: f64) -> Question {
        let editor = MatchingEditorConfiguration {
            definitions: vec![item("d1", "Capital of France"), item("d2", "Capital of Italy")],
            terms: vec![item("t1", "Paris"), item("t2", "Rome"), item("t3", "Madrid")],
            matches: vec![mapping("d1", "t1", 2.0), mapping("d2", "t2", 3.0)],
            ..Default::default()
        };
        Question::create(
            QuestionData::create("Capitals", "", "", "", 1).unwrap(),
            QuestionPlayConfiguration::create(
                Some(EditorConfiguration::Matching(editor)),
                Some(ScoringConfiguration::Matching(MatchingScoringConfiguration { wrong_deduction })),
                None,
            ),
            AnswerOptions::empty(),
        )
    }

    #[test]
    fn sums_configured_pairs_in_any_order() {
        let q = question(0.0);
        let forward = MatchingAnswer::create([("d1", "t1"), ("d2", "t2")]);
        let reversed = MatchingAnswer::create([("d2", "t2"), ("d1", "t1")]);
        assert_eq!(MatchingScoring.score(&q, &forward).unwrap(), 5.0);
        assert_eq!(MatchingScoring.score(&q, &reversed).unwrap(), 5.0);
        assert_eq!(MatchingScoring.max_score(&q).unwrap(), 5.0);
    }

    #[test]
    fn unconfigured_pair_scores_zero_or_deduction() {
        let answer = MatchingAnswer::create([("d1", "t1"), ("d2", "t3")]);
        assert_eq!(MatchingScoring.score(&question(0.0), &answer).unwrap(), 2.0);
        assert_eq!(MatchingScoring.score(&question(0.5), &answer).unwrap(), 1.5);
    }

    #[test]
    fn repeated_pairs_count_once() {
        let q = question(0.5);
        let repeated = MatchingAnswer::create([("d1", "t1"), ("d1", "t1"), ("d1", "t1")]);
        assert_eq!(MatchingScoring.score(&q, &repeated).unwrap(), 2.0);
        let repeated_wrong = MatchingAnswer::create([("d1", "t3"), ("d1", "t3")]);
        assert_eq!(MatchingScoring.score(&q, &repeated_wrong).unwrap(), -0.5);
        let all = MatchingAnswer::create([("d1", "t1"), ("d2", "t2"), ("d2", "t2"), ("d1", "t1")]);
        assert!(MatchingScoring.score(&q, &all).unwrap() <= MatchingScoring.max_score(&q).unwrap());
    }

    #[test]
    fn best_answer_reaches_max() {
        let q = question(1.0);
        let best = MatchingScoring.best_answer(&q).unwrap();
        assert_eq!(MatchingScoring.score(&q, &best).unwrap(), MatchingScoring.max_score(&q).unwrap());
        assert!(MatchingScoring.is_complete(&q));
    }
}
