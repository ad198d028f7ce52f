use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::answer::Answer;
use crate::models::configuration::{EssayScoringMode, ScoringConfiguration};
use crate::models::question::Question;
use crate::services::question_type_service::QuestionTypeService;
use crate::services::scoring::ScoringStrategy;

/// Scores answers through the strategy a question's play configuration
/// resolves to.
#[derive(Clone)]
pub struct ScoringService {
    question_types: Arc<QuestionTypeService>,
}

impl ScoringService {
    pub fn new(question_types: Arc<QuestionTypeService>) -> Self {
        Self { question_types }
    }

    fn strategy(&self, question: &Question) -> Result<&dyn ScoringStrategy> {
        self.question_types.scoring_for(question.play_configuration())
    }

    pub fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let strategy = self.strategy(question)?;
        let points = strategy.score(question, answer)?;
        debug!(question_id = %question.id, scoring = %strategy.kind(), points, "Scored answer");
        Ok(points)
    }

    pub fn max_score(&self, question: &Question) -> Result<f64> {
        self.strategy(question)?.max_score(question)
    }

    pub fn best_answer(&self, question: &Question) -> Result<Answer> {
        self.strategy(question)?.best_answer(question)
    }

    pub fn is_complete(&self, question: &Question) -> bool {
        self.question_types.is_complete(question)
    }

    /// Essays configured for manual scoring have to be graded by a person.
    pub fn requires_manual_scoring(question: &Question) -> bool {
        matches!(
            question.play_configuration().scoring_configuration(),
            Some(ScoringConfiguration::Essay(c)) if c.scoring_mode == EssayScoringMode::Manual
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::answer::{EssayAnswer, MultipleChoiceAnswer};
    use crate::models::answer_option::AnswerOptions;
    use crate::models::configuration::{EssayScoringConfiguration, TextMatching};
    use crate::models::play_configuration::QuestionPlayConfiguration;
    use crate::models::question::QuestionData;
    use crate::models::question_type::StrategyDefaults;

    fn service() -> ScoringService {
        ScoringService::new(Arc::new(QuestionTypeService::standard(StrategyDefaults::default()).unwrap()))
    }

    fn question(scoring: Option<ScoringConfiguration>) -> Question {
        Question::create(
            QuestionData::create("Q", "", "", "", 1).unwrap(),
            QuestionPlayConfiguration::create(None, scoring, None),
            AnswerOptions::empty(),
        )
    }

    #[test]
    fn missing_configuration_is_invalid_state() {
        let err = service()
            .score(&question(None), &MultipleChoiceAnswer::create(Vec::<String>::new()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn answer_of_another_type_is_unsupported() {
        let q = question(Some(EssayScoringConfiguration::create(
            TextMatching::CaseInsensitive,
            EssayScoringMode::AutomaticAll,
            1.0,
        )));
        let err = service()
            .score(&q, &MultipleChoiceAnswer::create(["1"]))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
        assert!(service().score(&q, &EssayAnswer::create("text")).is_ok());
    }

    #[test]
    fn detects_manual_essays() {
        let manual = question(Some(EssayScoringConfiguration::create(
            TextMatching::CaseInsensitive,
            EssayScoringMode::Manual,
            4.0,
        )));
        assert!(ScoringService::requires_manual_scoring(&manual));
        assert!(!ScoringService::requires_manual_scoring(&question(None)));
    }
}
