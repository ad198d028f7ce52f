use chrono::Utc;
use tracing::{info, warn};

use crate::dto::grading_dto::{GradeReport, GradedAnswer, GradingBatch};
use crate::error::{Error, Result};
use crate::models::answer::Answer;
use crate::models::configuration::ScoringConfiguration;
use crate::models::question::Question;
use crate::services::scoring_service::ScoringService;
use crate::utils::validation::validate;

/// Grades whole tests. Every question is scored on its own, so one failing
/// question never aborts the batch.
#[derive(Clone)]
pub struct GradingService {
    scoring_service: ScoringService,
    passing_percentage: f64,
}

impl GradingService {
    pub fn new(scoring_service: ScoringService, passing_percentage: f64) -> Self {
        Self {
            scoring_service,
            passing_percentage,
        }
    }

    pub fn grade(&self, batch: &GradingBatch) -> Result<GradeReport> {
        validate(batch)?;
        for question in &batch.questions {
            validate(&question.data)?;
        }
        if let Some(orphan) = batch
            .answers
            .iter()
            .find(|a| !batch.questions.iter().any(|q| q.id == a.question_id))
        {
            return Err(Error::Validation(format!(
                "Answer given for unknown question {}",
                orphan.question_id
            )));
        }

        let items: Vec<GradedAnswer> = batch
            .questions
            .iter()
            .map(|question| {
                let answer = batch
                    .answers
                    .iter()
                    .find(|a| a.question_id == question.id)
                    .map(|a| &a.answer);
                self.grade_question(question, answer)
            })
            .collect();

        let earned: f64 = items.iter().map(|i| i.points_earned).sum();
        let max: f64 = items.iter().map(|i| i.max_points).sum();
        let percentage = if max > 0.0 { earned / max * 100.0 } else { 0.0 };
        let needs_review = items.iter().any(|i| i.needs_review);

        info!(
            questions = items.len(),
            earned,
            max,
            needs_review,
            "Graded batch"
        );

        Ok(GradeReport {
            earned,
            max,
            percentage,
            passed: percentage >= self.passing_percentage,
            needs_review,
            items,
            graded_at: Utc::now(),
        })
    }

    pub fn grade_question(&self, question: &Question, answer: Option<&Answer>) -> GradedAnswer {
        let mut graded = GradedAnswer {
            question_id: question.id,
            title: question.data.title.clone(),
            answered: answer.is_some(),
            points_earned: 0.0,
            max_points: 0.0,
            needs_review: false,
            error: None,
        };

        if ScoringService::requires_manual_scoring(question) {
            if let Some(ScoringConfiguration::Essay(c)) = question.play_configuration().scoring_configuration() {
                graded.max_points = c.points;
            }
            graded.needs_review = answer.is_some();
            return graded;
        }

        match self.scoring_service.max_score(question) {
            Ok(max) => graded.max_points = max,
            Err(e) => {
                warn!(question_id = %question.id, error = %e, "Could not compute max score");
                graded.error = Some(e.to_string());
                return graded;
            }
        }

        if let Some(answer) = answer {
            match self.scoring_service.score(question, answer) {
                Ok(points) => graded.points_earned = points,
                Err(e) => {
                    warn!(question_id = %question.id, error = %e, "Could not score answer");
                    graded.error = Some(e.to_string());
                }
            }
        }
        graded
    }
}
