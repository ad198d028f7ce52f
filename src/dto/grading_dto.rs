use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::answer::Answer;
use crate::models::question::Question;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    pub answer: Answer,
}

/// Questions of one test together with a learner's answers, matched by
/// question id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GradingBatch {
    #[validate(length(min = 1))]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question_id: Uuid,
    pub title: String,
    pub answered: bool,
    pub points_earned: f64,
    pub max_points: f64,
    #[serde(default)]
    pub needs_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    pub earned: f64,
    pub max: f64,
    pub percentage: f64,
    pub passed: bool,
    pub needs_review: bool,
    pub items: Vec<GradedAnswer>,
    pub graded_at: DateTime<Utc>,
}
