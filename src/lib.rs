pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    grading_service::GradingService, question_type_service::QuestionTypeService,
    scoring_service::ScoringService,
};

#[derive(Clone)]
pub struct AppState {
    pub question_types: Arc<QuestionTypeService>,
    pub scoring_service: ScoringService,
    pub grading_service: GradingService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let question_types = Arc::new(QuestionTypeService::standard(config.strategy_defaults())?);
        let scoring_service = ScoringService::new(question_types.clone());
        let grading_service = GradingService::new(scoring_service.clone(), config.passing_percentage);

        Ok(Self {
            question_types,
            scoring_service,
            grading_service,
        })
    }
}
