pub mod editors;
pub mod grading_service;
pub mod question_type_service;
pub mod scoring;
pub mod scoring_service;
