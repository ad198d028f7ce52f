pub mod form_dto;
pub mod grading_dto;
