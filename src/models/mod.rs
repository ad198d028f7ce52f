pub mod answer;
pub mod answer_option;
pub mod configuration;
pub mod legacy;
pub mod play_configuration;
pub mod question;
pub mod question_type;
pub mod scoring_definition;
