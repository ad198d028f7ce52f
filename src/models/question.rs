use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::answer_option::AnswerOptions;
use crate::models::legacy::QuestionLegacyData;
use crate::models::play_configuration::QuestionPlayConfiguration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionData {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub working_time: u32,
}

impl QuestionData {
    pub fn create(
        title: impl Into<String>,
        text: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
        working_time: u32,
    ) -> Result<Self> {
        let data = Self {
            title: title.into(),
            text: text.into(),
            author: author.into(),
            description: description.into(),
            working_time,
        };
        data.validate()?;
        Ok(data)
    }
}

/// One question revision as handed to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub data: QuestionData,
    #[serde(default)]
    pub play_configuration: QuestionPlayConfiguration,
    #[serde(default)]
    pub answer_options: AnswerOptions,
    #[serde(default)]
    pub legacy_data: Option<QuestionLegacyData>,
}

impl Question {
    pub fn create(
        data: QuestionData,
        play_configuration: QuestionPlayConfiguration,
        answer_options: AnswerOptions,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
            play_configuration,
            answer_options,
            legacy_data: None,
        }
    }

    pub fn with_legacy_data(mut self, legacy_data: QuestionLegacyData) -> Self {
        self.legacy_data = Some(legacy_data);
        self
    }

    pub fn get_id(&self) -> String {
        self.id.to_string()
    }

    pub fn play_configuration(&self) -> &QuestionPlayConfiguration {
        &self.play_configuration
    }

    pub fn answer_options(&self) -> &AnswerOptions {
        &self.answer_options
    }
}
