use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Answer type id carried by question revisions created before question
/// types were registered by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionLegacyData {
    pub answer_type_id: u32,
}

impl QuestionLegacyData {
    pub const TYPE_GENERIC: u32 = 0;
    pub const TYPE_SINGLE_CHOICE: u32 = 1;
    pub const TYPE_MULTIPLE_CHOICE: u32 = 2;
    pub const TYPE_KPRIM_CHOICE: u32 = 16;

    pub fn create(answer_type_id: u32) -> Self {
        Self { answer_type_id }
    }

    /// Legacy ids with the language key of their label.
    pub fn question_types() -> [(u32, &'static str); 4] {
        [
            (Self::TYPE_GENERIC, "asq_question_generic"),
            (Self::TYPE_SINGLE_CHOICE, "asq_question_single_answer"),
            (Self::TYPE_MULTIPLE_CHOICE, "asq_question_multiple_answer"),
            (Self::TYPE_KPRIM_CHOICE, "asq_question_kprim_answer"),
        ]
    }

    /// Registry key the legacy id loads as.
    pub fn question_type_key(&self) -> Result<&'static str> {
        match self.answer_type_id {
            Self::TYPE_SINGLE_CHOICE => Ok("single_choice"),
            Self::TYPE_MULTIPLE_CHOICE => Ok("multiple_choice"),
            Self::TYPE_KPRIM_CHOICE => Ok("kprim"),
            other => Err(Error::UnsupportedType(format!(
                "No question type for legacy answer type id {}",
                other
            ))),
        }
    }
}
