use serde::{Deserialize, Serialize};

/// Per-option grading data. The variant is fixed by the question type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoringDefinition {
    MultipleChoice(MultipleChoiceScoringDefinition),
    Kprim(KprimScoringDefinition),
    Essay(EssayScoringDefinition),
    TextSubset(TextSubsetScoringDefinition),
    ErrorText(ErrorTextScoringDefinition),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoiceScoringDefinition {
    pub points_if_checked: f64,
    pub points_if_unchecked: f64,
}

impl MultipleChoiceScoringDefinition {
    pub fn create(points_if_checked: f64, points_if_unchecked: f64) -> ScoringDefinition {
        ScoringDefinition::MultipleChoice(Self {
            points_if_checked,
            points_if_unchecked,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KprimScoringDefinition {
    pub correct_value: bool,
}

impl KprimScoringDefinition {
    pub fn create(correct_value: bool) -> ScoringDefinition {
        ScoringDefinition::Kprim(Self { correct_value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssayScoringDefinition {
    pub text: String,
    #[serde(default)]
    pub points: f64,
}

impl EssayScoringDefinition {
    pub fn create(text: impl Into<String>, points: f64) -> ScoringDefinition {
        ScoringDefinition::Essay(Self {
            text: text.into(),
            points,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSubsetScoringDefinition {
    pub text: String,
    pub points: f64,
}

impl TextSubsetScoringDefinition {
    pub fn create(text: impl Into<String>, points: f64) -> ScoringDefinition {
        ScoringDefinition::TextSubset(Self {
            text: text.into(),
            points,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorTextScoringDefinition {
    pub wrong_word_index: usize,
    pub wrong_word_length: usize,
    #[serde(default)]
    pub correct_text: String,
    pub points: f64,
}

impl ErrorTextScoringDefinition {
    pub fn create(
        wrong_word_index: usize,
        wrong_word_length: usize,
        correct_text: impl Into<String>,
        points: f64,
    ) -> ScoringDefinition {
        ScoringDefinition::ErrorText(Self {
            wrong_word_index,
            wrong_word_length,
            correct_text: correct_text.into(),
            points,
        })
    }

    /// Word indexes covered by this error, clipped at `usize::MAX`.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.wrong_word_index..self.wrong_word_index.saturating_add(self.wrong_word_length)
    }
}

impl ScoringDefinition {
    pub fn as_multiple_choice(&self) -> Option<&MultipleChoiceScoringDefinition> {
        match self {
            ScoringDefinition::MultipleChoice(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_kprim(&self) -> Option<&KprimScoringDefinition> {
        match self {
            ScoringDefinition::Kprim(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_essay(&self) -> Option<&EssayScoringDefinition> {
        match self {
            ScoringDefinition::Essay(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_text_subset(&self) -> Option<&TextSubsetScoringDefinition> {
        match self {
            ScoringDefinition::TextSubset(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_error_text(&self) -> Option<&ErrorTextScoringDefinition> {
        match self {
            ScoringDefinition::ErrorText(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kprim_definition_reads_plain_record() {
        let record = serde_json::json!({ "type": "kprim", "correct_value": true });
        let definition: ScoringDefinition = serde_json::from_value(record).unwrap();
        assert_eq!(definition.as_kprim().map(|d| d.correct_value), Some(true));
    }

    #[test]
    fn error_text_range_covers_length() {
        let definition = ErrorTextScoringDefinition {
            wrong_word_index: 3,
            wrong_word_length: 2,
            correct_text: "the house".into(),
            points: 1.0,
        };
        assert_eq!(definition.range().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn error_text_range_saturates() {
        let definition = ErrorTextScoringDefinition {
            wrong_word_index: usize::MAX,
            wrong_word_length: 1,
            correct_text: String::new(),
            points: 1.0,
        };
        assert!(definition.range().is_empty());
    }
}
