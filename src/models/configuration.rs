use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::question_type::{EditorKind, PresenterKind, ScoringKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorConfiguration {
    MultipleChoice(MultipleChoiceEditorConfiguration),
    Kprim(KprimEditorConfiguration),
    Essay(EssayEditorConfiguration),
    Matching(MatchingEditorConfiguration),
    Numeric(NumericEditorConfiguration),
    TextSubset(TextSubsetEditorConfiguration),
    Ordering(OrderingEditorConfiguration),
    ErrorText(ErrorTextEditorConfiguration),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoringConfiguration {
    MultipleChoice(MultipleChoiceScoringConfiguration),
    Kprim(KprimScoringConfiguration),
    Essay(EssayScoringConfiguration),
    Matching(MatchingScoringConfiguration),
    Numeric(NumericScoringConfiguration),
    TextSubset(TextSubsetScoringConfiguration),
    Ordering(OrderingScoringConfiguration),
    ErrorText(ErrorTextScoringConfiguration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresenterConfiguration {
    Default,
    Tabs,
}

// ---- editor configurations ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MultipleChoiceEditorConfiguration {
    #[serde(default)]
    pub shuffle_answers: bool,
    #[validate(range(min = 1))]
    pub thumbnail_size: Option<u32>,
    #[serde(default)]
    pub single_line: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct KprimEditorConfiguration {
    #[serde(default)]
    pub shuffle_answers: bool,
    #[validate(range(min = 1))]
    pub thumbnail_size: Option<u32>,
    #[validate(length(min = 1))]
    pub label_true: String,
    #[validate(length(min = 1))]
    pub label_false: String,
}

impl Default for KprimEditorConfiguration {
    fn default() -> Self {
        Self {
            shuffle_answers: false,
            thumbnail_size: None,
            label_true: "asq_label_right".to_string(),
            label_false: "asq_label_wrong".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EssayEditorConfiguration {
    #[validate(range(min = 1))]
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingShuffle {
    #[default]
    None,
    Definitions,
    Terms,
    Both,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    #[default]
    OneToOne,
    ManyToOne,
    ManyToMany,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingMapping {
    pub definition_id: String,
    pub term_id: String,
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MatchingEditorConfiguration {
    #[serde(default)]
    pub shuffle: MatchingShuffle,
    #[validate(range(min = 1))]
    pub thumbnail_size: Option<u32>,
    #[serde(default)]
    pub matching_mode: MatchingMode,
    #[serde(default)]
    pub definitions: Vec<MatchingItem>,
    #[serde(default)]
    pub terms: Vec<MatchingItem>,
    #[serde(default)]
    pub matches: Vec<MatchingMapping>,
}

impl MatchingEditorConfiguration {
    pub fn find_match(&self, definition_id: &str, term_id: &str) -> Option<&MatchingMapping> {
        self.matches
            .iter()
            .find(|m| m.definition_id == definition_id && m.term_id == term_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NumericEditorConfiguration {
    #[validate(range(min = 1))]
    pub max_num_of_chars: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TextSubsetEditorConfiguration {
    #[validate(range(min = 1))]
    pub number_of_requested_answers: u32,
}

impl Default for TextSubsetEditorConfiguration {
    fn default() -> Self {
        Self {
            number_of_requested_answers: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrderingEditorConfiguration {
    #[serde(default)]
    pub vertical: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ErrorTextEditorConfiguration {
    pub error_text: String,
    #[validate(range(min = 1))]
    pub text_size: Option<u32>,
}

// ---- scoring configurations ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MultipleChoiceScoringConfiguration {
    #[validate(range(min = 1))]
    pub max_answers: u32,
}

impl MultipleChoiceScoringConfiguration {
    pub fn create(max_answers: u32) -> ScoringConfiguration {
        ScoringConfiguration::MultipleChoice(Self { max_answers })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct KprimScoringConfiguration {
    #[validate(range(min = 0.0))]
    pub points: f64,
    pub half_points_at: Option<u32>,
}

/// Case handling and allowed edit distance when comparing learner text
/// against a reference text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatching {
    CaseInsensitive,
    CaseSensitive,
    Levenshtein1,
    Levenshtein2,
    Levenshtein3,
    Levenshtein4,
    Levenshtein5,
}

impl TextMatching {
    pub const ALL: [TextMatching; 7] = [
        TextMatching::CaseInsensitive,
        TextMatching::CaseSensitive,
        TextMatching::Levenshtein1,
        TextMatching::Levenshtein2,
        TextMatching::Levenshtein3,
        TextMatching::Levenshtein4,
        TextMatching::Levenshtein5,
    ];

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(TextMatching::CaseInsensitive),
            2 => Ok(TextMatching::CaseSensitive),
            3 => Ok(TextMatching::Levenshtein1),
            4 => Ok(TextMatching::Levenshtein2),
            5 => Ok(TextMatching::Levenshtein3),
            6 => Ok(TextMatching::Levenshtein4),
            7 => Ok(TextMatching::Levenshtein5),
            other => Err(Error::Validation(format!("Unknown text matching mode {}", other))),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            TextMatching::CaseInsensitive => 1,
            TextMatching::CaseSensitive => 2,
            TextMatching::Levenshtein1 => 3,
            TextMatching::Levenshtein2 => 4,
            TextMatching::Levenshtein3 => 5,
            TextMatching::Levenshtein4 => 6,
            TextMatching::Levenshtein5 => 7,
        }
    }

    pub fn max_distance(&self) -> usize {
        match self {
            TextMatching::Levenshtein1 => 1,
            TextMatching::Levenshtein2 => 2,
            TextMatching::Levenshtein3 => 3,
            TextMatching::Levenshtein4 => 4,
            TextMatching::Levenshtein5 => 5,
            TextMatching::CaseInsensitive | TextMatching::CaseSensitive => 0,
        }
    }

    pub fn is_case_insensitive(&self) -> bool {
        matches!(self, TextMatching::CaseInsensitive)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextMatching::CaseInsensitive => "asq_option_case_insensitive",
            TextMatching::CaseSensitive => "asq_option_case_sensitive",
            TextMatching::Levenshtein1 => "asq_option_levenshtein_1",
            TextMatching::Levenshtein2 => "asq_option_levenshtein_2",
            TextMatching::Levenshtein3 => "asq_option_levenshtein_3",
            TextMatching::Levenshtein4 => "asq_option_levenshtein_4",
            TextMatching::Levenshtein5 => "asq_option_levenshtein_5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EssayScoringMode {
    Manual,
    AutomaticAny,
    AutomaticAll,
    AutomaticOne,
}

impl EssayScoringMode {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(EssayScoringMode::Manual),
            2 => Ok(EssayScoringMode::AutomaticAny),
            3 => Ok(EssayScoringMode::AutomaticAll),
            4 => Ok(EssayScoringMode::AutomaticOne),
            other => Err(Error::Validation(format!("Unknown essay scoring mode {}", other))),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            EssayScoringMode::Manual => 1,
            EssayScoringMode::AutomaticAny => 2,
            EssayScoringMode::AutomaticAll => 3,
            EssayScoringMode::AutomaticOne => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EssayScoringConfiguration {
    pub matching_mode: TextMatching,
    pub scoring_mode: EssayScoringMode,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub points: f64,
}

impl EssayScoringConfiguration {
    pub fn create(
        matching_mode: TextMatching,
        scoring_mode: EssayScoringMode,
        points: f64,
    ) -> ScoringConfiguration {
        ScoringConfiguration::Essay(Self {
            matching_mode,
            scoring_mode,
            points,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MatchingScoringConfiguration {
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub wrong_deduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NumericScoringConfiguration {
    #[validate(range(min = 0.0))]
    pub points: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TextSubsetScoringConfiguration {
    pub text_matching: TextMatching,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrderingScoringConfiguration {
    #[validate(range(min = 0.0))]
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ErrorTextScoringConfiguration {
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub points_wrong: f64,
}

impl EditorConfiguration {
    pub fn validate_fields(&self) -> Result<()> {
        match self {
            EditorConfiguration::MultipleChoice(c) => c.validate()?,
            EditorConfiguration::Kprim(c) => c.validate()?,
            EditorConfiguration::Essay(c) => c.validate()?,
            EditorConfiguration::Matching(c) => c.validate()?,
            EditorConfiguration::Numeric(c) => c.validate()?,
            EditorConfiguration::TextSubset(c) => c.validate()?,
            EditorConfiguration::Ordering(c) => c.validate()?,
            EditorConfiguration::ErrorText(c) => c.validate()?,
        }
        Ok(())
    }
}

impl ScoringConfiguration {
    pub fn validate_fields(&self) -> Result<()> {
        match self {
            ScoringConfiguration::MultipleChoice(c) => c.validate()?,
            ScoringConfiguration::Kprim(c) => c.validate()?,
            ScoringConfiguration::Essay(c) => c.validate()?,
            ScoringConfiguration::Matching(c) => c.validate()?,
            ScoringConfiguration::Numeric(c) => c.validate()?,
            ScoringConfiguration::TextSubset(c) => c.validate()?,
            ScoringConfiguration::Ordering(c) => c.validate()?,
            ScoringConfiguration::ErrorText(c) => c.validate()?,
        }
        Ok(())
    }
}

/// Names the strategy a configuration is written for.
pub trait ConfigurationFor {
    type Kind: Copy;

    fn configuration_for(&self) -> Self::Kind;
}

impl ConfigurationFor for EditorConfiguration {
    type Kind = EditorKind;

    fn configuration_for(&self) -> EditorKind {
        match self {
            EditorConfiguration::MultipleChoice(_) => EditorKind::MultipleChoice,
            EditorConfiguration::Kprim(_) => EditorKind::Kprim,
            EditorConfiguration::Essay(_) => EditorKind::Essay,
            EditorConfiguration::Matching(_) => EditorKind::Matching,
            EditorConfiguration::Numeric(_) => EditorKind::Numeric,
            EditorConfiguration::TextSubset(_) => EditorKind::TextSubset,
            EditorConfiguration::Ordering(_) => EditorKind::Ordering,
            EditorConfiguration::ErrorText(_) => EditorKind::ErrorText,
        }
    }
}

impl ConfigurationFor for ScoringConfiguration {
    type Kind = ScoringKind;

    fn configuration_for(&self) -> ScoringKind {
        match self {
            ScoringConfiguration::MultipleChoice(_) => ScoringKind::MultipleChoice,
            ScoringConfiguration::Kprim(_) => ScoringKind::Kprim,
            ScoringConfiguration::Essay(_) => ScoringKind::Essay,
            ScoringConfiguration::Matching(_) => ScoringKind::Matching,
            ScoringConfiguration::Numeric(_) => ScoringKind::Numeric,
            ScoringConfiguration::TextSubset(_) => ScoringKind::TextSubset,
            ScoringConfiguration::Ordering(_) => ScoringKind::Ordering,
            ScoringConfiguration::ErrorText(_) => ScoringKind::ErrorText,
        }
    }
}

impl ConfigurationFor for PresenterConfiguration {
    type Kind = PresenterKind;

    fn configuration_for(&self) -> PresenterKind {
        match self {
            PresenterConfiguration::Default => PresenterKind::Default,
            PresenterConfiguration::Tabs => PresenterKind::Tabs,
        }
    }
}
