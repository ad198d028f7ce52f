use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKind {
    MultipleChoice,
    Kprim,
    Essay,
    Matching,
    Numeric,
    TextSubset,
    Ordering,
    ErrorText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringKind {
    MultipleChoice,
    Kprim,
    Essay,
    Matching,
    Numeric,
    TextSubset,
    Ordering,
    ErrorText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenterKind {
    Default,
    Tabs,
}

impl EditorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorKind::MultipleChoice => "multiple_choice",
            EditorKind::Kprim => "kprim",
            EditorKind::Essay => "essay",
            EditorKind::Matching => "matching",
            EditorKind::Numeric => "numeric",
            EditorKind::TextSubset => "text_subset",
            EditorKind::Ordering => "ordering",
            EditorKind::ErrorText => "error_text",
        }
    }
}

impl ScoringKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringKind::MultipleChoice => "multiple_choice",
            ScoringKind::Kprim => "kprim",
            ScoringKind::Essay => "essay",
            ScoringKind::Matching => "matching",
            ScoringKind::Numeric => "numeric",
            ScoringKind::TextSubset => "text_subset",
            ScoringKind::Ordering => "ordering",
            ScoringKind::ErrorText => "error_text",
        }
    }
}

impl PresenterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenterKind::Default => "default",
            PresenterKind::Tabs => "tabs",
        }
    }
}

impl FromStr for EditorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(EditorKind::MultipleChoice),
            "kprim" => Ok(EditorKind::Kprim),
            "essay" => Ok(EditorKind::Essay),
            "matching" => Ok(EditorKind::Matching),
            "numeric" => Ok(EditorKind::Numeric),
            "text_subset" => Ok(EditorKind::TextSubset),
            "ordering" => Ok(EditorKind::Ordering),
            "error_text" => Ok(EditorKind::ErrorText),
            other => Err(Error::UnsupportedType(format!("Unknown editor \"{}\"", other))),
        }
    }
}

impl FromStr for ScoringKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(ScoringKind::MultipleChoice),
            "kprim" => Ok(ScoringKind::Kprim),
            "essay" => Ok(ScoringKind::Essay),
            "matching" => Ok(ScoringKind::Matching),
            "numeric" => Ok(ScoringKind::Numeric),
            "text_subset" => Ok(ScoringKind::TextSubset),
            "ordering" => Ok(ScoringKind::Ordering),
            "error_text" => Ok(ScoringKind::ErrorText),
            other => Err(Error::UnsupportedType(format!("Unknown scoring \"{}\"", other))),
        }
    }
}

impl FromStr for PresenterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(PresenterKind::Default),
            "tabs" => Ok(PresenterKind::Tabs),
            other => Err(Error::UnsupportedType(format!("Unknown presenter \"{}\"", other))),
        }
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ScoringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PresenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered question type: the identifiers of the strategies that
/// author, render and score it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionType {
    pub key: String,
    pub form_factory: String,
    pub editor: EditorKind,
    pub scoring: ScoringKind,
}

/// Fallback strategies used when a play configuration slot is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDefaults {
    pub editor: EditorKind,
    pub scoring: ScoringKind,
    pub presenter: PresenterKind,
}

impl Default for StrategyDefaults {
    fn default() -> Self {
        Self {
            editor: EditorKind::MultipleChoice,
            scoring: ScoringKind::MultipleChoice,
            presenter: PresenterKind::Default,
        }
    }
}
