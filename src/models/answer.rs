use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::question_type::ScoringKind;

/// A learner's submitted response, one variant per question type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Answer {
    MultipleChoice(MultipleChoiceAnswer),
    Kprim(KprimAnswer),
    Essay(EssayAnswer),
    Matching(MatchingAnswer),
    Numeric(NumericAnswer),
    TextSubset(TextSubsetAnswer),
    Ordering(OrderingAnswer),
    ErrorText(ErrorTextAnswer),
}

impl Answer {
    /// The scoring strategy able to grade this answer.
    pub fn scored_by(&self) -> ScoringKind {
        match self {
            Answer::MultipleChoice(_) => ScoringKind::MultipleChoice,
            Answer::Kprim(_) => ScoringKind::Kprim,
            Answer::Essay(_) => ScoringKind::Essay,
            Answer::Matching(_) => ScoringKind::Matching,
            Answer::Numeric(_) => ScoringKind::Numeric,
            Answer::TextSubset(_) => ScoringKind::TextSubset,
            Answer::Ordering(_) => ScoringKind::Ordering,
            Answer::ErrorText(_) => ScoringKind::ErrorText,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceAnswer {
    #[serde(default)]
    pub selected_ids: BTreeSet<String>,
}

impl MultipleChoiceAnswer {
    pub fn create<I, S>(selected_ids: I) -> Answer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer::MultipleChoice(Self {
            selected_ids: selected_ids.into_iter().map(Into::into).collect(),
        })
    }
}

/// Judgement per option id; a missing entry means the statement was left
/// unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KprimAnswer {
    #[serde(default)]
    pub answers: BTreeMap<String, bool>,
}

impl KprimAnswer {
    pub fn create<I, S>(answers: I) -> Answer
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Answer::Kprim(Self {
            answers: answers.into_iter().map(|(id, v)| (id.into(), v)).collect(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssayAnswer {
    pub text: String,
}

impl EssayAnswer {
    pub fn create(text: impl Into<String>) -> Answer {
        Answer::Essay(Self { text: text.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingPair {
    pub definition_id: String,
    pub term_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingAnswer {
    #[serde(default)]
    pub pairs: Vec<MatchingPair>,
}

impl MatchingAnswer {
    pub fn create<I, S>(pairs: I) -> Answer
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Answer::Matching(Self {
            pairs: pairs
                .into_iter()
                .map(|(definition_id, term_id)| MatchingPair {
                    definition_id: definition_id.into(),
                    term_id: term_id.into(),
                })
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericAnswer {
    pub value: f64,
}

impl NumericAnswer {
    pub fn create(value: f64) -> Answer {
        Answer::Numeric(Self { value })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSubsetAnswer {
    #[serde(default)]
    pub answers: Vec<String>,
}

impl TextSubsetAnswer {
    pub fn create<I, S>(answers: I) -> Answer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer::TextSubset(Self {
            answers: answers.into_iter().map(Into::into).collect(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingAnswer {
    #[serde(default)]
    pub selected_order: Vec<String>,
}

impl OrderingAnswer {
    pub fn create<I, S>(selected_order: I) -> Answer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer::Ordering(Self {
            selected_order: selected_order.into_iter().map(Into::into).collect(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorTextAnswer {
    #[serde(default)]
    pub selected_word_indexes: BTreeSet<usize>,
}

impl ErrorTextAnswer {
    pub fn create(selected_word_indexes: impl IntoIterator<Item = usize>) -> Answer {
        Answer::ErrorText(Self {
            selected_word_indexes: selected_word_indexes.into_iter().collect(),
        })
    }
}
