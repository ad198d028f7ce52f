use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::scoring_definition::ScoringDefinition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayDefinition {
    ImageAndText {
        text: String,
        #[serde(default)]
        image: Option<String>,
    },
    Empty,
}

impl DisplayDefinition {
    pub fn image_and_text(text: impl Into<String>, image: Option<&str>) -> Self {
        DisplayDefinition::ImageAndText {
            text: text.into(),
            image: image.map(str::to_string),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayDefinition::ImageAndText { text, .. } => Some(text),
            DisplayDefinition::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    id: String,
    display_definition: DisplayDefinition,
    scoring_definition: ScoringDefinition,
}

impl AnswerOption {
    pub fn create(
        id: impl Into<String>,
        display_definition: DisplayDefinition,
        scoring_definition: ScoringDefinition,
    ) -> Self {
        Self {
            id: id.into(),
            display_definition,
            scoring_definition,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_definition(&self) -> &DisplayDefinition {
        &self.display_definition
    }

    pub fn scoring_definition(&self) -> &ScoringDefinition {
        &self.scoring_definition
    }
}

/// Ordered answer options of one question revision. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AnswerOption>", into = "Vec<AnswerOption>")]
pub struct AnswerOptions {
    options: Vec<AnswerOption>,
}

impl AnswerOptions {
    pub fn create(options: Vec<AnswerOption>) -> Result<Self> {
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.id.as_str()) {
                return Err(Error::Validation(format!(
                    "Duplicate answer option id \"{}\"",
                    option.id
                )));
            }
        }
        Ok(Self { options })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn get(&self, id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl TryFrom<Vec<AnswerOption>> for AnswerOptions {
    type Error = Error;

    fn try_from(options: Vec<AnswerOption>) -> Result<Self> {
        AnswerOptions::create(options)
    }
}

impl From<AnswerOptions> for Vec<AnswerOption> {
    fn from(options: AnswerOptions) -> Self {
        options.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str) -> AnswerOption {
        AnswerOption::create(
            id,
            DisplayDefinition::image_and_text(id, None),
            ScoringDefinition::Empty,
        )
    }

    #[test]
    fn keeps_construction_order() {
        let options = AnswerOptions::create(vec![option("b"), option("a"), option("c")]).unwrap();
        let ids: Vec<&str> = options.options().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = AnswerOptions::create(vec![option("1"), option("2"), option("1")]).unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("\"1\"")));
    }

    #[test]
    fn deserializing_duplicates_fails() {
        let raw = serde_json::json!([
            { "id": "1", "display_definition": { "type": "empty" }, "scoring_definition": { "type": "empty" } },
            { "id": "1", "display_definition": { "type": "empty" }, "scoring_definition": { "type": "empty" } }
        ]);
        assert!(serde_json::from_value::<AnswerOptions>(raw).is_err());
    }
}
