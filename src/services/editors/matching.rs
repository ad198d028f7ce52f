use serde_json::json;
use std::collections::HashSet;

use super::{configured_for, shuffled, Editor};
use crate::dto::form_dto::{FieldDefinition, FieldOption, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::configuration::{
    EditorConfiguration, MatchingEditorConfiguration, MatchingItem, MatchingMapping, MatchingMode,
    MatchingShuffle,
};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::EditorKind;
use crate::utils::form::{read_optional_string, read_optional_u32, read_string};
use crate::utils::record::from_record;

pub const VAR_SHUFFLE: &str = "me_shuffle";
pub const VAR_THUMBNAIL: &str = "me_thumbnail";
pub const VAR_MODE: &str = "me_matching";
pub const VAR_DEFINITIONS: &str = "me_definitions";
pub const VAR_TERMS: &str = "me_terms";
pub const VAR_MATCHES: &str = "me_matches";

/// Definitions and terms are authored on the editor configuration, not as
/// answer options.
pub struct MatchingEditor;

impl MatchingEditor {
    fn configuration(question: &Question) -> Option<&MatchingEditorConfiguration> {
        match question.play_configuration().editor_configuration() {
            Some(EditorConfiguration::Matching(c)) => Some(c),
            _ => None,
        }
    }

    /// Definitions and terms in presentation order for `seed`.
    pub fn display_items<'a>(
        config: &'a MatchingEditorConfiguration,
        seed: u64,
    ) -> (Vec<&'a MatchingItem>, Vec<&'a MatchingItem>) {
        let shuffle_definitions = matches!(config.shuffle, MatchingShuffle::Definitions | MatchingShuffle::Both);
        let shuffle_terms = matches!(config.shuffle, MatchingShuffle::Terms | MatchingShuffle::Both);
        let definitions = if shuffle_definitions {
            shuffled(&config.definitions, seed)
        } else {
            config.definitions.iter().collect()
        };
        let terms = if shuffle_terms {
            shuffled(&config.terms, seed.wrapping_add(1))
        } else {
            config.terms.iter().collect()
        };
        (definitions, terms)
    }

    fn shuffle_code(shuffle: MatchingShuffle) -> &'static str {
        match shuffle {
            MatchingShuffle::None => "none",
            MatchingShuffle::Definitions => "definitions",
            MatchingShuffle::Terms => "terms",
            MatchingShuffle::Both => "both",
        }
    }

    fn mode_code(mode: MatchingMode) -> &'static str {
        match mode {
            MatchingMode::OneToOne => "one_to_one",
            MatchingMode::ManyToOne => "many_to_one",
            MatchingMode::ManyToMany => "many_to_many",
        }
    }

    fn read_list<T: serde::de::DeserializeOwned>(values: &FormValues, key: &str) -> Result<Vec<T>> {
        match values.get(key) {
            Some(value) if !value.is_null() => from_record(value),
            _ => Ok(Vec::new()),
        }
    }
}

impl Editor for MatchingEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Matching
    }

    fn is_complete(&self, question: &Question) -> bool {
        let Some(config) = Self::configuration(question) else {
            return false;
        };
        let definitions: HashSet<&str> = config.definitions.iter().map(|d| d.id.as_str()).collect();
        let terms: HashSet<&str> = config.terms.iter().map(|t| t.id.as_str()).collect();
        !definitions.is_empty()
            && !terms.is_empty()
            && config.matches.iter().all(|m| {
                definitions.contains(m.definition_id.as_str()) && terms.contains(m.term_id.as_str())
            })
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let config = match configured_for(play, self.kind()) {
            Some(EditorConfiguration::Matching(c)) => Some(c),
            _ => None,
        };
        let shuffle_options = [
            MatchingShuffle::None,
            MatchingShuffle::Definitions,
            MatchingShuffle::Terms,
            MatchingShuffle::Both,
        ]
        .iter()
        .map(|s| FieldOption::new(&format!("asq_option_shuffle_{}", Self::shuffle_code(*s)), Self::shuffle_code(*s)))
        .collect();
        let mode_options = [MatchingMode::OneToOne, MatchingMode::ManyToOne, MatchingMode::ManyToMany]
            .iter()
            .map(|m| FieldOption::new(&format!("asq_option_{}", Self::mode_code(*m)), Self::mode_code(*m)))
            .collect();

        vec![
            FieldDefinition::new("asq_label_shuffle", FieldType::Select, VAR_SHUFFLE)
                .with_options(shuffle_options)
                .with_value(config.map(|c| json!(Self::shuffle_code(c.shuffle)))),
            FieldDefinition::new("asq_label_thumb_size", FieldType::Number, VAR_THUMBNAIL)
                .with_value(config.and_then(|c| c.thumbnail_size).map(|s| json!(s))),
            FieldDefinition::new("asq_label_matching_mode", FieldType::Radio, VAR_MODE)
                .required()
                .with_options(mode_options)
                .with_value(config.map(|c| json!(Self::mode_code(c.matching_mode)))),
            FieldDefinition::new("asq_label_definitions", FieldType::TextArea, VAR_DEFINITIONS)
                .required()
                .with_value(config.map(|c| json!(c.definitions))),
            FieldDefinition::new("asq_label_terms", FieldType::TextArea, VAR_TERMS)
                .required()
                .with_value(config.map(|c| json!(c.terms))),
            FieldDefinition::new("asq_label_matches", FieldType::TextArea, VAR_MATCHES)
                .with_value(config.map(|c| json!(c.matches))),
        ]
    }

    /// Definitions, terms and matches arrive as lists of records.
    fn read_config(&self, values: &FormValues) -> Result<EditorConfiguration> {
        let shuffle = match read_optional_string(values, VAR_SHUFFLE)?.as_deref() {
            None | Some("none") => MatchingShuffle::None,
            Some("definitions") => MatchingShuffle::Definitions,
            Some("terms") => MatchingShuffle::Terms,
            Some("both") => MatchingShuffle::Both,
            Some(other) => return Err(Error::Validation(format!("Unknown shuffle mode \"{}\"", other))),
        };
        let matching_mode = match read_string(values, VAR_MODE)?.as_str() {
            "one_to_one" => MatchingMode::OneToOne,
            "many_to_one" => MatchingMode::ManyToOne,
            "many_to_many" => MatchingMode::ManyToMany,
            other => return Err(Error::Validation(format!("Unknown matching mode \"{}\"", other))),
        };
        let config = EditorConfiguration::Matching(MatchingEditorConfiguration {
            shuffle,
            thumbnail_size: read_optional_u32(values, VAR_THUMBNAIL)?,
            matching_mode,
            definitions: Self::read_list::<MatchingItem>(values, VAR_DEFINITIONS)?,
            terms: Self::read_list::<MatchingItem>(values, VAR_TERMS)?,
            matches: Self::read_list::<MatchingMapping>(values, VAR_MATCHES)?,
        });
        config.validate_fields()?;
        Ok(config)
    }
}
