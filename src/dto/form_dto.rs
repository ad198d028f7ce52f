use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Plain scalar values posted by the form layer, keyed by field key.
pub type FormValues = HashMap<String, JsonValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    TextArea,
    Number,
    Checkbox,
    Radio,
    Select,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: JsonValue,
}

/// Describes one input the form layer renders. `label` is a language key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(label: &str, field_type: FieldType, key: &str) -> Self {
        Self {
            label: label.to_string(),
            field_type,
            key: key.to_string(),
            options: None,
            value: None,
            required: false,
        }
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_value(mut self, value: Option<JsonValue>) -> Self {
        self.value = value;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl FieldOption {
    pub fn new(label: &str, value: impl Into<JsonValue>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}
