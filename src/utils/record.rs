use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Builds a value object from a plain field mapping as handed over by the
/// persistence layer.
pub fn from_record<T: DeserializeOwned>(record: &JsonValue) -> Result<T> {
    Ok(T::deserialize(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::ScoringConfiguration;
    use serde_json::json;

    #[test]
    fn reads_tagged_configuration() {
        let record = json!({ "type": "numeric", "points": 2.0, "lower_bound": 1.0, "upper_bound": 3.0 });
        let config: ScoringConfiguration = from_record(&record).unwrap();
        assert!(matches!(config, ScoringConfiguration::Numeric(ref c) if c.points == 2.0));
    }

    #[test]
    fn unknown_tag_is_a_json_error() {
        let record = json!({ "type": "cloze" });
        let err = from_record::<ScoringConfiguration>(&record).unwrap_err();
        assert!(matches!(err, crate::error::Error::Json(_)));
    }
}
