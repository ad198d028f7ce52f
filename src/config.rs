use crate::error::{Error, Result};
use crate::models::question_type::{EditorKind, PresenterKind, ScoringKind, StrategyDefaults};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub default_editor: EditorKind,
    pub default_scoring: ScoringKind,
    pub default_presenter: PresenterKind,
    pub log_json: bool,
    pub log_filter: String,
    pub passing_percentage: f64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let passing_percentage: f64 = get_env_parse_or("ASQ_PASSING_PERCENTAGE", 50.0)?;
        if !(0.0..=100.0).contains(&passing_percentage) {
            return Err(Error::Config(format!(
                "Invalid value for ASQ_PASSING_PERCENTAGE: {} is not between 0 and 100",
                passing_percentage
            )));
        }

        Ok(Self {
            default_editor: get_env_parse_or("ASQ_DEFAULT_EDITOR", EditorKind::MultipleChoice)?,
            default_scoring: get_env_parse_or("ASQ_DEFAULT_SCORING", ScoringKind::MultipleChoice)?,
            default_presenter: get_env_parse_or("ASQ_DEFAULT_PRESENTER", PresenterKind::Default)?,
            log_json: get_env_parse_or("ASQ_LOG_JSON", false)?,
            log_filter: env::var("ASQ_LOG_FILTER").unwrap_or_else(|_| "info".to_string()),
            passing_percentage,
        })
    }

    pub fn strategy_defaults(&self) -> StrategyDefaults {
        StrategyDefaults {
            editor: self.default_editor,
            scoring: self.default_scoring,
            presenter: self.default_presenter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let defaults = StrategyDefaults::default();
        Self {
            default_editor: defaults.editor,
            default_scoring: defaults.scoring,
            default_presenter: defaults.presenter,
            log_json: false,
            log_filter: "info".to_string(),
            passing_percentage: 50.0,
        }
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the environment so runs cannot interfere.
    #[test]
    fn reads_environment_with_defaults() {
        env::remove_var("ASQ_DEFAULT_EDITOR");
        env::set_var("ASQ_DEFAULT_SCORING", "essay");
        env::set_var("ASQ_PASSING_PERCENTAGE", "75");
        let config = Config::from_env().unwrap();
        assert_eq!(config.default_editor, EditorKind::MultipleChoice);
        assert_eq!(config.default_scoring, ScoringKind::Essay);
        assert_eq!(config.passing_percentage, 75.0);

        env::set_var("ASQ_DEFAULT_SCORING", "cloze");
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));

        env::set_var("ASQ_DEFAULT_SCORING", "multiple_choice");
        env::set_var("ASQ_PASSING_PERCENTAGE", "150");
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));

        env::remove_var("ASQ_DEFAULT_SCORING");
        env::remove_var("ASQ_PASSING_PERCENTAGE");
    }
}
