use serde::{Deserialize, Serialize};

use crate::models::configuration::{
    ConfigurationFor, EditorConfiguration, PresenterConfiguration, ScoringConfiguration,
};
use crate::models::question_type::{EditorKind, PresenterKind, ScoringKind, StrategyDefaults};

/// Editor, scoring and presenter configuration of one question revision.
/// Empty slots fall back to the registered default strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionPlayConfiguration {
    #[serde(default)]
    editor_configuration: Option<EditorConfiguration>,
    #[serde(default)]
    scoring_configuration: Option<ScoringConfiguration>,
    #[serde(default)]
    presenter_configuration: Option<PresenterConfiguration>,
}

impl QuestionPlayConfiguration {
    pub fn create(
        editor_configuration: Option<EditorConfiguration>,
        scoring_configuration: Option<ScoringConfiguration>,
        presenter_configuration: Option<PresenterConfiguration>,
    ) -> Self {
        Self {
            editor_configuration,
            scoring_configuration,
            presenter_configuration,
        }
    }

    pub fn editor_configuration(&self) -> Option<&EditorConfiguration> {
        self.editor_configuration.as_ref()
    }

    pub fn scoring_configuration(&self) -> Option<&ScoringConfiguration> {
        self.scoring_configuration.as_ref()
    }

    pub fn presenter_configuration(&self) -> Option<&PresenterConfiguration> {
        self.presenter_configuration.as_ref()
    }

    pub fn editor_kind(&self, defaults: &StrategyDefaults) -> EditorKind {
        resolve(self.editor_configuration(), || defaults.editor)
    }

    pub fn scoring_kind(&self, defaults: &StrategyDefaults) -> ScoringKind {
        resolve(self.scoring_configuration(), || defaults.scoring)
    }

    pub fn presenter_kind(&self, defaults: &StrategyDefaults) -> PresenterKind {
        resolve(self.presenter_configuration(), || defaults.presenter)
    }
}

/// The strategy a slot is configured for, or the provided default when
/// the slot is empty.
pub fn resolve<C, F>(configuration: Option<&C>, default: F) -> C::Kind
where
    C: ConfigurationFor,
    F: FnOnce() -> C::Kind,
{
    match configuration {
        Some(c) => c.configuration_for(),
        None => default(),
    }
}
