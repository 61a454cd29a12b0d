//! Engine configuration.
//!
//! Loaded from TOML text; every key is optional and unknown keys are
//! rejected so typos do not silently fall back to defaults.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// AliasCollision
///
/// How the registry reports an alias that overwrites an earlier binding.
/// The later registration wins either way.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasCollision {
    #[default]
    Overwrite,
    Warn,
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// First day of the week for `bow` / `eow` tokens.
    pub week_start: Weekday,

    pub alias_collision: AliasCollision,

    /// Trace every registry lookup outcome at debug level.
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            alias_collision: AliasCollision::default(),
            debug: false,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
