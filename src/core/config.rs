//! Skill configuration.
//!
//! Loaded once at startup, from a JSON file and/or the environment:
//!
//! - `FIZZBUZZ_DEFAULT_LOCALE`: overrides `default_locale`
//! - `FIZZBUZZ_LOG`: overrides `log_filter`
//!
//! `RUST_LOG`, when set, still wins over `log_filter` at subscriber setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillError};

/// Env var overriding the default locale.
pub const ENV_DEFAULT_LOCALE: &str = "FIZZBUZZ_DEFAULT_LOCALE";
/// Env var overriding the log filter.
pub const ENV_LOG_FILTER: &str = "FIZZBUZZ_LOG";

/// Skill configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Locale used when a request's locale has no message table.
    pub default_locale: String,

    /// `tracing` filter directive (e.g. `"info"`, `"fizzbuzz_skill=debug"`).
    pub log_filter: String,

    /// Attach the spoken utterance as a reprompt on correct turns.
    /// Off by default: the player answers straight after the engine speaks.
    pub reprompt_on_continue: bool,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            log_filter: "info".to_string(),
            reprompt_on_continue: false,
        }
    }
}

impl SkillConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SkillError::Config(e.to_string()))
    }

    /// Read a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SkillError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (env in production, a map in tests).
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(ENV_DEFAULT_LOCALE).filter(|v| !v.trim().is_empty()) {
            self.default_locale = locale.trim().to_string();
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter.trim().to_string();
        }
        self
    }

    /// Set the default locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Enable or disable reprompts on correct turns.
    #[must_use]
    pub fn with_reprompt_on_continue(mut self, enabled: bool) -> Self {
        self.reprompt_on_continue = enabled;
        self
    }
}
