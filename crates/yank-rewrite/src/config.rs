//! Configuration for normalization.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `YANK_` prefix)
//!
//! Environment variables take precedence over the file, which takes
//! precedence over the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RewriteError, RewriteResult};

/// Settings for [`Normalize`](crate::Normalize).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Build the left interchange normal form instead of the right one.
    #[serde(default)]
    pub left: bool,

    /// Upper bound on the number of rewrite steps.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Remove snakes before normalizing interchanges.
    #[serde(default = "default_true")]
    pub snake_removal: bool,

    /// Run the interchange normal form pass.
    #[serde(default = "default_true")]
    pub interchange: bool,
}

fn default_max_steps() -> usize {
    100_000
}

fn default_true() -> bool {
    true
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            left: false,
            max_steps: default_max_steps(),
            snake_removal: true,
            interchange: true,
        }
    }
}

impl NormalizeConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> RewriteResult<Self> {
        let config: Self =
            serde_yaml_ng::from_str(contents).map_err(|e| RewriteError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RewriteResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RewriteError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> RewriteResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply the `YANK_*` environment variables that are set.
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    #[must_use]
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("YANK_NORMALIZE_LEFT").and_then(|v| parse_bool(&v)) {
            self.left = val;
        }
        if let Some(val) = lookup("YANK_MAX_STEPS").and_then(|v| v.parse().ok()) {
            self.max_steps = val;
        }
        if let Some(val) = lookup("YANK_SNAKE_REMOVAL").and_then(|v| parse_bool(&v)) {
            self.snake_removal = val;
        }
        if let Some(val) = lookup("YANK_INTERCHANGE").and_then(|v| parse_bool(&v)) {
            self.interchange = val;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> RewriteResult<()> {
        if self.max_steps == 0 {
            return Err(RewriteError::Config(
                "max_steps must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
