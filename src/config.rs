//! Settings for the presentation layer: the picker contents, how long a
//! highlight stays lit, and whether to colour output.

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, Key};

/// Keys offered by the put picker.
pub const DEFAULT_KEY_OPTIONS: std::ops::RangeInclusive<Key> = 10..=19;

/// Values offered by the put picker.
pub const DEFAULT_VALUE_OPTIONS: [&str; 10] = [
    "Apple", "Banana", "Cat", "Dog", "Elephant", "Fox", "Grape", "Horse", "Iguana", "Jaguar",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Suggested keys. The map itself accepts any integer.
    pub key_options: Vec<Key>,

    /// Suggested values. The map itself accepts any non-empty string.
    pub value_options: Vec<String>,

    /// Milliseconds a highlight stays lit.
    pub highlight_ms: u64,

    /// Emit ANSI colour.
    pub color: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            key_options: DEFAULT_KEY_OPTIONS.collect(),
            value_options: DEFAULT_VALUE_OPTIONS.iter().map(|v| v.to_string()).collect(),
            highlight_ms: 1000,
            color: true,
        }
    }
}

impl VisualizerConfig {
    /// Reads and validates a JSON config file. Missing fields take their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_options.is_empty() {
            return Err(invalid("key_options must not be empty"));
        }

        for (pos, key) in self.key_options.iter().enumerate() {
            if self.key_options[..pos].contains(key) {
                return Err(invalid(format!("key_options repeats {}", key)));
            }
        }

        if self.value_options.is_empty() {
            return Err(invalid("value_options must not be empty"));
        }

        if self.value_options.iter().any(String::is_empty) {
            return Err(invalid("value_options must not contain empty strings"));
        }

        Ok(())
    }

    pub fn highlight_timeout(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
    }
}
