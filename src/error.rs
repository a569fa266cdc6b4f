//! Error types for the visualizer.
//!
//! Nothing in here is fatal. An [`InputError`] means an operation was never
//! attempted and the map is untouched; a [`ConfigError`] means the settings
//! file could not be used.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Rejected user input. The `Display` text is what the user is shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A put without both halves of the pair
    #[error("Please enter both key and value.")]
    MissingKeyOrValue,

    /// A keyed operation without a key
    #[error("Please enter a key.")]
    MissingKey,

    /// An empty string offered as a value
    #[error("Please enter a value.")]
    MissingValue,

    /// The key did not parse as an integer
    #[error("Key must be a number.")]
    KeyNotNumeric(String),

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// Trailing input after a complete command
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("unterminated quote in '{0}'")]
    UnterminatedQuote(String),
}

/// Problems loading or validating a [`VisualizerConfig`](crate::VisualizerConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

#[cfg(test)]
mod tests {
    use super::InputError;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            "Please enter both key and value.",
            InputError::MissingKeyOrValue.to_string()
        );
        assert_eq!(
            "Key must be a number.",
            InputError::KeyNotNumeric("abc".to_owned()).to_string()
        );
        assert_eq!(
            "unknown operation 'frob'",
            InputError::UnknownOperation("frob".to_owned()).to_string()
        );
    }
}
