//! Configuration value errors.

use thiserror::Error;

/// Errors produced while interpreting individual configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A tab bar position outside the recognized set.
    #[error(
        "unknown tab bar position '{0}' (expected top, bottom, overlayTop or overlayBottom)"
    )]
    UnknownTabBarPosition(String),
}

/// Result alias for value-level configuration parsing.
pub type Result<T> = std::result::Result<T, ConfigError>;
