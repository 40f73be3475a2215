//! Error types for the JSON:API convention.

use glue_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur while configuring the convention or encoding a document.
#[derive(Debug, Error)]
pub enum ConventionError {
    /// A required configuration value is missing or empty.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// A document could not be serialized.
    #[error("JSON encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A request body is not valid JSON.
    #[error("JSON decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A plugin failed while the request passed through the convention.
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
