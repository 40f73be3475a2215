//! # Framework Errors
//!
//! Errors raised by plugins while a request passes through the convention
//! layer. Formatting itself does not fail on well-formed input; these cover
//! the host-supplied plugins that do real work (decoding, lookups).

use crate::plugin::PluginKind;

/// Errors that can occur while running plugins.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    #[error("{kind} plugin `{plugin}` failed: {message}")]
    PluginFailed {
        kind: PluginKind,
        plugin: String,
        message: String,
    },
    #[error("relationship `{relationship}` of `{resource_type}` could not be resolved: {message}")]
    RelationshipUnavailable {
        resource_type: String,
        relationship: String,
        message: String,
    },
}

impl FrameworkError {
    pub fn plugin_failed(kind: PluginKind, plugin: impl Into<String>, message: impl Into<String>) -> Self {
        FrameworkError::PluginFailed {
            kind,
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}
