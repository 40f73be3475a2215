//! # Convention Configuration
//!
//! The convention needs exactly one configured value: the domain every link
//! is prefixed with. It is passed in explicitly through
//! [`GlueJsonApiConventionFactory`](crate::factory::GlueJsonApiConventionFactory)
//! rather than read from process-wide state.
//!
//! ## Sources
//!
//! ```rust
//! use glue_jsonapi::config::JsonApiConventionConfig;
//!
//! // Directly
//! let config = JsonApiConventionConfig::new("https://glue.example.com");
//!
//! // From a TOML document
//! let config = JsonApiConventionConfig::from_toml_str(r#"glue_domain = "https://glue.example.com""#).unwrap();
//! assert_eq!(config.glue_domain(), "https://glue.example.com");
//! ```
//!
//! Or from the `GLUE_DOMAIN` environment variable with
//! [`JsonApiConventionConfig::from_env`].

use crate::error::ConventionError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable read by [`JsonApiConventionConfig::from_env`].
pub const GLUE_DOMAIN_ENV: &str = "GLUE_DOMAIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiConventionConfig {
    glue_domain: String,
}

impl JsonApiConventionConfig {
    pub fn new(glue_domain: impl Into<String>) -> Self {
        Self {
            glue_domain: glue_domain.into(),
        }
    }

    /// Reads the domain from `GLUE_DOMAIN`.
    pub fn from_env() -> Result<Self, ConventionError> {
        match std::env::var(GLUE_DOMAIN_ENV) {
            Ok(domain) if !domain.trim().is_empty() => {
                debug!(glue_domain = %domain, "Loaded config from environment");
                Ok(Self::new(domain))
            }
            _ => Err(ConventionError::MissingConfig(GLUE_DOMAIN_ENV.to_string())),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConventionError> {
        let config: Self = toml::from_str(source)?;
        if config.glue_domain.trim().is_empty() {
            return Err(ConventionError::MissingConfig("glue_domain".to_string()));
        }
        debug!(glue_domain = %config.glue_domain, "Loaded config from TOML");
        Ok(config)
    }

    /// Domain prefix for every generated link, e.g. `https://glue.example.com`.
    pub fn glue_domain(&self) -> &str {
        &self.glue_domain
    }
}
