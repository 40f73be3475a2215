//! # Glue JSON:API Convention
//!
//! Formats the responses of the storefront gateway as JSON:API documents.
//!
//! ## Core Components
//!
//! | Component | Module | Role |
//! |-----------|--------|------|
//! | Response envelope assembler | [`response::formatter`] | resource, empty and error documents |
//! | Link builder | [`response::links`] | `self` links from the configured domain |
//! | Query-string builder | [`response::query`] | rebuilds the request query for links |
//! | Relationship filter | [`response::relationship_filter`] | identifiers only, bucketed by type |
//! | Relationship resolver | [`resource::relationship_loader`] | providers per resource type |
//! | Relationship response builder | [`response::relationship_response`] | expands relationships, fills `included` |
//! | Request builders | [`request`] | `fields[...]`, `include`, body attributes |
//! | Convention pipeline | [`convention`] | builders, validators, formatters, serialization |
//!
//! Everything is created by [`GlueJsonApiConventionFactory`] from a
//! [`JsonApiConventionConfig`] and a [`PluginSet`](glue_framework::PluginSet).
//!
//! ## Quick Start
//!
//! ```rust
//! use glue_framework::{GlueRequest, GlueResource, GlueResponse, HttpMethod, PluginSet};
//! use glue_jsonapi::{GlueJsonApiConventionFactory, JsonApiConventionConfig};
//!
//! let factory = GlueJsonApiConventionFactory::new(
//!     JsonApiConventionConfig::new("https://api.example.com"),
//!     PluginSet::new(),
//! );
//! let formatter = factory.create_response_formatter();
//!
//! let request = GlueRequest::new(HttpMethod::Get, "products");
//! assert_eq!(
//!     formatter.format_response_with_empty_resource(&request).unwrap(),
//!     r#"{"data":[],"links":{"self":"https://api.example.com/products"}}"#
//! );
//! ```
//!
//! See the `storefront-demo` binary for a full pipeline run.

pub mod config;
pub mod convention;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod plugin;
pub mod request;
pub mod resource;
pub mod response;
pub mod storefront;

pub use config::JsonApiConventionConfig;
pub use convention::JsonApiConvention;
pub use encoder::{JsonDecoder, JsonEncoder};
pub use error::ConventionError;
pub use factory::GlueJsonApiConventionFactory;
pub use plugin::RelationshipResponseBuilderPlugin;
pub use resource::ResourceRelationshipLoader;
pub use response::{JsonGlueResponseBuilder, JsonGlueResponseFormatter, LinkBuilder, RelationshipResponse};
