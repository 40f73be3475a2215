//! # Glue Framework
//!
//! Building blocks shared by API conventions of the storefront gateway: the
//! transfer types that carry a request through the convention layer, and the
//! plugin contracts hosts implement to extend it.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Transfer Layer** ([`transfer`]) - the per-request resource graph, request context and response envelope
//! 2. **Contract Layer** ([`plugin`]) - the fixed [`PluginKind`] set and one narrow trait per kind
//! 3. **Convention Layer** (the `glue-jsonapi` crate) - formatting rules applied on top of both
//!
//! A convention never reaches into a global registry. Hosts build a
//! [`PluginSet`] at startup and hand it to the convention factory together
//! with their configuration.
//!
//! ## Example
//!
//! ```rust
//! use glue_framework::{GlueRequest, GlueResource, GlueResponse, HttpMethod};
//!
//! let request = GlueRequest::new(HttpMethod::Get, "products")
//!     .with_id("42")
//!     .with_query_field("include", "category");
//!
//! let response = GlueResponse::new()
//!     .with_resource(GlueResource::new("products", "42").with_attribute("name", "Widget"));
//!
//! assert_eq!(request.resource.id.as_deref(), Some("42"));
//! assert_eq!(response.resources.len(), 1);
//! ```
//!
//! ## Concurrency Model
//!
//! Everything is synchronous and request-scoped. Transfer types are plain
//! owned data; plugins are `Send + Sync` and shared behind `Arc`, so one
//! plugin set can serve any number of request threads without locking.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockRelationshipPlugin`](mock::MockRelationshipPlugin),
//! an expectation-based relationship provider for tests.

pub mod error;
pub mod mock;
pub mod plugin;
pub mod tracing;
pub mod transfer;

// Re-export core types for convenience
pub use error::FrameworkError;
pub use plugin::{
    Plugin, PluginKind, PluginSet, RequestBuilderPlugin, RequestValidatorPlugin,
    ResourceRelationshipPlugin, ResponseFormatterPlugin,
};
pub use transfer::{
    ErrorRecord, GlueRequest, GlueResource, GlueResponse, HttpMethod, RelationshipBlock,
    RequestResource, SparseFields,
};
