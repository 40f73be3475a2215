//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for a binary that embeds the
//! convention layer.
//!
//! ## What Gets Traced
//!
//! - **Request building**: which builder plugins ran and what they derived
//!   (sparse fields, include list)
//! - **Validation**: the number of errors each validator reported
//! - **Relationship resolution**: providers loaded per resource type, related
//!   resources attached, included resources collected
//! - **Formatting**: envelope shape (single object or collection) and counts
//!
//! ## Usage
//!
//! ```bash
//! # Shapes and counts
//! RUST_LOG=info cargo run --bin storefront-demo
//!
//! # Per-resource detail
//! RUST_LOG=debug cargo run --bin storefront-demo
//!
//! # One module only
//! RUST_LOG=glue_jsonapi::response=trace cargo run --bin storefront-demo
//! ```
//!
//! With `RUST_LOG=debug` a formatted collection reads like:
//!
//! ```text
//! DEBUG build_relationship_response: Loaded providers resource_type="products" count=1
//! DEBUG build_relationship_response: Collected included resources included=2
//! DEBUG format_response_data: Formatted collection response resources=2 included=2
//! ```

/// Initializes the tracing subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
