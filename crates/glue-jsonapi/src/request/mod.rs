//! Request builder plugins that turn raw query fields and bodies into the
//! structured parts of a [`GlueRequest`](glue_framework::GlueRequest).

pub mod attributes_builder;
pub mod relationship_builder;
pub mod sparse_field_builder;

pub use attributes_builder::AttributesRequestBuilder;
pub use relationship_builder::RelationshipRequestBuilder;
pub use sparse_field_builder::SparseFieldRequestBuilder;
