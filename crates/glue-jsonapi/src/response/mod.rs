//! Response side of the convention: relationship expansion, link building and
//! document serialization.

pub mod formatter;
pub mod links;
pub mod query;
pub mod relationship_filter;
pub mod relationship_response;
pub mod response_builder;

pub use formatter::JsonGlueResponseFormatter;
pub use links::{LinkBuilder, Links, LINK_SELF};
pub use query::build_query_string;
pub use relationship_filter::{filter_resource_relationships, FilteredRelationships, RelationshipData, ResourceIdentifier};
pub use relationship_response::{RelationshipResponse, MAX_RELATIONSHIP_DEPTH};
pub use response_builder::JsonGlueResponseBuilder;
