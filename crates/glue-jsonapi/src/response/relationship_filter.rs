//! # Relationship Filter
//!
//! Reduces the full related resources attached to a resource to JSON:API
//! resource identifiers (`type` and `id` only), so that no attributes leak
//! into a `relationships` member. Full objects travel in `included` instead.
//!
//! ## Bucketing
//!
//! The output is keyed by the related resource's **type**, not by the
//! relationship name it was attached under. Two relationship names pointing at
//! resources of the same type therefore end up in one bucket:
//!
//! ```text
//! relationships: { "abstract-product": [products/1], "concrete-product": [products/2] }
//!             -> { "products": { "data": [products/1, products/2] } }
//! ```
//!
//! Clients of the existing API rely on this shape; relationship-name buckets
//! would be a breaking change.

use glue_framework::{GlueResource, RelationshipBlock};
use indexmap::IndexMap;
use serde::Serialize;

/// `{type, id}` of a related resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: Option<String>,
}

impl From<&GlueResource> for ResourceIdentifier {
    fn from(resource: &GlueResource) -> Self {
        Self {
            resource_type: resource.resource_type.clone(),
            id: resource.id.clone(),
        }
    }
}

impl From<ResourceIdentifier> for GlueResource {
    fn from(identifier: ResourceIdentifier) -> Self {
        GlueResource {
            resource_type: identifier.resource_type,
            id: identifier.id,
            ..GlueResource::default()
        }
    }
}

/// The `{data: [...]}` member written for one relationship bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipData {
    pub data: Vec<ResourceIdentifier>,
}

/// Related resource type to its identifiers.
pub type FilteredRelationships = IndexMap<String, RelationshipData>;

/// Collapses every relationship block into identifier buckets keyed by related type,
/// keeping encounter order.
pub fn filter_resource_relationships(relationships: &IndexMap<String, RelationshipBlock>) -> FilteredRelationships {
    let mut filtered = FilteredRelationships::new();

    for block in relationships.values() {
        for resource in &block.resources {
            filtered
                .entry(resource.resource_type.clone())
                .or_default()
                .data
                .push(ResourceIdentifier::from(resource));
        }
    }

    filtered
}
