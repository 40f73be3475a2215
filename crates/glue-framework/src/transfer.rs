//! # Transfer Types
//!
//! Plain data carried through a single request: the resolved resource graph, the
//! incoming request context and the outgoing response envelope.
//!
//! All of these are built once per request by the host (routing, resource
//! resolution, validation), handed through the convention layer and dropped
//! after serialization. Nothing here holds state across requests.
//!
//! Maps are [`IndexMap`]s throughout so that attribute, query-field and
//! error-field order survives into the serialized output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Resource type to the attribute names a client asked for (`fields[type]=a,b`).
pub type SparseFields = IndexMap<String, Vec<String>>;

// =============================================================================
// RESOURCES
// =============================================================================

/// A single resource object in the resolved graph.
///
/// `links` is empty when the upstream resolver did not set any; the formatter
/// then derives a `self` link. `relationships` holds full related resources,
/// which the formatter reduces to identifiers on output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlueResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub relationships: IndexMap<String, RelationshipBlock>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, String>,
}

impl GlueResource {
    /// Creates a resource with a type and an id.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Creates a resource that has no id yet (e.g. a freshly posted cart item
    /// or a singleton resource such as `access-tokens`).
    pub fn without_id(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_link(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.insert(name.into(), href.into());
        self
    }

    /// Appends `resources` to the relationship block named `name`, creating it if needed.
    pub fn with_relationship(mut self, name: impl Into<String>, resources: Vec<GlueResource>) -> Self {
        self.add_relationship(name, resources);
        self
    }

    pub fn add_relationship(&mut self, name: impl Into<String>, resources: Vec<GlueResource>) {
        self.relationships
            .entry(name.into())
            .or_default()
            .resources
            .extend(resources);
    }

    /// The id, treating an empty string the same as a missing one.
    pub fn resource_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// `(type, id)` pair used to recognise the same resource in different places of the graph.
    pub fn identity(&self) -> (&str, &str) {
        (&self.resource_type, self.id.as_deref().unwrap_or_default())
    }
}

/// The related resources attached to a resource under one relationship name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipBlock {
    #[serde(default)]
    pub resources: Vec<GlueResource>,
}

impl RelationshipBlock {
    pub fn new(resources: Vec<GlueResource>) -> Self {
        Self { resources }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// HTTP verbs the gateway routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resource addressed by the request path, e.g. `products/42`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Request context as seen by the convention layer.
///
/// The host fills `method`, `resource`, `query_fields` and `content`. The
/// request builder plugins derive `attributes`, `sparse_fields` and
/// `included_relationships` from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlueRequest {
    pub method: HttpMethod,
    pub resource: RequestResource,
    #[serde(default)]
    pub query_fields: IndexMap<String, String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
    #[serde(default)]
    pub sparse_fields: SparseFields,
    /// `None` when the client sent no `include`, which expands every relationship.
    #[serde(default)]
    pub included_relationships: Option<Vec<String>>,
}

impl GlueRequest {
    pub fn new(method: HttpMethod, resource_type: impl Into<String>) -> Self {
        Self {
            method,
            resource: RequestResource {
                resource_type: resource_type.into(),
                id: None,
            },
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.resource.id = Some(id.into());
        self
    }

    pub fn with_query_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_fields.insert(name.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether the client asked for `name` via `include`. No include at all means everything;
    /// an empty one means nothing.
    pub fn is_relationship_requested(&self, name: &str) -> bool {
        match &self.included_relationships {
            Some(included) => included.iter().any(|included| included == name),
            None => true,
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Response envelope produced by resource resolution and filled in by the
/// response formatter plugins. `content` holds the serialized body once the
/// response builder has run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlueResponse {
    #[serde(default)]
    pub resources: Vec<GlueResource>,
    #[serde(default)]
    pub included_relationships: Vec<GlueResource>,
    #[serde(default)]
    pub errors: Vec<ErrorRecord>,
    #[serde(default)]
    pub content: Option<String>,
}

impl GlueResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource: GlueResource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn with_resources(mut self, resources: impl IntoIterator<Item = GlueResource>) -> Self {
        self.resources.extend(resources);
        self
    }

    pub fn with_included(mut self, resource: GlueResource) -> Self {
        self.included_relationships.push(resource);
        self
    }

    pub fn with_error(mut self, error: ErrorRecord) -> Self {
        self.errors.push(error);
        self
    }
}

/// One entry of the JSON:API `errors` array.
///
/// Kept as a flat, order-preserving map so that hosts can carry extra members
/// (`source`, `meta`, ...) without this layer knowing about them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorRecord(IndexMap<String, Value>);

impl ErrorRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, status: u16) -> Self {
        self.with_field("status", status)
    }

    pub fn with_code(self, code: impl Into<String>) -> Self {
        self.with_field("code", code.into())
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        self.with_field("detail", detail.into())
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The record as the flat map written into the `errors` array.
    pub fn to_flat_map(&self) -> IndexMap<String, Value> {
        self.0.clone()
    }
}

impl From<IndexMap<String, Value>> for ErrorRecord {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_id_treats_empty_as_missing() {
        assert_eq!(GlueResource::new("products", "42").resource_id(), Some("42"));
        assert_eq!(GlueResource::new("products", "").resource_id(), None);
        assert_eq!(GlueResource::without_id("products").resource_id(), None);
    }

    #[test]
    fn with_relationship_appends_to_existing_block() {
        let resource = GlueResource::new("products", "1")
            .with_relationship("category", vec![GlueResource::new("categories", "9")])
            .with_relationship("category", vec![GlueResource::new("categories", "10")]);

        assert_eq!(resource.relationships.len(), 1);
        assert_eq!(resource.relationships["category"].resources.len(), 2);
    }

    #[test]
    fn error_record_keeps_insertion_order() {
        let record = ErrorRecord::new()
            .with_code("101")
            .with_status(404)
            .with_detail("Product not found.");

        let keys: Vec<_> = record.to_flat_map().keys().cloned().collect();
        assert_eq!(keys, vec!["code", "status", "detail"]);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"code": "101", "status": 404, "detail": "Product not found."})
        );
    }

    #[test]
    fn include_list_restricts_requested_relationships() {
        let mut request = GlueRequest::new(HttpMethod::Get, "products");
        assert!(request.is_relationship_requested("category"));

        request.included_relationships = Some(vec!["prices".into()]);
        assert!(request.is_relationship_requested("prices"));
        assert!(!request.is_relationship_requested("category"));

        request.included_relationships = Some(Vec::new());
        assert!(!request.is_relationship_requested("prices"));
    }

    #[test]
    fn http_method_serializes_uppercase() {
        assert_eq!(serde_json::to_value(HttpMethod::Post).unwrap(), json!("POST"));
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
