//! # Response Envelope Assembler
//!
//! Turns a resolved [`GlueResponse`] into a JSON:API document.
//!
//! ## Per-object rules
//!
//! Every primary and included resource becomes a resource object:
//!
//! - `type` is always written
//! - `id` is omitted when missing or empty
//! - `attributes` is omitted when empty, and restricted to the requested
//!   sparse fieldset when one exists for the resource type
//! - `relationships` is reduced to identifiers (see [`filter_resource_relationships`])
//!   and omitted when nothing is left
//! - `links` is kept verbatim when the resolver set any, otherwise a `self`
//!   link is derived
//!
//! ## Document shape
//!
//! | Condition | `data` | top-level `links` |
//! |-----------|--------|-------------------|
//! | one resource and (request id set or `POST`) | single object | never |
//! | anything else | array | always; `self` only for `GET` without id, `{}` otherwise |
//!
//! `included` is always written for resource documents, even when empty.
//! Members are written in the order `data`, `links`, `included`.

use crate::config::JsonApiConventionConfig;
use crate::encoder::JsonEncoder;
use crate::error::ConventionError;
use crate::response::links::{LinkBuilder, Links};
use crate::response::relationship_filter::{filter_resource_relationships, FilteredRelationships};
use glue_framework::{ErrorRecord, GlueRequest, GlueResource, GlueResponse, HttpMethod, SparseFields};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct ResourceObject<'a> {
    #[serde(rename = "type")]
    resource_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<&'a str, &'a Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    relationships: FilteredRelationships,
    links: Links,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PrimaryData<'a> {
    Single(ResourceObject<'a>),
    Collection(Vec<ResourceObject<'a>>),
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    data: PrimaryData<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    included: Option<Vec<ResourceObject<'a>>>,
}

#[derive(Debug, Serialize)]
struct ErrorDocument {
    errors: Vec<IndexMap<String, Value>>,
}

/// Formats resource, empty and error documents.
#[derive(Debug, Clone)]
pub struct JsonGlueResponseFormatter {
    encoder: JsonEncoder,
    link_builder: LinkBuilder,
}

impl JsonGlueResponseFormatter {
    pub fn new(encoder: JsonEncoder, config: &JsonApiConventionConfig) -> Self {
        Self {
            encoder,
            link_builder: LinkBuilder::new(config),
        }
    }

    /// Formats the resources and included relationships of `response`.
    ///
    /// `sparse_fields` maps a resource type to the attributes to keep; types
    /// without an entry keep all attributes.
    #[instrument(skip_all, fields(resource_type = %request.resource.resource_type, method = %request.method))]
    pub fn format_response_data(
        &self,
        response: &GlueResponse,
        sparse_fields: &SparseFields,
        request: &GlueRequest,
    ) -> Result<String, ConventionError> {
        let mut data = self.resource_objects(&response.resources, sparse_fields, request);
        let included = self.resource_objects(&response.included_relationships, sparse_fields, request);

        let document = if Self::is_single_object_request(request, data.len()) {
            debug!(included = included.len(), "Formatted single-object response");
            Document {
                data: PrimaryData::Single(data.remove(0)),
                links: None,
                included: Some(included),
            }
        } else {
            debug!(resources = data.len(), included = included.len(), "Formatted collection response");
            Document {
                data: PrimaryData::Collection(data),
                links: Some(self.link_builder.collection_link(request)),
                included: Some(included),
            }
        };

        self.encoder.encode(&document)
    }

    /// `{"data": [], "links": ...}` for a query that matched nothing.
    #[instrument(skip_all, fields(resource_type = %request.resource.resource_type))]
    pub fn format_response_with_empty_resource(&self, request: &GlueRequest) -> Result<String, ConventionError> {
        let document = Document {
            data: PrimaryData::Collection(Vec::new()),
            links: Some(self.link_builder.collection_link(request)),
            included: None,
        };
        debug!("Formatted empty response");

        self.encoder.encode(&document)
    }

    /// `{"errors": [...]}` with every record flattened, in input order.
    #[instrument(skip_all, fields(resource_type = %request.resource.resource_type))]
    pub fn format_error_response(
        &self,
        errors: &[ErrorRecord],
        request: &GlueRequest,
    ) -> Result<String, ConventionError> {
        let document = ErrorDocument {
            errors: errors.iter().map(ErrorRecord::to_flat_map).collect(),
        };
        debug!(errors = document.errors.len(), "Formatted error response");

        self.encoder.encode(&document)
    }

    fn is_single_object_request(request: &GlueRequest, resource_count: usize) -> bool {
        let has_id = request.resource.id.as_deref().is_some_and(|id| !id.is_empty());
        resource_count == 1 && (has_id || request.method == HttpMethod::Post)
    }

    fn resource_objects<'a>(
        &self,
        resources: &'a [GlueResource],
        sparse_fields: &SparseFields,
        request: &GlueRequest,
    ) -> Vec<ResourceObject<'a>> {
        resources
            .iter()
            .map(|resource| self.resource_object(resource, sparse_fields, request))
            .collect()
    }

    fn resource_object<'a>(
        &self,
        resource: &'a GlueResource,
        sparse_fields: &SparseFields,
        request: &GlueRequest,
    ) -> ResourceObject<'a> {
        let allowed = sparse_fields.get(&resource.resource_type);
        let attributes = resource
            .attributes
            .iter()
            .filter(|(name, _)| match allowed {
                Some(fields) => fields.iter().any(|field| field == *name),
                None => true,
            })
            .map(|(name, value)| (name.as_str(), value))
            .collect();

        let links = if resource.links.is_empty() {
            self.link_builder.resource_self_link(resource, request)
        } else {
            resource.links.clone()
        };

        ResourceObject {
            resource_type: &resource.resource_type,
            id: resource.resource_id(),
            attributes,
            relationships: filter_resource_relationships(&resource.relationships),
            links,
        }
    }
}
