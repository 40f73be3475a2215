//! # Link Builder
//!
//! Derives the `self` links written into resource objects and the top-level
//! `links` of collection documents. Every link has the form
//! `{glue_domain}/{path}{query}` where the query string is rebuilt from the
//! request (see [`build_query_string`]).

use crate::config::JsonApiConventionConfig;
use crate::response::query::build_query_string;
use glue_framework::{GlueRequest, GlueResource, HttpMethod};
use indexmap::IndexMap;

pub const LINK_SELF: &str = "self";

/// Link name to absolute URL.
pub type Links = IndexMap<String, String>;

#[derive(Debug, Clone)]
pub struct LinkBuilder {
    glue_domain: String,
}

impl LinkBuilder {
    pub fn new(config: &JsonApiConventionConfig) -> Self {
        Self {
            glue_domain: config.glue_domain().to_string(),
        }
    }

    /// `{self: domain/type[/id][?query]}`. The id segment is left out when the
    /// resource has no id.
    pub fn resource_self_link(&self, resource: &GlueResource, request: &GlueRequest) -> Links {
        let path = match resource.resource_id() {
            Some(id) => format!("{}/{}", resource.resource_type, id),
            None => resource.resource_type.clone(),
        };
        self.self_link(&path, request)
    }

    /// `{self: domain/type[?query]}` for a `GET` without a resource id, empty otherwise.
    pub fn collection_link(&self, request: &GlueRequest) -> Links {
        if request.method != HttpMethod::Get || request.resource.id.is_some() {
            return Links::new();
        }
        self.self_link(&request.resource.resource_type, request)
    }

    fn self_link(&self, path: &str, request: &GlueRequest) -> Links {
        let query = build_query_string(&request.query_fields);
        let mut links = Links::new();
        links.insert(LINK_SELF.to_string(), format!("{}/{}{}", self.glue_domain, path, query));
        links
    }
}
