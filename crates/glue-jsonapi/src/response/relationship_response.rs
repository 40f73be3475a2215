//! # Relationship Response Builder
//!
//! Attaches related resources to a resolved response and collects them into
//! `included`.
//!
//! ## Algorithm
//!
//! 1. Every primary resource asks the providers loaded for its type
//!    ([`ResourceRelationshipLoader::load`]) for related resources. Providers
//!    whose relationship name is not in the request's `include` list are
//!    skipped. Without an `include` list all of them run; an empty list runs none.
//! 2. Related resources are expanded the same way, level by level (breadth
//!    first), down to [`MAX_RELATIONSHIP_DEPTH`]. A `(type, id)` pair is expanded
//!    only once, at the shallowest level it occurs, so cycles such as
//!    `products -> categories -> products` terminate without cutting short a
//!    resource that also appears higher up. Resources without an id are always
//!    expanded.
//! 3. `included` receives every related resource reachable from the primaries,
//!    level by level in encounter order, never repeating primary data. Resources
//!    with an id appear once per `(type, id)`; resources without an id cannot be
//!    told apart and are all kept.

use crate::resource::ResourceRelationshipLoader;
use glue_framework::{FrameworkError, GlueRequest, GlueResource, GlueResponse};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// How many relationship levels below the primary resources are expanded.
pub const MAX_RELATIONSHIP_DEPTH: usize = 5;

type ResourceKey = (String, String);

fn resource_key(resource: &GlueResource) -> ResourceKey {
    let (resource_type, id) = resource.identity();
    (resource_type.to_string(), id.to_string())
}

#[derive(Debug, Clone)]
pub struct RelationshipResponse {
    loader: ResourceRelationshipLoader,
}

impl RelationshipResponse {
    pub fn new(loader: ResourceRelationshipLoader) -> Self {
        Self { loader }
    }

    #[instrument(skip_all, fields(resource_type = %request.resource.resource_type))]
    pub fn build_relationship_response(
        &self,
        mut response: GlueResponse,
        request: &GlueRequest,
    ) -> Result<GlueResponse, FrameworkError> {
        let mut expanded: HashSet<ResourceKey> = identified_keys(&response.resources).collect();

        for resource in response.resources.iter_mut() {
            self.attach_relationships(resource, request)?;
        }
        for depth in 1..=MAX_RELATIONSHIP_DEPTH {
            let mut reached = false;
            for resource in response.resources.iter_mut() {
                reached |= self.expand_level(resource, request, &mut expanded, depth)?;
            }
            if !reached {
                break;
            }
        }

        let existing = std::mem::take(&mut response.included_relationships);
        response.included_relationships = collect_included(&response.resources, existing);
        debug!(included = response.included_relationships.len(), "Collected included resources");

        Ok(response)
    }

    /// Expands the related resources `remaining` levels below `resource`.
    /// Returns whether any resource sits at that level.
    fn expand_level(
        &self,
        resource: &mut GlueResource,
        request: &GlueRequest,
        expanded: &mut HashSet<ResourceKey>,
        remaining: usize,
    ) -> Result<bool, FrameworkError> {
        let mut reached = false;
        for block in resource.relationships.values_mut() {
            for related in block.resources.iter_mut() {
                if remaining > 1 {
                    reached |= self.expand_level(related, request, expanded, remaining - 1)?;
                    continue;
                }
                reached = true;
                if related.resource_id().is_some() && !expanded.insert(resource_key(related)) {
                    continue;
                }
                self.attach_relationships(related, request)?;
            }
        }
        Ok(reached)
    }

    fn attach_relationships(&self, resource: &mut GlueResource, request: &GlueRequest) -> Result<(), FrameworkError> {
        for provider in self.loader.load(&resource.resource_type) {
            let relationship_name = provider.relationship_name();
            if !request.is_relationship_requested(relationship_name) {
                continue;
            }

            let related = provider.related_resources(resource, request)?;
            debug!(
                resource_type = %resource.resource_type,
                id = resource.resource_id().unwrap_or_default(),
                relationship = relationship_name,
                count = related.len(),
                "Attached relationship"
            );
            if !related.is_empty() {
                resource.add_relationship(relationship_name, related);
            }
        }
        Ok(())
    }
}

fn identified_keys(resources: &[GlueResource]) -> impl Iterator<Item = ResourceKey> + '_ {
    resources
        .iter()
        .filter(|resource| resource.resource_id().is_some())
        .map(resource_key)
}

/// Flattens the relationship graph below `primary` into the `included` list,
/// one level at a time.
fn collect_included(primary: &[GlueResource], existing: Vec<GlueResource>) -> Vec<GlueResource> {
    let mut seen: HashSet<ResourceKey> = identified_keys(primary).collect();
    let mut included = Vec::new();

    for resource in existing {
        if resource.resource_id().is_none() || seen.insert(resource_key(&resource)) {
            included.push(resource);
        }
    }

    let mut level: Vec<&GlueResource> = primary.iter().collect();
    while !level.is_empty() {
        let mut next = Vec::new();
        for resource in level {
            for related in resource.relationships.values().flat_map(|block| &block.resources) {
                if related.resource_id().is_none() || seen.insert(resource_key(related)) {
                    included.push(related.clone());
                }
                next.push(related);
            }
        }
        level = next;
    }

    included
}
