//! Response formatter plugins shipped with the convention.

use crate::response::RelationshipResponse;
use glue_framework::{FrameworkError, GlueRequest, GlueResponse, ResponseFormatterPlugin};

/// Expands relationships and fills `included` before the document is serialized.
///
/// Responses that already carry errors pass through unchanged.
#[derive(Debug, Clone)]
pub struct RelationshipResponseBuilderPlugin {
    relationship_response: RelationshipResponse,
}

impl RelationshipResponseBuilderPlugin {
    pub fn new(relationship_response: RelationshipResponse) -> Self {
        Self { relationship_response }
    }
}

impl ResponseFormatterPlugin for RelationshipResponseBuilderPlugin {
    fn format(&self, response: GlueResponse, request: &GlueRequest) -> Result<GlueResponse, FrameworkError> {
        if !response.errors.is_empty() || response.resources.is_empty() {
            return Ok(response);
        }
        self.relationship_response.build_relationship_response(response, request)
    }
}
