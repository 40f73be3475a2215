use glue_framework::{FrameworkError, GlueRequest, RequestBuilderPlugin};
use tracing::debug;

const INCLUDE: &str = "include";

/// Reads `include=a,b.c` into the request's included relationship names.
///
/// Dotted paths contribute every segment, since relationship names are matched
/// at any depth of the expansion. An empty `include=` asks for no relationships
/// and is kept apart from a missing one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipRequestBuilder;

impl RequestBuilderPlugin for RelationshipRequestBuilder {
    fn build(&self, mut request: GlueRequest) -> Result<GlueRequest, FrameworkError> {
        let Some(include) = request.query_fields.get(INCLUDE) else {
            return Ok(request);
        };

        let mut names: Vec<String> = Vec::new();
        for segment in include.split([',', '.']).map(str::trim) {
            if !segment.is_empty() && !names.iter().any(|name| name == segment) {
                names.push(segment.to_string());
            }
        }
        debug!(?names, "Parsed include");

        request.included_relationships = Some(names);
        Ok(request)
    }
}
