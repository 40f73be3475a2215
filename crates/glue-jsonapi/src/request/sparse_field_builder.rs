use glue_framework::{FrameworkError, GlueRequest, RequestBuilderPlugin};
use tracing::debug;

const FIELDS_PREFIX: &str = "fields[";
const FIELDS_SUFFIX: &str = "]";

/// Reads `fields[<type>]=a,b` query parameters into the request's sparse fieldsets.
///
/// Blank entries are dropped, so `fields[products]=` restricts `products` to
/// no attributes at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseFieldRequestBuilder;

impl RequestBuilderPlugin for SparseFieldRequestBuilder {
    fn build(&self, mut request: GlueRequest) -> Result<GlueRequest, FrameworkError> {
        for (name, value) in &request.query_fields {
            let Some(resource_type) = name
                .strip_prefix(FIELDS_PREFIX)
                .and_then(|rest| rest.strip_suffix(FIELDS_SUFFIX))
                .filter(|resource_type| !resource_type.is_empty())
            else {
                continue;
            };

            let fields: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect();
            debug!(resource_type, fields = fields.len(), "Parsed sparse fieldset");

            request.sparse_fields.insert(resource_type.to_string(), fields);
        }

        Ok(request)
    }
}
