use crate::error::ConventionError;
use crate::response::formatter::JsonGlueResponseFormatter;
use glue_framework::{GlueRequest, GlueResponse};
use tracing::instrument;

/// Serializes a finished response into its `content`.
///
/// Errors win over resources: a response carrying both is written as an
/// error document.
#[derive(Debug, Clone)]
pub struct JsonGlueResponseBuilder {
    formatter: JsonGlueResponseFormatter,
}

impl JsonGlueResponseBuilder {
    pub fn new(formatter: JsonGlueResponseFormatter) -> Self {
        Self { formatter }
    }

    #[instrument(skip_all, fields(resource_type = %request.resource.resource_type))]
    pub fn build_response(
        &self,
        mut response: GlueResponse,
        request: &GlueRequest,
    ) -> Result<GlueResponse, ConventionError> {
        let content = if !response.errors.is_empty() {
            self.formatter.format_error_response(&response.errors, request)?
        } else if response.resources.is_empty() {
            self.formatter.format_response_with_empty_resource(request)?
        } else {
            self.formatter
                .format_response_data(&response, &request.sparse_fields, request)?
        };

        response.content = Some(content);
        Ok(response)
    }
}
