//! # JSON:API Convention Pipeline
//!
//! [`JsonApiConvention`] drives one request through the convention:
//!
//! ```text
//! GlueRequest ─► request builders ─► request validators ─► after-routing validators
//!                                          │ errors               │ errors
//!                                          ▼                      ▼
//!                                    error document         error document
//!
//!             ─► host resolves resources ─► response formatters ─► JSON response builder ─► GlueResponse.content
//! ```
//!
//! Validators never short-circuit each other within a stage: all errors of a
//! stage are collected, in plugin order, before the pipeline stops.
//!
//! ## Example
//!
//! ```rust
//! use glue_framework::{GlueRequest, GlueResource, GlueResponse, HttpMethod, PluginSet};
//! use glue_jsonapi::{GlueJsonApiConventionFactory, JsonApiConventionConfig};
//!
//! let convention = GlueJsonApiConventionFactory::new(
//!     JsonApiConventionConfig::new("https://api.example.com"),
//!     PluginSet::new(),
//! )
//! .create_convention();
//!
//! let request = GlueRequest::new(HttpMethod::Get, "products").with_id("42");
//! let response = convention
//!     .handle(request, |_| {
//!         GlueResponse::new().with_resource(GlueResource::new("products", "42"))
//!     })
//!     .unwrap();
//!
//! assert_eq!(
//!     response.content.as_deref(),
//!     Some(r#"{"data":{"type":"products","id":"42","links":{"self":"https://api.example.com/products/42"}},"included":[]}"#)
//! );
//! ```

use crate::error::ConventionError;
use crate::response::JsonGlueResponseBuilder;
use glue_framework::{
    ErrorRecord, GlueRequest, GlueResponse, RequestBuilderPlugin, RequestValidatorPlugin, ResponseFormatterPlugin,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct JsonApiConvention {
    request_builders: Vec<Arc<dyn RequestBuilderPlugin>>,
    request_validators: Vec<Arc<dyn RequestValidatorPlugin>>,
    after_routing_validators: Vec<Arc<dyn RequestValidatorPlugin>>,
    response_formatters: Vec<Arc<dyn ResponseFormatterPlugin>>,
    response_builder: JsonGlueResponseBuilder,
}

impl JsonApiConvention {
    pub fn new(
        request_builders: Vec<Arc<dyn RequestBuilderPlugin>>,
        request_validators: Vec<Arc<dyn RequestValidatorPlugin>>,
        after_routing_validators: Vec<Arc<dyn RequestValidatorPlugin>>,
        response_formatters: Vec<Arc<dyn ResponseFormatterPlugin>>,
        response_builder: JsonGlueResponseBuilder,
    ) -> Self {
        Self {
            request_builders,
            request_validators,
            after_routing_validators,
            response_formatters,
            response_builder,
        }
    }

    /// Runs the whole pipeline. `resolve` stands in for the host's routing and
    /// resource resolution and only runs for valid requests.
    #[instrument(skip_all, fields(method = %request.method, resource_type = %request.resource.resource_type))]
    pub fn handle<F>(&self, request: GlueRequest, resolve: F) -> Result<GlueResponse, ConventionError>
    where
        F: FnOnce(&GlueRequest) -> GlueResponse,
    {
        let request = self.build_request(request)?;

        let errors = self.validate_request(&request);
        if !errors.is_empty() {
            return self.error_response(errors, &request);
        }

        let errors = self.validate_after_routing(&request);
        if !errors.is_empty() {
            return self.error_response(errors, &request);
        }

        let response = resolve(&request);
        info!(
            resources = response.resources.len(),
            errors = response.errors.len(),
            "Resolved resources"
        );

        self.format_response(response, &request)
    }

    /// Applies every request builder in order.
    pub fn build_request(&self, request: GlueRequest) -> Result<GlueRequest, ConventionError> {
        let mut request = request;
        for builder in &self.request_builders {
            request = builder.build(request)?;
            debug!(builder = builder.name(), "Applied request builder");
        }
        Ok(request)
    }

    pub fn validate_request(&self, request: &GlueRequest) -> Vec<ErrorRecord> {
        Self::collect_errors(&self.request_validators, request)
    }

    pub fn validate_after_routing(&self, request: &GlueRequest) -> Vec<ErrorRecord> {
        Self::collect_errors(&self.after_routing_validators, request)
    }

    /// Runs the response formatter plugins, then serializes the result into `content`.
    pub fn format_response(&self, response: GlueResponse, request: &GlueRequest) -> Result<GlueResponse, ConventionError> {
        let mut response = response;
        for formatter in &self.response_formatters {
            response = formatter.format(response, request)?;
            debug!(formatter = formatter.name(), "Applied response formatter");
        }
        self.response_builder.build_response(response, request)
    }

    fn error_response(&self, errors: Vec<ErrorRecord>, request: &GlueRequest) -> Result<GlueResponse, ConventionError> {
        info!(errors = errors.len(), "Request rejected");
        let response = GlueResponse {
            errors,
            ..GlueResponse::default()
        };
        self.response_builder.build_response(response, request)
    }

    fn collect_errors(validators: &[Arc<dyn RequestValidatorPlugin>], request: &GlueRequest) -> Vec<ErrorRecord> {
        validators
            .iter()
            .flat_map(|validator| {
                let errors = validator.validate(request);
                debug!(validator = validator.name(), errors = errors.len(), "Validated request");
                errors
            })
            .collect()
    }
}

impl std::fmt::Debug for JsonApiConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonApiConvention")
            .field("request_builders", &self.request_builders.len())
            .field("request_validators", &self.request_validators.len())
            .field("after_routing_validators", &self.after_routing_validators.len())
            .field("response_formatters", &self.response_formatters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonApiConventionConfig;
    use crate::factory::GlueJsonApiConventionFactory;
    use glue_framework::{FrameworkError, GlueResource, HttpMethod, PluginKind, PluginSet};

    struct RejectWithCode(&'static str);

    impl RequestValidatorPlugin for RejectWithCode {
        fn validate(&self, _request: &GlueRequest) -> Vec<ErrorRecord> {
            vec![ErrorRecord::new().with_status(422).with_code(self.0)]
        }
    }

    struct FailingBuilder;

    impl RequestBuilderPlugin for FailingBuilder {
        fn build(&self, _request: GlueRequest) -> Result<GlueRequest, FrameworkError> {
            Err(FrameworkError::plugin_failed(PluginKind::RequestBuilder, self.name(), "boom"))
        }
    }

    fn convention(plugins: PluginSet) -> JsonApiConvention {
        GlueJsonApiConventionFactory::new(JsonApiConventionConfig::new("https://api.example.com"), plugins)
            .create_convention()
    }

    #[test]
    fn validator_errors_skip_resolution() {
        let convention = convention(
            PluginSet::new()
                .with_request_validator(RejectWithCode("901"))
                .with_request_validator(RejectWithCode("902"))
                .with_after_routing_validator(RejectWithCode("999")),
        );

        let response = convention
            .handle(GlueRequest::new(HttpMethod::Get, "products"), |_| {
                panic!("resolver must not run for invalid requests")
            })
            .unwrap();

        assert_eq!(
            response.content.as_deref(),
            Some(r#"{"errors":[{"status":422,"code":"901"},{"status":422,"code":"902"}]}"#)
        );
    }

    #[test]
    fn after_routing_errors_skip_resolution() {
        let convention = convention(PluginSet::new().with_after_routing_validator(RejectWithCode("999")));

        let response = convention
            .handle(GlueRequest::new(HttpMethod::Get, "products"), |_| {
                panic!("resolver must not run for invalid requests")
            })
            .unwrap();

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].get("code"), Some(&serde_json::json!("999")));
    }

    #[test]
    fn builder_failure_is_returned() {
        let convention = convention(PluginSet::new().with_request_builder(FailingBuilder));

        let result = convention.handle(GlueRequest::new(HttpMethod::Get, "products"), |_| GlueResponse::new());

        assert!(matches!(
            result,
            Err(ConventionError::Framework(FrameworkError::PluginFailed { .. }))
        ));
    }

    #[test]
    fn resolver_sees_built_request() {
        let convention = convention(PluginSet::new());
        let request = GlueRequest::new(HttpMethod::Get, "products")
            .with_query_field("fields[products]", "name")
            .with_query_field("include", "category");

        let response = convention
            .handle(request, |request| {
                assert_eq!(request.sparse_fields["products"], vec!["name"]);
                assert_eq!(request.included_relationships, Some(vec!["category".to_string()]));
                GlueResponse::new().with_resource(
                    GlueResource::new("products", "1")
                        .with_attribute("name", "Widget")
                        .with_attribute("sku", "W-1"),
                )
            })
            .unwrap();

        let document: serde_json::Value = serde_json::from_str(response.content.as_deref().unwrap()).unwrap();
        assert_eq!(document["data"][0]["attributes"], serde_json::json!({"name": "Widget"}));
        assert_eq!(
            document["links"]["self"],
            "https://api.example.com/products?fields[products]=name&include=category"
        );
    }
}
