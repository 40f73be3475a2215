//! # Convention Factory
//!
//! Wires every component of the convention from two explicit inputs: the
//! [`JsonApiConventionConfig`] and the host's [`PluginSet`]. Nothing is looked
//! up globally, so two factories with different domains or plugin sets can
//! live side by side (one per test, for instance).
//!
//! ## Wiring
//!
//! ```text
//! JsonApiConvention
//! ├── request builders        SparseField, Relationship, Attributes, then host builders
//! ├── request validators      host validators
//! ├── after-routing validators host validators
//! ├── response formatters     RelationshipResponseBuilderPlugin, then host formatters
//! │   └── RelationshipResponse
//! │       └── ResourceRelationshipLoader (host relationship providers)
//! └── JsonGlueResponseBuilder
//!     └── JsonGlueResponseFormatter
//!         ├── JsonEncoder
//!         └── LinkBuilder (glue_domain)
//! ```
//!
//! Every `create_*` method returns a fresh component; the factory itself holds
//! only the configuration and the plugin set.

use crate::config::JsonApiConventionConfig;
use crate::convention::JsonApiConvention;
use crate::encoder::{JsonDecoder, JsonEncoder};
use crate::plugin::RelationshipResponseBuilderPlugin;
use crate::request::{AttributesRequestBuilder, RelationshipRequestBuilder, SparseFieldRequestBuilder};
use crate::resource::ResourceRelationshipLoader;
use crate::response::{JsonGlueResponseBuilder, JsonGlueResponseFormatter, LinkBuilder, RelationshipResponse};
use glue_framework::{
    PluginKind, PluginSet, RequestBuilderPlugin, RequestValidatorPlugin, ResponseFormatterPlugin,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct GlueJsonApiConventionFactory {
    config: JsonApiConventionConfig,
    plugins: PluginSet,
}

impl GlueJsonApiConventionFactory {
    pub fn new(config: JsonApiConventionConfig, plugins: PluginSet) -> Self {
        Self { config, plugins }
    }

    pub fn config(&self) -> &JsonApiConventionConfig {
        &self.config
    }

    /// Assembles the full request/response pipeline.
    pub fn create_convention(&self) -> JsonApiConvention {
        info!(
            glue_domain = self.config.glue_domain(),
            relationship_providers = self.plugins.count(PluginKind::ResourceRelationship),
            "Creating JSON:API convention"
        );

        JsonApiConvention::new(
            self.create_request_builder_plugins(),
            self.create_request_validator_plugins(),
            self.create_after_routing_validator_plugins(),
            self.create_response_formatter_plugins(),
            self.create_response_builder(),
        )
    }

    // =========================================================================
    // Request side
    // =========================================================================

    pub fn create_request_builder_plugins(&self) -> Vec<Arc<dyn RequestBuilderPlugin>> {
        let mut builders: Vec<Arc<dyn RequestBuilderPlugin>> = vec![
            Arc::new(SparseFieldRequestBuilder),
            Arc::new(RelationshipRequestBuilder),
            Arc::new(AttributesRequestBuilder::new(self.create_json_decoder())),
        ];
        builders.extend(self.plugins.request_builders());
        builders
    }

    pub fn create_request_validator_plugins(&self) -> Vec<Arc<dyn RequestValidatorPlugin>> {
        self.plugins.request_validators()
    }

    pub fn create_after_routing_validator_plugins(&self) -> Vec<Arc<dyn RequestValidatorPlugin>> {
        self.plugins.after_routing_validators()
    }

    // =========================================================================
    // Response side
    // =========================================================================

    pub fn create_response_formatter_plugins(&self) -> Vec<Arc<dyn ResponseFormatterPlugin>> {
        let mut formatters: Vec<Arc<dyn ResponseFormatterPlugin>> =
            vec![Arc::new(self.create_relationship_response_builder_plugin())];
        formatters.extend(self.plugins.response_formatters());
        formatters
    }

    pub fn create_relationship_response_builder_plugin(&self) -> RelationshipResponseBuilderPlugin {
        RelationshipResponseBuilderPlugin::new(self.create_relationship_response())
    }

    pub fn create_relationship_response(&self) -> RelationshipResponse {
        RelationshipResponse::new(self.create_resource_relationship_loader())
    }

    pub fn create_resource_relationship_loader(&self) -> ResourceRelationshipLoader {
        ResourceRelationshipLoader::new(self.plugins.relationship_providers())
    }

    pub fn create_response_builder(&self) -> JsonGlueResponseBuilder {
        JsonGlueResponseBuilder::new(self.create_response_formatter())
    }

    pub fn create_response_formatter(&self) -> JsonGlueResponseFormatter {
        JsonGlueResponseFormatter::new(self.create_json_encoder(), &self.config)
    }

    pub fn create_link_builder(&self) -> LinkBuilder {
        LinkBuilder::new(&self.config)
    }

    pub fn create_json_encoder(&self) -> JsonEncoder {
        JsonEncoder
    }

    pub fn create_json_decoder(&self) -> JsonDecoder {
        JsonDecoder
    }
}
