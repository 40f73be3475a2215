//! # Plugin Contracts
//!
//! The convention layer is extended through a small, fixed set of plugin
//! kinds. Each kind is a narrow, function-shaped contract: transform a request
//! in, validate it, transform a response out, or supply related resources.
//!
//! ## Architecture Note
//!
//! The host registers plugins once, at startup, into a [`PluginSet`]. The set is
//! handed to the convention factory by value; there is no global registry and
//! no lookup by string key. Components depend on the traits only, never on a
//! concrete plugin type.
//!
//! | Kind | Contract | Runs |
//! |------|----------|------|
//! | [`PluginKind::RequestBuilder`] | [`RequestBuilderPlugin`] | before validation |
//! | [`PluginKind::RequestValidator`] | [`RequestValidatorPlugin`] | before routing |
//! | [`PluginKind::RequestAfterRoutingValidator`] | [`RequestValidatorPlugin`] | after routing |
//! | [`PluginKind::ResponseFormatter`] | [`ResponseFormatterPlugin`] | after resolution |
//! | [`PluginKind::ResourceRelationship`] | [`ResourceRelationshipPlugin`] | from the relationship response builder |

use crate::error::FrameworkError;
use crate::transfer::{ErrorRecord, GlueRequest, GlueResource, GlueResponse};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The fixed set of plugin kinds the convention understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginKind {
    RequestBuilder,
    RequestValidator,
    RequestAfterRoutingValidator,
    ResponseFormatter,
    ResourceRelationship,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PluginKind::RequestBuilder => "request builder",
            PluginKind::RequestValidator => "request validator",
            PluginKind::RequestAfterRoutingValidator => "after-routing validator",
            PluginKind::ResponseFormatter => "response formatter",
            PluginKind::ResourceRelationship => "resource relationship",
        };
        f.write_str(label)
    }
}

/// Last path segment of a type name (e.g. `SparseFieldRequestBuilder` instead
/// of `glue_jsonapi::request::sparse_field_builder::SparseFieldRequestBuilder`).
pub fn short_type_name<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}

/// Enriches the request before it is validated and routed.
pub trait RequestBuilderPlugin: Send + Sync {
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    fn build(&self, request: GlueRequest) -> Result<GlueRequest, FrameworkError>;
}

/// Checks a request and returns the errors it found. An empty vector means valid.
pub trait RequestValidatorPlugin: Send + Sync {
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    fn validate(&self, request: &GlueRequest) -> Vec<ErrorRecord>;
}

/// Post-processes a resolved response before it is serialized.
pub trait ResponseFormatterPlugin: Send + Sync {
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    fn format(&self, response: GlueResponse, request: &GlueRequest) -> Result<GlueResponse, FrameworkError>;
}

/// Supplies the resources related to a primary resource of one declared type.
///
/// # Example
///
/// ```rust
/// use glue_framework::{FrameworkError, GlueRequest, GlueResource, ResourceRelationshipPlugin};
///
/// struct ProductCategories;
///
/// impl ResourceRelationshipPlugin for ProductCategories {
///     fn resource_type(&self) -> &str { "products" }
///     fn relationship_name(&self) -> &str { "category" }
///     fn related_resources(&self, product: &GlueResource, _: &GlueRequest)
///         -> Result<Vec<GlueResource>, FrameworkError>
///     {
///         Ok(product.resource_id()
///             .map(|_| vec![GlueResource::new("categories", "9")])
///             .unwrap_or_default())
///     }
/// }
/// ```
pub trait ResourceRelationshipPlugin: Send + Sync {
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// The primary resource type this provider attaches relationships to.
    fn resource_type(&self) -> &str;

    /// Key under which related resources are stored and matched against `include`.
    fn relationship_name(&self) -> &str;

    fn related_resources(
        &self,
        resource: &GlueResource,
        request: &GlueRequest,
    ) -> Result<Vec<GlueResource>, FrameworkError>;
}

/// One registered plugin, tagged with its kind.
#[derive(Clone)]
pub enum Plugin {
    RequestBuilder(Arc<dyn RequestBuilderPlugin>),
    RequestValidator(Arc<dyn RequestValidatorPlugin>),
    RequestAfterRoutingValidator(Arc<dyn RequestValidatorPlugin>),
    ResponseFormatter(Arc<dyn ResponseFormatterPlugin>),
    ResourceRelationship(Arc<dyn ResourceRelationshipPlugin>),
}

impl Plugin {
    pub fn kind(&self) -> PluginKind {
        match self {
            Plugin::RequestBuilder(_) => PluginKind::RequestBuilder,
            Plugin::RequestValidator(_) => PluginKind::RequestValidator,
            Plugin::RequestAfterRoutingValidator(_) => PluginKind::RequestAfterRoutingValidator,
            Plugin::ResponseFormatter(_) => PluginKind::ResponseFormatter,
            Plugin::ResourceRelationship(_) => PluginKind::ResourceRelationship,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Plugin::RequestBuilder(plugin) => plugin.name(),
            Plugin::RequestValidator(plugin) => plugin.name(),
            Plugin::RequestAfterRoutingValidator(plugin) => plugin.name(),
            Plugin::ResponseFormatter(plugin) => plugin.name(),
            Plugin::ResourceRelationship(plugin) => plugin.name(),
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// Every plugin the host registered, in registration order.
///
/// ```rust
/// use glue_framework::{PluginKind, PluginSet};
///
/// let plugins = PluginSet::new();
/// assert_eq!(plugins.count(PluginKind::ResponseFormatter), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PluginSet {
    plugins: Vec<Plugin>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Plugin) {
        debug!(kind = %plugin.kind(), plugin = plugin.name(), "Registered plugin");
        self.plugins.push(plugin);
    }

    pub fn with(mut self, plugin: Plugin) -> Self {
        self.register(plugin);
        self
    }

    pub fn with_request_builder(self, plugin: impl RequestBuilderPlugin + 'static) -> Self {
        self.with(Plugin::RequestBuilder(Arc::new(plugin)))
    }

    pub fn with_request_validator(self, plugin: impl RequestValidatorPlugin + 'static) -> Self {
        self.with(Plugin::RequestValidator(Arc::new(plugin)))
    }

    pub fn with_after_routing_validator(self, plugin: impl RequestValidatorPlugin + 'static) -> Self {
        self.with(Plugin::RequestAfterRoutingValidator(Arc::new(plugin)))
    }

    pub fn with_response_formatter(self, plugin: impl ResponseFormatterPlugin + 'static) -> Self {
        self.with(Plugin::ResponseFormatter(Arc::new(plugin)))
    }

    pub fn with_relationship_provider(self, plugin: impl ResourceRelationshipPlugin + 'static) -> Self {
        self.with(Plugin::ResourceRelationship(Arc::new(plugin)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.iter()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn count(&self, kind: PluginKind) -> usize {
        self.plugins.iter().filter(|plugin| plugin.kind() == kind).count()
    }

    pub fn request_builders(&self) -> Vec<Arc<dyn RequestBuilderPlugin>> {
        self.plugins
            .iter()
            .filter_map(|plugin| match plugin {
                Plugin::RequestBuilder(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn request_validators(&self) -> Vec<Arc<dyn RequestValidatorPlugin>> {
        self.plugins
            .iter()
            .filter_map(|plugin| match plugin {
                Plugin::RequestValidator(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn after_routing_validators(&self) -> Vec<Arc<dyn RequestValidatorPlugin>> {
        self.plugins
            .iter()
            .filter_map(|plugin| match plugin {
                Plugin::RequestAfterRoutingValidator(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn response_formatters(&self) -> Vec<Arc<dyn ResponseFormatterPlugin>> {
        self.plugins
            .iter()
            .filter_map(|plugin| match plugin {
                Plugin::ResponseFormatter(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn relationship_providers(&self) -> Vec<Arc<dyn ResourceRelationshipPlugin>> {
        self.plugins
            .iter()
            .filter_map(|plugin| match plugin {
                Plugin::ResourceRelationship(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseType;

    impl RequestBuilderPlugin for UppercaseType {
        fn build(&self, mut request: GlueRequest) -> Result<GlueRequest, FrameworkError> {
            request.resource.resource_type = request.resource.resource_type.to_uppercase();
            Ok(request)
        }
    }

    struct RejectEverything;

    impl RequestValidatorPlugin for RejectEverything {
        fn validate(&self, _request: &GlueRequest) -> Vec<ErrorRecord> {
            vec![ErrorRecord::new().with_status(400)]
        }
    }

    #[test]
    fn plugin_set_keeps_kinds_apart() {
        let plugins = PluginSet::new()
            .with_request_builder(UppercaseType)
            .with_request_validator(RejectEverything)
            .with_after_routing_validator(RejectEverything);

        assert_eq!(plugins.len(), 3);
        assert_eq!(plugins.count(PluginKind::RequestBuilder), 1);
        assert_eq!(plugins.request_validators().len(), 1);
        assert_eq!(plugins.after_routing_validators().len(), 1);
        assert!(plugins.response_formatters().is_empty());
        assert!(plugins.relationship_providers().is_empty());
    }

    #[test]
    fn default_name_is_short_type_name() {
        assert_eq!(UppercaseType.name(), "UppercaseType");
        let plugin = Plugin::RequestValidator(Arc::new(RejectEverything));
        assert_eq!(plugin.name(), "RejectEverything");
        assert_eq!(plugin.kind(), PluginKind::RequestValidator);
    }

    #[test]
    fn request_builder_contract_transforms_request() {
        let request = GlueRequest::new(crate::HttpMethod::Get, "products");
        let built = UppercaseType.build(request).unwrap();
        assert_eq!(built.resource.resource_type, "PRODUCTS");
    }
}
