use glue_framework::tracing::setup_tracing;
use glue_framework::{GlueRequest, HttpMethod, PluginSet};
use glue_jsonapi::storefront::{Catalog, ProductCategoryProvider, SupportedResourceValidator, PRODUCTS};
use glue_jsonapi::{ConventionError, GlueJsonApiConventionFactory, JsonApiConventionConfig};
use std::sync::Arc;
use tracing::{info, warn};

const DEFAULT_GLUE_DOMAIN: &str = "https://glue.example.com";

fn main() -> Result<(), ConventionError> {
    setup_tracing();

    let config = JsonApiConventionConfig::from_env().unwrap_or_else(|e| {
        warn!(error = %e, domain = DEFAULT_GLUE_DOMAIN, "Falling back to default domain");
        JsonApiConventionConfig::new(DEFAULT_GLUE_DOMAIN)
    });

    let catalog = Arc::new(Catalog::sample());
    let plugins = PluginSet::new()
        .with_request_validator(SupportedResourceValidator)
        .with_relationship_provider(ProductCategoryProvider::new(catalog.clone()));
    let convention = GlueJsonApiConventionFactory::new(config, plugins).create_convention();

    let requests = vec![
        GlueRequest::new(HttpMethod::Get, PRODUCTS)
            .with_query_field("include", "category")
            .with_query_field("fields[products]", "name,price"),
        GlueRequest::new(HttpMethod::Get, PRODUCTS).with_id("W-1"),
        GlueRequest::new(HttpMethod::Get, PRODUCTS).with_id("X-0"),
        GlueRequest::new(HttpMethod::Get, "wishlists"),
    ];

    for request in requests {
        let span = tracing::info_span!("request", method = %request.method, resource_type = %request.resource.resource_type);
        let _guard = span.enter();

        let response = convention.handle(request, |request| catalog.resolve(request))?;
        info!(errors = response.errors.len(), "Response formatted");
        println!("{}", response.content.unwrap_or_default());
    }

    Ok(())
}
