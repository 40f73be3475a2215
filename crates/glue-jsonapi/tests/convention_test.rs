use glue_framework::mock::MockRelationshipPlugin;
use glue_framework::{FrameworkError, GlueRequest, GlueResource, GlueResponse, HttpMethod, PluginSet};
use glue_jsonapi::storefront::{Catalog, ProductCategoryProvider, SupportedResourceValidator, PRODUCTS};
use glue_jsonapi::{ConventionError, GlueJsonApiConventionFactory, JsonApiConvention, JsonApiConventionConfig};
use serde_json::{json, Value};
use std::sync::Arc;

fn convention(plugins: PluginSet) -> JsonApiConvention {
    GlueJsonApiConventionFactory::new(JsonApiConventionConfig::new("https://api.example.com"), plugins)
        .create_convention()
}

fn document(response: &GlueResponse) -> Value {
    serde_json::from_str(response.content.as_deref().expect("content should be written")).unwrap()
}

/// Full pipeline over the sample storefront with the real category provider.
#[test]
fn test_storefront_collection_with_included_categories() {
    let catalog = Arc::new(Catalog::sample());
    let convention = convention(
        PluginSet::new()
            .with_request_validator(SupportedResourceValidator)
            .with_relationship_provider(ProductCategoryProvider::new(catalog.clone())),
    );
    let request = GlueRequest::new(HttpMethod::Get, PRODUCTS)
        .with_query_field("include", "category")
        .with_query_field("fields[products]", "name");

    let response = convention.handle(request, |request| catalog.resolve(request)).unwrap();
    let document = document(&response);

    let data = document["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["attributes"], json!({"name": "Widget"}));
    assert_eq!(
        data[0]["relationships"],
        json!({"categories": {"data": [{"type": "categories", "id": "9"}]}})
    );
    assert!(data[2].get("relationships").is_none());
    assert_eq!(
        document["links"]["self"],
        "https://api.example.com/products?include=category&fields[products]=name"
    );
    assert_eq!(
        document["included"],
        json!([{
            "type": "categories",
            "id": "9",
            "attributes": {"name": "Tools"},
            "links": {"self": "https://api.example.com/categories/9?include=category&fields[products]=name"}
        }])
    );
}

#[test]
fn test_storefront_errors() {
    let catalog = Arc::new(Catalog::sample());
    let convention = convention(PluginSet::new().with_request_validator(SupportedResourceValidator));

    let missing = convention
        .handle(GlueRequest::new(HttpMethod::Get, PRODUCTS).with_id("X-0"), |request| {
            catalog.resolve(request)
        })
        .unwrap();
    assert_eq!(
        missing.content.as_deref(),
        Some(r#"{"errors":[{"status":404,"code":"301","detail":"Abstract product is not found."}]}"#)
    );

    let unsupported = convention
        .handle(GlueRequest::new(HttpMethod::Get, "wishlists"), |request| catalog.resolve(request))
        .unwrap();
    assert_eq!(document(&unsupported)["errors"][0]["code"], "007");
}

/// Relationship expansion driven by mock providers, verified call by call.
#[test]
fn test_pipeline_with_mock_providers() {
    let mut categories = MockRelationshipPlugin::new("products", "category");
    categories
        .expect_related("42")
        .return_ok(vec![GlueResource::new("categories", "9").with_attribute("name", "Tools")]);
    let mut parents = MockRelationshipPlugin::new("categories", "parent");
    parents
        .expect_related("9")
        .return_ok(vec![GlueResource::new("categories", "1").with_attribute("name", "Root")]);
    parents.expect_related("1").return_ok(vec![]);

    let convention = convention(
        PluginSet::new()
            .with_relationship_provider(categories.provider())
            .with_relationship_provider(parents.provider()),
    );

    let response = convention
        .handle(GlueRequest::new(HttpMethod::Get, "products").with_id("42"), |_| {
            GlueResponse::new().with_resource(GlueResource::new("products", "42").with_attribute("name", "Widget"))
        })
        .unwrap();
    let document = document(&response);

    assert!(document["data"].is_object());
    let included: Vec<_> = document["included"]
        .as_array()
        .unwrap()
        .iter()
        .map(|resource| resource["id"].clone())
        .collect();
    assert_eq!(included, vec![json!("9"), json!("1")]);
    assert_eq!(
        document["included"][0]["relationships"],
        json!({"categories": {"data": [{"type": "categories", "id": "1"}]}})
    );

    categories.verify();
    parents.verify();
}

#[test]
fn test_include_restricts_expansion() {
    // No expectations on `prices`: calling it would panic.
    let prices = MockRelationshipPlugin::new("products", "prices");
    let mut categories = MockRelationshipPlugin::new("products", "category");
    categories
        .expect_related("42")
        .return_ok(vec![GlueResource::new("categories", "9")]);

    let convention = convention(
        PluginSet::new()
            .with_relationship_provider(prices.provider())
            .with_relationship_provider(categories.provider()),
    );
    let request = GlueRequest::new(HttpMethod::Get, "products")
        .with_id("42")
        .with_query_field("include", "category");

    let response = convention
        .handle(request, |_| GlueResponse::new().with_resource(GlueResource::new("products", "42")))
        .unwrap();

    assert_eq!(response.included_relationships.len(), 1);
    prices.verify();
    categories.verify();
}

#[test]
fn test_failing_provider_aborts_pipeline() {
    let mut prices = MockRelationshipPlugin::new("products", "prices");
    prices.expect_related("42").return_err(FrameworkError::RelationshipUnavailable {
        resource_type: "products".into(),
        relationship: "prices".into(),
        message: "price storage offline".into(),
    });

    let convention = convention(PluginSet::new().with_relationship_provider(prices.provider()));

    let result = convention.handle(GlueRequest::new(HttpMethod::Get, "products").with_id("42"), |_| {
        GlueResponse::new().with_resource(GlueResource::new("products", "42"))
    });

    match result {
        Err(ConventionError::Framework(error)) => {
            assert!(error.to_string().contains("price storage offline"));
        }
        other => panic!("expected a framework error, got {other:?}"),
    }
    prices.verify();
}

#[test]
fn test_posted_body_attributes_reach_the_resolver() {
    let convention = convention(PluginSet::new());
    let request = GlueRequest::new(HttpMethod::Post, "carts")
        .with_content(r#"{"data":{"type":"carts","attributes":{"currency":"EUR"}}}"#);

    let response = convention
        .handle(request, |request| {
            let currency = request.attributes["currency"].clone();
            GlueResponse::new().with_resource(GlueResource::new("carts", "c-1").with_attribute("currency", currency))
        })
        .unwrap();

    assert_eq!(
        response.content.as_deref(),
        Some(r#"{"data":{"type":"carts","id":"c-1","attributes":{"currency":"EUR"},"links":{"self":"https://api.example.com/carts/c-1"}},"included":[]}"#)
    );
}
