//! A small in-memory storefront used by the `storefront-demo` binary and the
//! integration tests: products, their categories, one relationship provider
//! and one validator.

use glue_framework::{
    ErrorRecord, FrameworkError, GlueRequest, GlueResource, GlueResponse, RequestValidatorPlugin,
    ResourceRelationshipPlugin,
};
use std::sync::Arc;

pub const PRODUCTS: &str = "products";
pub const CATEGORIES: &str = "categories";

pub const ERROR_CODE_PRODUCT_NOT_FOUND: &str = "301";
pub const ERROR_CODE_UNSUPPORTED_RESOURCE: &str = "007";

#[derive(Debug, Clone)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub price: u32,
    pub category_id: Option<String>,
}

impl Product {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: u32) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            price,
            category_id: None,
        }
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

impl From<&Product> for GlueResource {
    fn from(product: &Product) -> Self {
        GlueResource::new(PRODUCTS, product.sku.clone())
            .with_attribute("sku", product.sku.clone())
            .with_attribute("name", product.name.clone())
            .with_attribute("price", product.price)
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl From<&Category> for GlueResource {
    fn from(category: &Category) -> Self {
        GlueResource::new(CATEGORIES, category.id.clone()).with_attribute("name", category.name.clone())
    }
}

/// Read-only product and category store.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self { products, categories }
    }

    /// Three products in two categories, one product uncategorized.
    pub fn sample() -> Self {
        Self::new(
            vec![
                Product::new("W-1", "Widget", 1999).in_category("9"),
                Product::new("G-2", "Gadget", 4999).in_category("9"),
                Product::new("S-3", "Sprocket", 250),
            ],
            vec![
                Category {
                    id: "9".to_string(),
                    name: "Tools".to_string(),
                },
                Category {
                    id: "12".to_string(),
                    name: "Garden".to_string(),
                },
            ],
        )
    }

    pub fn product(&self, sku: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.sku == sku)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Resolves `products` requests: one product by id, otherwise all of them.
    pub fn resolve(&self, request: &GlueRequest) -> GlueResponse {
        match request.resource.id.as_deref() {
            Some(sku) => match self.product(sku) {
                Some(product) => GlueResponse::new().with_resource(product.into()),
                None => GlueResponse::new().with_error(
                    ErrorRecord::new()
                        .with_status(404)
                        .with_code(ERROR_CODE_PRODUCT_NOT_FOUND)
                        .with_detail("Abstract product is not found."),
                ),
            },
            None => GlueResponse::new().with_resources(self.products.iter().map(GlueResource::from)),
        }
    }
}

/// Attaches a product's category under the `category` relationship.
#[derive(Debug, Clone)]
pub struct ProductCategoryProvider {
    catalog: Arc<Catalog>,
}

impl ProductCategoryProvider {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl ResourceRelationshipPlugin for ProductCategoryProvider {
    fn resource_type(&self) -> &str {
        PRODUCTS
    }

    fn relationship_name(&self) -> &str {
        "category"
    }

    fn related_resources(
        &self,
        resource: &GlueResource,
        _request: &GlueRequest,
    ) -> Result<Vec<GlueResource>, FrameworkError> {
        let category = resource
            .resource_id()
            .and_then(|sku| self.catalog.product(sku))
            .and_then(|product| product.category_id.as_deref())
            .and_then(|category_id| self.catalog.category(category_id));

        Ok(category.map(GlueResource::from).into_iter().collect())
    }
}

/// Rejects requests for resource types the storefront does not serve.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportedResourceValidator;

impl RequestValidatorPlugin for SupportedResourceValidator {
    fn validate(&self, request: &GlueRequest) -> Vec<ErrorRecord> {
        if request.resource.resource_type == PRODUCTS {
            return Vec::new();
        }
        vec![ErrorRecord::new()
            .with_status(404)
            .with_code(ERROR_CODE_UNSUPPORTED_RESOURCE)
            .with_detail(format!("Resource `{}` is not supported.", request.resource.resource_type))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glue_framework::HttpMethod;

    #[test]
    fn resolve_by_id_and_collection() {
        let catalog = Catalog::sample();

        let one = catalog.resolve(&GlueRequest::new(HttpMethod::Get, PRODUCTS).with_id("G-2"));
        assert_eq!(one.resources.len(), 1);
        assert_eq!(one.resources[0].attributes["name"], "Gadget");

        let all = catalog.resolve(&GlueRequest::new(HttpMethod::Get, PRODUCTS));
        assert_eq!(all.resources.len(), 3);

        let missing = catalog.resolve(&GlueRequest::new(HttpMethod::Get, PRODUCTS).with_id("X-0"));
        assert_eq!(missing.errors[0].get("code"), Some(&serde_json::json!(ERROR_CODE_PRODUCT_NOT_FOUND)));
    }

    #[test]
    fn category_provider_skips_uncategorized_products() {
        let provider = ProductCategoryProvider::new(Arc::new(Catalog::sample()));
        let request = GlueRequest::new(HttpMethod::Get, PRODUCTS);

        let related = provider
            .related_resources(&GlueResource::new(PRODUCTS, "W-1"), &request)
            .unwrap();
        assert_eq!(related[0].identity(), (CATEGORIES, "9"));

        assert!(provider
            .related_resources(&GlueResource::new(PRODUCTS, "S-3"), &request)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn validator_rejects_unknown_types() {
        assert!(SupportedResourceValidator
            .validate(&GlueRequest::new(HttpMethod::Get, PRODUCTS))
            .is_empty());
        assert_eq!(
            SupportedResourceValidator
                .validate(&GlueRequest::new(HttpMethod::Get, "wishlists"))
                .len(),
            1
        );
    }
}
