//! # Mock Plugins & Testing Guide
//!
//! [`MockRelationshipPlugin`] stands in for a host relationship provider. It
//! answers calls from a queue of expectations instead of a real lookup, so tests
//! can drive the relationship response builder deterministically and inject
//! failures that are awkward to produce with a real provider.
//!
//! ## When to use the mock vs a real provider
//!
//! | Feature | MockRelationshipPlugin | Real provider |
//! |---------|------------------------|---------------|
//! | **Determinism** | Calls answered in expectation order | Depends on the backing store |
//! | **Call checking** | `verify()` fails on unmet expectations | None |
//! | **Error injection** | `return_err` | Requires a broken backend |
//! | **Use case** | Testing the code that *calls* providers | Testing the provider itself |
//!
//! ## Example
//!
//! ```rust
//! use glue_framework::mock::MockRelationshipPlugin;
//! use glue_framework::{GlueRequest, GlueResource, HttpMethod, ResourceRelationshipPlugin};
//!
//! let mut mock = MockRelationshipPlugin::new("products", "category");
//! mock.expect_related("42")
//!     .return_ok(vec![GlueResource::new("categories", "9")]);
//!
//! let provider = mock.provider();
//! let request = GlueRequest::new(HttpMethod::Get, "products");
//! let related = provider
//!     .related_resources(&GlueResource::new("products", "42"), &request)
//!     .unwrap();
//!
//! assert_eq!(related[0].resource_type, "categories");
//! mock.verify();
//! ```
//!
//! ## Simulating a failing provider
//!
//! ```rust
//! use glue_framework::mock::MockRelationshipPlugin;
//! use glue_framework::{FrameworkError, GlueRequest, GlueResource, HttpMethod, ResourceRelationshipPlugin};
//!
//! let mut mock = MockRelationshipPlugin::new("products", "prices");
//! mock.expect_related("42").return_err(FrameworkError::RelationshipUnavailable {
//!     resource_type: "products".into(),
//!     relationship: "prices".into(),
//!     message: "price storage offline".into(),
//! });
//!
//! let result = mock.provider().related_resources(
//!     &GlueResource::new("products", "42"),
//!     &GlueRequest::new(HttpMethod::Get, "products"),
//! );
//! assert!(matches!(result, Err(FrameworkError::RelationshipUnavailable { .. })));
//! ```

use crate::error::FrameworkError;
use crate::plugin::ResourceRelationshipPlugin;
use crate::transfer::{GlueRequest, GlueResource};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected call for the related resources of one parent id.
struct Expectation {
    parent_id: String,
    response: Result<Vec<GlueResource>, FrameworkError>,
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A relationship provider double with expectation tracking.
///
/// The mock owns the expectation queue; [`MockRelationshipPlugin::provider`]
/// hands out a plugin that shares it, so the mock can still be verified after
/// the provider was moved into a [`PluginSet`](crate::PluginSet).
pub struct MockRelationshipPlugin {
    resource_type: String,
    relationship_name: String,
    expectations: Expectations,
}

impl MockRelationshipPlugin {
    pub fn new(resource_type: impl Into<String>, relationship_name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            relationship_name: relationship_name.into(),
            expectations: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Returns the provider to register with the convention.
    pub fn provider(&self) -> MockRelationshipProvider {
        MockRelationshipProvider {
            resource_type: self.resource_type.clone(),
            relationship_name: self.relationship_name.clone(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a lookup for the resource with `parent_id`.
    pub fn expect_related(&mut self, parent_id: impl Into<String>) -> RelatedExpectationBuilder {
        RelatedExpectationBuilder {
            parent_id: parent_id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!(
                "Not all expectations were met for `{}`.`{}`. {} remaining",
                self.resource_type, self.relationship_name, remaining
            );
        }
    }
}

/// Builder for related-resource expectations.
pub struct RelatedExpectationBuilder {
    parent_id: String,
    expectations: Expectations,
}

impl RelatedExpectationBuilder {
    /// Sets the expectation to return these related resources.
    pub fn return_ok(self, related: Vec<GlueResource>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            parent_id: self.parent_id,
            response: Ok(related),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            parent_id: self.parent_id,
            response: Err(error),
        });
    }
}

/// The plugin half of [`MockRelationshipPlugin`].
#[derive(Clone)]
pub struct MockRelationshipProvider {
    resource_type: String,
    relationship_name: String,
    expectations: Expectations,
}

impl ResourceRelationshipPlugin for MockRelationshipProvider {
    fn name(&self) -> &'static str {
        "MockRelationshipProvider"
    }

    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    fn relationship_name(&self) -> &str {
        &self.relationship_name
    }

    fn related_resources(
        &self,
        resource: &GlueResource,
        _request: &GlueRequest,
    ) -> Result<Vec<GlueResource>, FrameworkError> {
        let parent_id = resource.id.clone().unwrap_or_default();
        let expectation = self.expectations.lock().unwrap().pop_front();

        match expectation {
            Some(expectation) if expectation.parent_id == parent_id => expectation.response,
            Some(expectation) => panic!(
                "Unexpected lookup for `{}` {}: expected parent {}",
                self.relationship_name, parent_id, expectation.parent_id
            ),
            None => panic!(
                "Unexpected lookup for `{}` {}: no expectations left",
                self.relationship_name, parent_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::HttpMethod;

    #[test]
    fn test_mock_answers_in_expectation_order() {
        let mut mock = MockRelationshipPlugin::new("products", "category");
        mock.expect_related("1").return_ok(vec![GlueResource::new("categories", "9")]);
        mock.expect_related("2").return_ok(vec![]);

        let provider = mock.provider();
        let request = GlueRequest::new(HttpMethod::Get, "products");

        let first = provider
            .related_resources(&GlueResource::new("products", "1"), &request)
            .unwrap();
        assert_eq!(first, vec![GlueResource::new("categories", "9")]);
        assert_eq!(mock.remaining(), 1);

        let second = provider
            .related_resources(&GlueResource::new("products", "2"), &request)
            .unwrap();
        assert!(second.is_empty());

        mock.verify();
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_fails_on_unmet_expectations() {
        let mut mock = MockRelationshipPlugin::new("products", "category");
        mock.expect_related("1").return_ok(vec![]);
        mock.verify();
    }

    #[test]
    #[should_panic(expected = "expected parent 1")]
    fn test_mismatched_parent_panics() {
        let mut mock = MockRelationshipPlugin::new("products", "category");
        mock.expect_related("1").return_ok(vec![]);

        let _ = mock.provider().related_resources(
            &GlueResource::new("products", "2"),
            &GlueRequest::new(HttpMethod::Get, "products"),
        );
    }
}
