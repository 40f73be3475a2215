//! # Relationship Resolver
//!
//! Looks up the relationship providers registered for a resource type.
//!
//! Providers are matched on their declared
//! [`resource_type`](glue_framework::ResourceRelationshipPlugin::resource_type)
//! and returned in registration order, so a type with several providers
//! attaches its relationships in a stable order.

use glue_framework::ResourceRelationshipPlugin;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct ResourceRelationshipLoader {
    providers: Vec<Arc<dyn ResourceRelationshipPlugin>>,
}

impl ResourceRelationshipLoader {
    pub fn new(providers: Vec<Arc<dyn ResourceRelationshipPlugin>>) -> Self {
        Self { providers }
    }

    /// Providers declared for `resource_type`, in registration order.
    pub fn load(&self, resource_type: &str) -> Vec<Arc<dyn ResourceRelationshipPlugin>> {
        let providers: Vec<_> = self
            .providers
            .iter()
            .filter(|provider| provider.resource_type() == resource_type)
            .cloned()
            .collect();
        debug!(resource_type, count = providers.len(), "Loaded providers");
        providers
    }

    /// Every registered provider regardless of type.
    pub fn all(&self) -> &[Arc<dyn ResourceRelationshipPlugin>] {
        &self.providers
    }
}

impl std::fmt::Debug for ResourceRelationshipLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers: Vec<_> = self
            .providers
            .iter()
            .map(|provider| format!("{}.{}", provider.resource_type(), provider.relationship_name()))
            .collect();
        f.debug_struct("ResourceRelationshipLoader")
            .field("providers", &providers)
            .finish()
    }
}
