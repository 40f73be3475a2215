//! Resource-side lookups used while building responses.

pub mod relationship_loader;

pub use relationship_loader::ResourceRelationshipLoader;
