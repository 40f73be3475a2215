//! JSON encoding and decoding of documents and request bodies.

use crate::error::ConventionError;
use serde::Serialize;
use serde_json::Value;

/// Serializes JSON:API documents. Map order of the input is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn encode<T: Serialize + ?Sized>(&self, document: &T) -> Result<String, ConventionError> {
        serde_json::to_string(document).map_err(ConventionError::Encode)
    }
}

/// Parses request bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn decode(&self, content: &str) -> Result<Value, ConventionError> {
        serde_json::from_str(content).map_err(ConventionError::Decode)
    }
}
