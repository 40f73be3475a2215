use crate::encoder::JsonDecoder;
use glue_framework::{FrameworkError, GlueRequest, RequestBuilderPlugin};
use serde_json::Value;
use tracing::{debug, warn};

/// Copies `data.attributes` of a JSON:API request body into the request.
///
/// Bodies that are not JSON, or carry no attribute object, leave the request
/// untouched; validators decide whether that is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributesRequestBuilder {
    decoder: JsonDecoder,
}

impl AttributesRequestBuilder {
    pub fn new(decoder: JsonDecoder) -> Self {
        Self { decoder }
    }
}

impl RequestBuilderPlugin for AttributesRequestBuilder {
    fn build(&self, mut request: GlueRequest) -> Result<GlueRequest, FrameworkError> {
        let Some(content) = request.content.as_deref().filter(|content| !content.trim().is_empty()) else {
            return Ok(request);
        };

        let body = match self.decoder.decode(content) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, resource_type = %request.resource.resource_type, "Ignoring undecodable request body");
                return Ok(request);
            }
        };

        if let Some(Value::Object(attributes)) = body.pointer("/data/attributes") {
            debug!(count = attributes.len(), "Copied request attributes");
            for (name, value) in attributes {
                request.attributes.insert(name.clone(), value.clone());
            }
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glue_framework::HttpMethod;
    use serde_json::json;

    #[test]
    fn copies_attributes_in_body_order() {
        let request = GlueRequest::new(HttpMethod::Post, "carts").with_content(
            r#"{"data":{"type":"carts","attributes":{"currency":"EUR","store":"DE","priceMode":"GROSS_MODE"}}}"#,
        );

        let built = AttributesRequestBuilder::default().build(request).unwrap();

        let names: Vec<_> = built.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["currency", "store", "priceMode"]);
        assert_eq!(built.attributes["currency"], json!("EUR"));
    }

    #[test]
    fn invalid_body_leaves_request_untouched() {
        let request = GlueRequest::new(HttpMethod::Post, "carts").with_content("{\"data\":");

        let built = AttributesRequestBuilder::default().build(request.clone()).unwrap();

        assert_eq!(built, request);
    }

    #[test]
    fn body_without_attributes_is_ignored() {
        let request = GlueRequest::new(HttpMethod::Patch, "carts")
            .with_id("c-1")
            .with_content(r#"{"data":{"type":"carts","id":"c-1"}}"#);

        assert!(AttributesRequestBuilder::default().build(request).unwrap().attributes.is_empty());
    }
}
