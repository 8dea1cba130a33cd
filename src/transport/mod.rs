use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

mod error;
mod http;
#[cfg(test)]
pub mod mock;

pub use error::TransportError;
pub use http::HttpTransport;

/// One call against the wishlist service, relative to the base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self { Self::new(Method::GET, path) }
    pub fn delete(path: impl Into<String>) -> Self { Self::new(Method::DELETE, path) }
    pub fn post(path: impl Into<String>, body: Value) -> Self { Self::new(Method::POST, path).with_body(body) }
    pub fn put(path: impl Into<String>, body: Value) -> Self { Self::new(Method::PUT, path).with_body(body) }
    pub fn patch(path: impl Into<String>, body: Value) -> Self { Self::new(Method::PATCH, path).with_body(body) }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Resolves to the decoded JSON body, `None` for an empty 2xx body.
    async fn request(&self, req: ApiRequest) -> Result<Option<Value>, TransportError>;
}

/// Maps a raw response onto the transport contract.
pub(crate) fn interpret(status: StatusCode, body: &[u8]) -> Result<Option<Value>, TransportError> {
    if !status.is_success() {
        return Err(TransportError::from_status(status, body));
    }
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some).map_err(TransportError::Decode)
}

/// Decodes a body that must be present.
pub(crate) fn expect_body<T: serde::de::DeserializeOwned>(body: Option<Value>) -> Result<T, TransportError> {
    serde_json::from_value(body.unwrap_or(Value::Null)).map_err(TransportError::Decode)
}
