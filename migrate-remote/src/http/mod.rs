//! Outbound HTTP seam
//!
//! The destination never talks to reqwest directly. It hands an encoded
//! [`RequestBody`] to an [`HttpClient`], which makes it possible to swap the
//! transport in tests or embed the destination in a host with its own client.

mod body;
mod reqwest_client;

pub use body::{RequestBody, RequestFormat, flatten_form};
pub use reqwest_client::ReqwestClient;

use async_trait::async_trait;
use std::sync::Arc;

/// Raw response from the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes, undecoded
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the leading digit of the status code is 2
    pub fn is_success(&self) -> bool {
        self.status / 100 == 2
    }
}

/// The request could not be completed (network, DNS, malformed URL, ...)
#[derive(Debug)]
pub struct TransportError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Minimal async HTTP client able to POST an encoded body
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` to `url` and return the status and raw body
    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body).await
    }
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Box<T> {
    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body).await
    }
}
