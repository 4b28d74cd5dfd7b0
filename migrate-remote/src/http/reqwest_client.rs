//! reqwest-backed [`HttpClient`]

use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use super::{HttpClient, HttpResponse, RequestBody, TransportError};

/// HTTP client backed by a shared `reqwest::Client`
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with an overall request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::with_source("failed to build HTTP client", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        let request = self.client.post(url);
        let request = match body {
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Form(pairs) => request.form(&pairs),
            RequestBody::Multipart(pairs) => {
                let form = pairs
                    .into_iter()
                    .fold(reqwest::multipart::Form::new(), |form, (name, contents)| {
                        form.text(name, contents)
                    });
                request.multipart(form)
            }
        };

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::with_source(format!("POST to {} failed", url), e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            TransportError::with_source(format!("failed to read response from {}", url), e)
        })?;

        debug!("POST {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const REJECTION: &str = r#"{"error":"rejected"}"#;

    /// Accept one request, answer 422 with a JSON body and hand back the raw request
    async fn serve_once() -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/orders", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];

            let head_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers");
                request.extend_from_slice(&chunk[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap());

            loop {
                let complete = match content_length {
                    Some(len) => request.len() >= head_end + len,
                    None => request.ends_with(b"0\r\n\r\n"),
                };
                if complete {
                    break;
                }
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body");
                request.extend_from_slice(&chunk[..n]);
            }

            let reply = format!(
                "HTTP/1.1 422 Unprocessable Entity\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                REJECTION.len(),
                REJECTION
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8(request).unwrap()
        });

        (url, handle)
    }

    /// POST `body` to a fresh listener; returns the response and the lowercased head and raw body
    async fn round_trip(body: RequestBody) -> (HttpResponse, String, String) {
        let (url, handle) = serve_once().await;
        let client =
            ReqwestClient::from_client(reqwest::Client::builder().no_proxy().build().unwrap());
        let response = client.post(&url, body).await.unwrap();
        let request = handle.await.unwrap();

        let (head, payload) = request.split_once("\r\n\r\n").unwrap();
        assert!(head.starts_with("POST /orders HTTP/1.1"));
        (response, head.to_lowercase(), payload.to_string())
    }

    fn assert_rejection_intact(response: &HttpResponse) {
        assert_eq!(response.status, 422);
        assert!(!response.is_success());
        assert_eq!(response.body, REJECTION.as_bytes());
    }

    #[tokio::test]
    async fn test_form_body_on_the_wire() {
        let body = RequestBody::Form(vec![
            ("title".to_string(), "Order".to_string()),
            ("tags[0]".to_string(), "a".to_string()),
        ]);
        let (response, head, payload) = round_trip(body).await;

        assert!(head.contains("content-type: application/x-www-form-urlencoded"));
        assert!(payload.contains("title=Order"));
        assert!(payload.contains("tags%5B0%5D=a"));
        assert_rejection_intact(&response);
    }

    #[tokio::test]
    async fn test_multipart_body_on_the_wire() {
        let body = RequestBody::Multipart(vec![
            ("title".to_string(), "Order".to_string()),
            ("lines[0][sku]".to_string(), "A-1".to_string()),
        ]);
        let (response, head, payload) = round_trip(body).await;

        assert!(head.contains("content-type: multipart/form-data; boundary="));
        assert_eq!(payload.matches("Content-Disposition: form-data;").count(), 2);
        assert!(payload.contains("name=\"title\"\r\n\r\nOrder\r\n"));
        assert!(payload.contains("name=\"lines[0][sku]\"\r\n\r\nA-1\r\n"));
        assert_rejection_intact(&response);
    }

    #[tokio::test]
    async fn test_json_body_on_the_wire() {
        let body = RequestBody::Json(json!({"title": "Order", "lines": [{"sku": "A-1"}]}));
        let (response, head, payload) = round_trip(body).await;

        assert!(head.contains("content-type: application/json"));
        let sent: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(sent, json!({"title": "Order", "lines": [{"sku": "A-1"}]}));
        assert_rejection_intact(&response);
    }

    #[tokio::test]
    async fn test_malformed_url_is_transport_error() {
        let client = ReqwestClient::new();
        let err = client
            .post("not a url", RequestBody::Form(Vec::new()))
            .await
            .unwrap_err();
        assert!(err.message().contains("not a url"));
    }

    #[test]
    fn test_with_timeout_builds() {
        assert!(ReqwestClient::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
