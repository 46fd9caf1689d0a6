//! Mock implementations for testing.
//!
//! Provides a mock transport that replays queued responses and records
//! every request it receives, so tests can assert on URLs and call counts.

use crate::errors::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Response body
    pub body: String,
    /// HTTP status code
    pub status: u16,
    /// Delay before response
    pub delay_ms: Option<u64>,
    /// Error to return instead
    pub error: Option<TransportError>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self::ok(serde_json::to_string(data).unwrap_or_default())
    }

    /// Create a successful response with raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status: 200,
            delay_ms: None,
            error: None,
        }
    }

    /// Create a response with an arbitrary status
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            ..Self::ok(body)
        }
    }

    /// Create a Graph API error envelope response
    pub fn graph_error(status: u16, message: &str, error_type: &str, code: i64) -> Self {
        Self::status(
            status,
            serde_json::json!({
                "error": {
                    "message": message,
                    "type": error_type,
                    "code": code
                }
            })
            .to_string(),
        )
    }

    /// Create a transport failure
    pub fn error(error: TransportError) -> Self {
        Self {
            body: String::new(),
            status: 0,
            delay_ms: None,
            error: Some(error),
        }
    }

    /// Add delay to response
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Vec<(String, String)>,
}

/// Mock HTTP transport for testing
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    default_response: Option<MockResponse>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            default_response: None,
        }
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add a JSON response
    pub fn add_json_response<T: Serialize>(self, data: &T) -> Self {
        self.add_response(MockResponse::json(data))
    }

    /// Set default response when queue is empty
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get recorded request URLs
    pub fn recorded_urls(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.url.clone()).collect()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn record_request(&self, request: &HttpRequest) {
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        self.requests.lock().push(RecordedRequest {
            url: request.url.clone(),
            headers,
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut queue = self.responses.lock();
        queue.pop_front().or_else(|| self.default_response.clone())
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.record_request(&request);

        let response = self
            .next_response()
            .ok_or_else(|| TransportError::Http("No mock response configured".to_string()))?;

        if let Some(delay) = response.delay_ms {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        if let Some(error) = response.error {
            return Err(error);
        }

        Ok(HttpResponse::new(response.status, Bytes::from(response.body)))
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("pending_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_replays_in_order() {
        let transport = MockHttpTransport::new()
            .add_response(MockResponse::ok("first"))
            .add_response(MockResponse::status(500, "second"));

        let first = transport.get(HttpRequest::get("https://a")).await.unwrap();
        let second = transport
            .get(HttpRequest::get("https://b").header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            ))
            .await
            .unwrap();

        let recorded = transport.recorded_requests();
        assert!(recorded[0].headers.is_empty());
        assert_eq!(
            recorded[1].headers,
            [("accept".to_string(), "application/json".to_string())]
        );

        assert_eq!(first.text(), "first");
        assert_eq!(second.status, 500);
        assert_eq!(transport.recorded_urls(), ["https://a", "https://b"]);
        assert_eq!(transport.remaining_responses(), 0);
    }

    #[test]
    fn test_mock_transport_without_responses() {
        let transport = MockHttpTransport::new();
        let result = tokio_test::block_on(transport.get(HttpRequest::get("https://a")));
        assert!(matches!(result, Err(TransportError::Http(_))));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_error_and_default() {
        let transport = MockHttpTransport::new()
            .add_response(MockResponse::error(TransportError::Timeout))
            .with_default_response(MockResponse::ok("{}"));

        let err = transport.get(HttpRequest::get("https://a")).await.unwrap_err();
        assert_eq!(err, TransportError::Timeout);

        let ok = transport.get(HttpRequest::get("https://a")).await.unwrap();
        assert_eq!(ok.text(), "{}");
        assert_eq!(transport.last_request().unwrap().url, "https://a");
    }
}
