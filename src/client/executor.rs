//! Request executor: URL assembly, transport dispatch and error mapping.

use crate::auth::{appsecret_proof, AccessToken};
use crate::config::GraphConfig;
use crate::errors::{ApiErrorDetail, GraphResult, RequestError, TransportError};
use crate::observability::{create_request_span, record_error, record_success, redact_url};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::GraphResponse;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, Instrument};

/// Request executor shared by all services.
///
/// This is the one place that talks to the transport. Every authenticated
/// Graph call funnels through [`RequestExecutor::request`].
pub struct RequestExecutor {
    config: Arc<GraphConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    /// Creates a new request executor.
    pub fn new(config: Arc<GraphConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Authenticated GET of `<graph_url><path>&access_token=<token>`,
    /// parsed as JSON.
    ///
    /// `path` must already carry its own query string.
    pub async fn request(&self, path: &str, access_token: &AccessToken) -> GraphResult<GraphResponse> {
        let url = self.authenticated_url(path, access_token)?;
        let response = self
            .send("request", url)
            .await
            .map_err(RequestError::Transport)?;

        if !response.is_success() {
            return Err(RequestError::Status {
                status: response.status,
                detail: api_error_detail(&response),
            }
            .into());
        }

        Ok(GraphResponse::from_slice(&response.body)?)
    }

    /// Builds the full authenticated URL for a path.
    pub fn authenticated_url(&self, path: &str, access_token: &AccessToken) -> GraphResult<String> {
        let mut url = format!(
            "{}&access_token={}",
            self.config.graph_endpoint(path),
            access_token.expose()
        );

        if self.config.appsecret_proof {
            let secret = self.config.app_secret()?;
            url.push_str("&appsecret_proof=");
            url.push_str(&appsecret_proof(secret, access_token));
        }

        Ok(url)
    }

    /// Sends a GET through the transport inside a request span.
    pub async fn send(&self, operation: &str, url: String) -> Result<HttpResponse, TransportError> {
        let span = create_request_span(operation, &redact_url(&url));
        let request = HttpRequest::get(url).with_timeout(self.config.timeout);

        let result = self.transport.get(request).instrument(span.clone()).await;

        match &result {
            Ok(response) if response.is_success() => record_success(&span, response.status),
            Ok(response) => record_error(&span, &format!("HTTP {}", response.status)),
            Err(err) => record_error(&span, &err.to_string()),
        }
        if let Ok(response) = &result {
            debug!(operation, status = response.status, "Graph call completed");
        }

        result
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decodes a Graph error envelope, falling back to the raw body.
pub(crate) fn api_error_detail(response: &HttpResponse) -> ApiErrorDetail {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
        #[serde(rename = "type")]
        error_type: Option<String>,
        code: Option<i64>,
    }

    match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => ApiErrorDetail {
            message: envelope.error.message,
            error_type: envelope.error.error_type,
            code: envelope.error.code,
        },
        Err(_) => ApiErrorDetail {
            message: format!("HTTP {}: {}", response.status, response.text()),
            ..Default::default()
        },
    }
}
