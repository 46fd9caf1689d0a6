//! Integration tests using WireMock
//!
//! These tests drive the client through the real reqwest transport against a
//! local mock Graph server, covering URL construction, the code exchange and
//! response decoding end to end.

mod oauth_flow;
mod user_flow;

use facebook_graph_client::{GraphClient, GraphConfig};
use wiremock::{MockServer, ResponseTemplate};

/// Helper to start a mock Graph server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Helper to build a client pointed at the mock server
pub fn client_for(server: &MockServer) -> GraphClient {
    let config = GraphConfig::builder()
        .client_id("CLIENT_ID")
        .app_secret("APP_SECRET")
        .callback_url("https://app.example.com/callback")
        .logout_url("https://app.example.com/")
        .access_scope(["email", "user_photos"])
        .user_fields(["name", "email"])
        .graph_url(&server.uri())
        .expect("mock server URI is valid")
        .build()
        .expect("config is valid");

    GraphClient::new(config).expect("client builds")
}

/// Helper to create success response templates
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Helper to create error response templates
pub fn error_response(status: u16, error_body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(error_body)
}
