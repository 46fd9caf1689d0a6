//! OAuth flow integration tests

use super::*;
use facebook_graph_client::errors::TokenExchangeError;
use facebook_graph_client::GraphError;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::Mock;

#[tokio::test]
async fn test_auth_url_points_at_authorize_endpoint() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    assert_eq!(
        client.oauth().auth_url(Some("https://ignored.example.com")).unwrap(),
        format!(
            "{}/oauth/authorize?client_id=CLIENT_ID&redirect_uri=https://app.example.com/callback&scope=email,user_photos",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_fetch_token_success() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .and(query_param("client_id", "CLIENT_ID"))
        .and(query_param("client_secret", "APP_SECRET"))
        .and(query_param("redirect_uri", "https://app.example.com/callback"))
        .and(query_param("code", "AQD/code+1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("access_token=TOKEN123&expires=5183999"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = client.oauth().fetch_token("AQD/code+1", None).await.unwrap();

    assert_eq!(token.expose(), "TOKEN123");
}

#[test_case(400, "Invalid verification code format.", 100 ; "bad code")]
#[test_case(401, "Error validating client secret.", 1 ; "bad secret")]
#[tokio::test]
async fn test_fetch_token_rejected(status: u16, message: &str, code: i64) {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(error_response(
            status,
            json!({ "error": { "message": message, "type": "OAuthException", "code": code } }),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.oauth().fetch_token("CODE", None).await.unwrap_err();

    match err {
        GraphError::TokenExchange(TokenExchangeError::Status { status: got, detail }) => {
            assert_eq!(got, status);
            assert_eq!(detail.message, message);
            assert_eq!(detail.code, Some(code));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_token_body_without_token() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("expires=5183999"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.oauth().fetch_token("CODE", None).await.unwrap_err();

    assert!(matches!(
        err,
        GraphError::TokenExchange(TokenExchangeError::MissingToken)
    ));
}
