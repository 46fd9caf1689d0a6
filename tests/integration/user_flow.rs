//! User projection integration tests

use super::*;
use facebook_graph_client::errors::{NotFoundError, RequestError};
use facebook_graph_client::{AccessToken, GraphError, GraphResponse};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::Mock;

#[tokio::test]
async fn test_code_to_profile_flow() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("access_token=TOKEN123&expires=5183999"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(query_param("fields", "name,email,picture"))
        .and(query_param("access_token", "TOKEN123"))
        .respond_with(success_response(json!({
            "id": "1234567890",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "picture": "https://graph.facebook.com/1234567890/picture"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.user_from_code("CODE", None).await.unwrap();

    assert_eq!(user.field_str("name").await.unwrap(), "Jane Doe");
    assert_eq!(user.field_str("email").await.unwrap(), "jane@example.com");
    assert_eq!(
        user.thumbnail().await.unwrap(),
        "https://graph.facebook.com/1234567890/picture"
    );
    assert_eq!(
        user.logout_url().unwrap(),
        "https://www.facebook.com/logout.php?next=https://app.example.com/&access_token=TOKEN123"
    );
}

#[tokio::test]
async fn test_profile_photo_lookup() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/me/albums"))
        .and(query_param("fields", "id,cover_photo,type"))
        .respond_with(success_response(json!({
            "data": [
                { "id": "2001", "cover_photo": "2002", "type": "normal" },
                { "id": "1001", "cover_photo": "1002", "type": "profile" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1002/"))
        .and(query_param("fields", "source"))
        .respond_with(success_response(json!({
            "id": "1002",
            "source": "https://scontent.example.net/1002.jpg"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let photo = client
        .photos()
        .fetch_photo(&AccessToken::new("TOKEN123"))
        .await
        .unwrap();

    assert_eq!(photo, "https://scontent.example.net/1002.jpg");
}

#[tokio::test]
async fn test_profile_photo_missing_album() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/me/albums"))
        .respond_with(success_response(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .photos()
        .fetch_photo(&AccessToken::new("TOKEN123"))
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::NotFound(NotFoundError::ProfileAlbum)));
}

#[tokio::test]
async fn test_request_returns_list() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/me/friends"))
        .respond_with(success_response(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .request("/me/friends?limit=10", &AccessToken::new("TOKEN123"))
        .await
        .unwrap();

    assert_eq!(response, GraphResponse::List(vec![]));
}

#[tokio::test]
async fn test_request_expired_token() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(error_response(
            400,
            json!({
                "error": {
                    "message": "Error validating access token: Session has expired.",
                    "type": "OAuthException",
                    "code": 190
                }
            }),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.user(AccessToken::new("EXPIRED")).unwrap();
    let err = user.field("name").await.unwrap_err();

    match err {
        GraphError::Request(RequestError::Status { status, detail }) => {
            assert_eq!(status, 400);
            assert_eq!(detail.error_type.as_deref(), Some("OAuthException"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!user.is_loaded());
}
