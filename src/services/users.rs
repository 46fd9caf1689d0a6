//! Users service: profile field fetches.

use crate::auth::AccessToken;
use crate::client::RequestExecutor;
use crate::errors::GraphResult;
use crate::services::OAuthService;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

/// Users service
#[derive(Debug, Clone)]
pub struct UsersService {
    executor: Arc<RequestExecutor>,
}

impl UsersService {
    /// Create a new users service
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Fetch the given fields of the current user in one request.
    #[instrument(skip(self, access_token))]
    pub async fn fetch_profile<S: AsRef<str> + std::fmt::Debug>(
        &self,
        access_token: &AccessToken,
        fields: &[S],
    ) -> GraphResult<Map<String, Value>> {
        let fields = fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        let response = self
            .executor
            .request(&format!("/me?fields={}", fields), access_token)
            .await?;

        Ok(response.into_object()?)
    }

    /// Fetch the configured user fields, with the token merged in under
    /// `access_token`.
    pub async fn request_user(&self, access_token: &AccessToken) -> GraphResult<Map<String, Value>> {
        let fields = self.executor.config().user_fields();
        let mut user = self.fetch_profile(access_token, fields).await?;
        user.insert(
            "access_token".to_string(),
            Value::String(access_token.expose().to_string()),
        );
        Ok(user)
    }

    /// Exchange a code, then fetch the configured user fields.
    pub async fn fetch_user(
        &self,
        code: &str,
        callback_override: Option<&str>,
    ) -> GraphResult<Map<String, Value>> {
        let token = OAuthService::new(self.executor.clone())
            .fetch_token(code, callback_override)
            .await?;
        self.request_user(&token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::errors::{GraphError, ParseError};
    use crate::fixtures;
    use crate::mocks::{MockHttpTransport, MockResponse};
    use serde_json::json;

    fn service(transport: MockHttpTransport) -> (UsersService, Arc<MockHttpTransport>) {
        let config = GraphConfig::builder()
            .client_id("CLIENT_ID")
            .app_secret("APP_SECRET")
            .callback_url("CALLBACK_URL")
            .user_fields(["name", "email"])
            .build()
            .unwrap();
        let transport = Arc::new(transport);
        let executor = Arc::new(RequestExecutor::new(Arc::new(config), transport.clone()));
        (UsersService::new(executor), transport)
    }

    #[tokio::test]
    async fn test_request_user_merges_token() {
        let (users, transport) =
            service(MockHttpTransport::new().add_json_response(&fixtures::user_profile()));

        let user = users.request_user(&AccessToken::new("TOKEN")).await.unwrap();

        assert_eq!(user["name"], json!("Jane Doe"));
        assert_eq!(user["access_token"], json!("TOKEN"));
        assert_eq!(
            transport.last_request().unwrap().url,
            "https://graph.facebook.com/me?fields=name,email&access_token=TOKEN"
        );
    }

    #[tokio::test]
    async fn test_fetch_user_exchanges_code_first() {
        let (users, transport) = service(
            MockHttpTransport::new()
                .add_response(MockResponse::ok(fixtures::TOKEN_RESPONSE))
                .add_json_response(&fixtures::user_profile()),
        );

        let user = users.fetch_user("CODE", None).await.unwrap();

        assert_eq!(user["access_token"], json!(fixtures::ACCESS_TOKEN));
        let urls = transport.recorded_urls();
        assert!(urls[0].starts_with("https://graph.facebook.com/oauth/access_token?"));
        assert!(urls[0].contains("redirect_uri=CALLBACK_URL"));
        assert!(urls[1].starts_with("https://graph.facebook.com/me?fields=name,email"));
    }

    #[tokio::test]
    async fn test_fetch_profile_rejects_non_object() {
        let (users, _) = service(MockHttpTransport::new().add_response(MockResponse::ok("[]")));

        let err = users
            .fetch_profile(&AccessToken::new("TOKEN"), &["name"])
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Parse(ParseError::UnexpectedShape { .. })));
    }
}
