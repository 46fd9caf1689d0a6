//! OAuth service: authorization URL, code exchange and logout URL.

use crate::auth::{parse_access_token, AccessToken};
use crate::client::{api_error_detail, RequestExecutor};
use crate::errors::{GraphResult, TokenExchangeError};
use crate::observability::redact_token;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Query parameters of the code exchange request
#[derive(Clone, Serialize)]
pub struct AccessTokenRequest<'a> {
    /// OAuth client id
    pub client_id: &'a str,
    /// Redirect URI, omitted when none is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<&'a str>,
    /// Application secret
    pub client_secret: &'a str,
    /// Authorization code
    pub code: &'a str,
}

/// OAuth service
#[derive(Debug, Clone)]
pub struct OAuthService {
    executor: Arc<RequestExecutor>,
}

impl OAuthService {
    /// Create a new OAuth service
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Build the authorization URL the user is sent to for consent.
    ///
    /// A configured callback URL always wins over `callback_override`.
    /// Values are substituted as-is.
    pub fn auth_url(&self, callback_override: Option<&str>) -> GraphResult<String> {
        let config = self.executor.config();
        let client_id = config.client_id()?;
        let redirect_uri = config.redirect_uri(callback_override).unwrap_or_default();

        Ok(format!(
            "{}?client_id={}&redirect_uri={}&scope={}",
            config.graph_endpoint("/oauth/authorize"),
            client_id,
            redirect_uri,
            config.access_scope().join(",")
        ))
    }

    /// Exchange an authorization code for an access token
    #[instrument(skip(self, code))]
    pub async fn fetch_token(
        &self,
        code: &str,
        callback_override: Option<&str>,
    ) -> GraphResult<AccessToken> {
        let config = self.executor.config();
        let request = AccessTokenRequest {
            client_id: config.client_id()?,
            redirect_uri: config.redirect_uri(callback_override),
            client_secret: config.app_secret()?.expose_secret(),
            code,
        };

        let query = encode_query(&request)?;
        let url = format!("{}?{}", config.graph_endpoint("/oauth/access_token"), query);

        let response = self
            .executor
            .send("fetch_token", url)
            .await
            .map_err(TokenExchangeError::Transport)?;

        if !response.is_success() {
            return Err(TokenExchangeError::Status {
                status: response.status,
                detail: api_error_detail(&response),
            }
            .into());
        }

        let token = parse_access_token(&response.text())?;
        debug!(token = %redact_token(token.expose()), "Authorization code exchanged");
        Ok(token)
    }

    /// Build the logout URL for a token. No remote call is made.
    pub fn logout_url(&self, access_token: &AccessToken) -> GraphResult<String> {
        let config = self.executor.config();
        Ok(format!(
            "{}?next={}&access_token={}",
            config.www_endpoint("/logout.php"),
            config.logout_url()?,
            access_token.expose()
        ))
    }
}

fn encode_query<T: Serialize>(params: &T) -> Result<String, TokenExchangeError> {
    serde_urlencoded::to_string(params).map_err(|e| TokenExchangeError::InvalidQuery(e.to_string()))
}
