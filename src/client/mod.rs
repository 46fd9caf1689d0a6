//! Graph API client implementation.

use crate::auth::AccessToken;
use crate::config::GraphConfig;
use crate::errors::GraphResult;
use crate::services::{OAuthService, PhotosService, UsersService};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::GraphResponse;
use crate::user::UserProjection;
use std::sync::Arc;

pub(crate) mod executor;
pub(crate) use executor::api_error_detail;
pub use executor::RequestExecutor;

/// Facebook Graph API client.
///
/// This is the main entry point. It owns the shared configuration and
/// transport, and hands out services that borrow them through a
/// [`RequestExecutor`].
///
/// # Example
///
/// ```no_run
/// use facebook_graph_client::{GraphClient, GraphConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GraphConfig::builder()
///     .client_id("CLIENT_ID")
///     .app_secret("APP_SECRET")
///     .callback_url("https://example.com/auth/callback")
///     .access_scope(["email", "user_photos"])
///     .user_fields(["name", "email"])
///     .build()?;
///
/// let client = GraphClient::new(config)?;
/// let url = client.oauth().auth_url(None)?;
///
/// // ...redirect the user to `url`, receive `code` on the callback...
/// # let code = "CODE";
/// let user = client.user_from_code(code, None).await?;
/// println!("{}", user.field_str("name").await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphClient {
    config: Arc<GraphConfig>,
    executor: Arc<RequestExecutor>,
}

impl GraphClient {
    /// Creates a new client backed by reqwest.
    pub fn new(config: GraphConfig) -> GraphResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(config: GraphConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let config = Arc::new(config);
        let executor = Arc::new(RequestExecutor::new(config.clone(), transport));
        Self { config, executor }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Gets the request executor.
    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }

    // Service accessors

    /// Access the OAuth service.
    pub fn oauth(&self) -> OAuthService {
        OAuthService::new(self.executor.clone())
    }

    /// Access the photos service.
    pub fn photos(&self) -> PhotosService {
        PhotosService::new(self.executor.clone())
    }

    /// Access the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.executor.clone())
    }

    /// Authenticated GET of an arbitrary Graph path.
    ///
    /// `path` carries its own query string, e.g. `/me?fields=name`.
    pub async fn request(&self, path: &str, access_token: &AccessToken) -> GraphResult<GraphResponse> {
        self.executor.request(path, access_token).await
    }

    /// User projection over an existing token.
    pub fn user(&self, access_token: AccessToken) -> GraphResult<UserProjection> {
        UserProjection::from_token(self.clone(), access_token)
    }

    /// User projection from an authorization code. The code is exchanged
    /// immediately.
    pub async fn user_from_code(
        &self,
        code: &str,
        callback_override: Option<&str>,
    ) -> GraphResult<UserProjection> {
        UserProjection::from_code(self.clone(), code, callback_override).await
    }
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("graph_url", &self.config.graph_url.as_str())
            .finish_non_exhaustive()
    }
}
