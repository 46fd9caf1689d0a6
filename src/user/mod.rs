//! Lazily loaded view of the authenticated user.
//!
//! A [`UserProjection`] binds one access token to the set of fields the
//! configuration asks for. The first field access fetches all of them in a
//! single request; every later access reads the cached object.

use crate::auth::AccessToken;
use crate::client::GraphClient;
use crate::errors::{ConstructionError, GraphResult, NotFoundError, ParseError, UnknownFieldError};
use crate::services::photos::picture_url;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::debug;

/// The authenticated user, with profile fields fetched on first use
pub struct UserProjection {
    client: GraphClient,
    access_token: AccessToken,
    known_fields: Vec<String>,
    cache: OnceCell<Map<String, Value>>,
}

impl UserProjection {
    /// Build a projection from a token or an authorization code.
    ///
    /// A non-empty token is used as-is. Otherwise a non-empty code is
    /// exchanged right away. With neither, construction fails.
    pub async fn new(
        client: GraphClient,
        access_token: Option<AccessToken>,
        code: Option<&str>,
        callback_override: Option<&str>,
    ) -> GraphResult<Self> {
        match (access_token.filter(|t| !t.is_empty()), code.filter(|c| !c.is_empty())) {
            (Some(token), _) => Self::from_token(client, token),
            (None, Some(code)) => Self::from_code(client, code, callback_override).await,
            (None, None) => Err(ConstructionError::MissingCredentials.into()),
        }
    }

    /// Build a projection over an existing token
    pub fn from_token(client: GraphClient, access_token: AccessToken) -> GraphResult<Self> {
        if access_token.is_empty() {
            return Err(ConstructionError::MissingCredentials.into());
        }

        let known_fields = client.config().profile_fields();
        Ok(Self {
            client,
            access_token,
            known_fields,
            cache: OnceCell::new(),
        })
    }

    /// Build a projection by exchanging an authorization code
    pub async fn from_code(
        client: GraphClient,
        code: &str,
        callback_override: Option<&str>,
    ) -> GraphResult<Self> {
        if code.is_empty() {
            return Err(ConstructionError::MissingCredentials.into());
        }

        let token = client.oauth().fetch_token(code, callback_override).await?;
        Self::from_token(client, token)
    }

    /// The token this projection acts with
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Fields that may be read, in request order
    pub fn known_fields(&self) -> &[String] {
        &self.known_fields
    }

    /// Whether the profile has been fetched yet
    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    /// All fetched fields, loading them on first use
    pub async fn fields(&self) -> GraphResult<&Map<String, Value>> {
        self.cache
            .get_or_try_init(|| async {
                debug!(fields = ?self.known_fields, "Loading user profile");
                self.client
                    .users()
                    .fetch_profile(&self.access_token, self.known_fields.as_slice())
                    .await
            })
            .await
    }

    /// Read one field.
    ///
    /// Names outside [`known_fields`](Self::known_fields) fail without any
    /// request being made.
    pub async fn field(&self, name: &str) -> GraphResult<&Value> {
        if !self.known_fields.iter().any(|f| f == name) {
            return Err(UnknownFieldError {
                name: name.to_string(),
            }
            .into());
        }

        self.fields()
            .await?
            .get(name)
            .filter(|value| !value.is_null())
            .ok_or_else(|| NotFoundError::Field(name.to_string()).into())
    }

    /// Read one field that must hold a string
    pub async fn field_str(&self, name: &str) -> GraphResult<&str> {
        self.field(name).await?.as_str().ok_or_else(|| {
            ParseError::UnexpectedShape {
                field: name.to_string(),
                expected: "a string",
            }
            .into()
        })
    }

    /// Profile album cover photo URL. Always fetched fresh.
    pub async fn photo(&self) -> GraphResult<String> {
        self.client.photos().fetch_photo(&self.access_token).await
    }

    /// Profile picture URL, read from the cached profile
    pub async fn thumbnail(&self) -> GraphResult<String> {
        picture_url(self.fields().await?.get(crate::config::PICTURE_FIELD))
    }

    /// Logout URL for this user's token
    pub fn logout_url(&self) -> GraphResult<String> {
        self.client.oauth().logout_url(&self.access_token)
    }
}

impl std::fmt::Debug for UserProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserProjection")
            .field("access_token", &self.access_token)
            .field("known_fields", &self.known_fields)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
