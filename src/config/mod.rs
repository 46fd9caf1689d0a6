//! Configuration management for the Graph client.
//!
//! Supports configuration via:
//! - Builder pattern
//! - Key/value assignments through [`GraphConfig::configure`]
//! - Environment variables
//!
//! A configuration is assembled once at startup and handed to
//! [`GraphClient::new`](crate::GraphClient::new), which shares it read-only.
//! Nothing inside the crate mutates it afterwards.

use crate::errors::{ConfigurationError, GraphError, GraphResult};
use crate::observability::Redacted;
use secrecy::{ExposeSecret, SecretString};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Implicit field always requested by the user projection
pub const PICTURE_FIELD: &str = "picture";

/// The recognized configuration options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Application secret
    AppSecret,
    /// OAuth client id
    ClientId,
    /// Registered callback URL
    CallbackUrl,
    /// Post-logout redirect target
    LogoutUrl,
    /// Requested authorization scopes
    AccessScope,
    /// Requested user profile fields
    UserFields,
}

impl ConfigKey {
    /// The option's name as accepted by [`GraphConfig::configure`]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::AppSecret => "app_secret",
            ConfigKey::ClientId => "client_id",
            ConfigKey::CallbackUrl => "callback_url",
            ConfigKey::LogoutUrl => "logout_url",
            ConfigKey::AccessScope => "access_scope",
            ConfigKey::UserFields => "user_fields",
        }
    }

    fn takes_list(&self) -> bool {
        matches!(self, ConfigKey::AccessScope | ConfigKey::UserFields)
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "app_secret" => Ok(ConfigKey::AppSecret),
            "client_id" => Ok(ConfigKey::ClientId),
            "callback_url" => Ok(ConfigKey::CallbackUrl),
            "logout_url" => Ok(ConfigKey::LogoutUrl),
            "access_scope" => Ok(ConfigKey::AccessScope),
            "user_fields" => Ok(ConfigKey::UserFields),
            _ => Err(ConfigurationError::UnrecognizedKey(s.to_string())),
        }
    }
}

/// A value assigned through [`GraphConfig::configure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// Scalar text value
    Text(String),
    /// Ordered list value
    List(Vec<String>),
    /// Clears an optional scalar
    Unset,
}

impl From<&str> for Setting {
    fn from(value: &str) -> Self {
        Setting::Text(value.to_string())
    }
}

impl From<String> for Setting {
    fn from(value: String) -> Self {
        Setting::Text(value)
    }
}

impl From<Option<String>> for Setting {
    fn from(value: Option<String>) -> Self {
        value.map(Setting::Text).unwrap_or(Setting::Unset)
    }
}

impl From<Vec<String>> for Setting {
    fn from(value: Vec<String>) -> Self {
        Setting::List(value)
    }
}

impl From<Vec<&str>> for Setting {
    fn from(value: Vec<&str>) -> Self {
        Setting::List(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Setting {
    fn from(value: [&str; N]) -> Self {
        Setting::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Configuration for the Graph client
#[derive(Clone)]
pub struct GraphConfig {
    pub(crate) app_secret: Option<SecretString>,
    pub(crate) client_id: Option<String>,
    pub(crate) callback_url: Option<String>,
    pub(crate) logout_url: Option<String>,
    pub(crate) access_scope: Vec<String>,
    pub(crate) user_fields: Vec<String>,
    /// Base URL of the Graph API
    pub graph_url: Url,
    /// Base URL of the www site (logout page)
    pub www_url: Url,
    /// Request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Append `appsecret_proof` to authenticated requests
    pub appsecret_proof: bool,
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("app_secret", &self.app_secret.as_ref().map(Redacted::new))
            .field("client_id", &self.client_id)
            .field("callback_url", &self.callback_url)
            .field("logout_url", &self.logout_url)
            .field("access_scope", &self.access_scope)
            .field("user_fields", &self.user_fields)
            .field("graph_url", &self.graph_url)
            .field("www_url", &self.www_url)
            .field("timeout", &self.timeout)
            .field("appsecret_proof", &self.appsecret_proof)
            .finish()
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            app_secret: None,
            client_id: None,
            callback_url: None,
            logout_url: None,
            access_scope: Vec::new(),
            user_fields: Vec::new(),
            graph_url: Url::parse(crate::DEFAULT_GRAPH_URL).expect("default graph URL is valid"),
            www_url: Url::parse(crate::DEFAULT_WWW_URL).expect("default www URL is valid"),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("facebook-graph-client/{}", env!("CARGO_PKG_VERSION")),
            appsecret_proof: false,
        }
    }
}

impl GraphConfig {
    /// Create a new configuration builder
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `FACEBOOK_APP_SECRET`
    /// - `FACEBOOK_CLIENT_ID`
    /// - `FACEBOOK_CALLBACK_URL`
    /// - `FACEBOOK_LOGOUT_URL`
    /// - `FACEBOOK_ACCESS_SCOPE` - comma-separated
    /// - `FACEBOOK_USER_FIELDS` - comma-separated
    /// - `FACEBOOK_GRAPH_URL`
    /// - `FACEBOOK_TIMEOUT` - seconds
    pub fn from_env() -> GraphResult<Self> {
        let mut builder = GraphConfigBuilder::new();

        if let Ok(secret) = std::env::var("FACEBOOK_APP_SECRET") {
            builder = builder.app_secret(&secret);
        }
        if let Ok(id) = std::env::var("FACEBOOK_CLIENT_ID") {
            builder = builder.client_id(&id);
        }
        if let Ok(url) = std::env::var("FACEBOOK_CALLBACK_URL") {
            builder = builder.callback_url(&url);
        }
        if let Ok(url) = std::env::var("FACEBOOK_LOGOUT_URL") {
            builder = builder.logout_url(&url);
        }
        if let Ok(scopes) = std::env::var("FACEBOOK_ACCESS_SCOPE") {
            builder = builder.access_scope(split_list(&scopes));
        }
        if let Ok(fields) = std::env::var("FACEBOOK_USER_FIELDS") {
            builder = builder.user_fields(split_list(&fields));
        }
        if let Ok(url) = std::env::var("FACEBOOK_GRAPH_URL") {
            builder = builder.graph_url(&url)?;
        }
        if let Ok(timeout) = std::env::var("FACEBOOK_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        builder.build()
    }

    /// Assign any of the six recognized options by name.
    ///
    /// Later assignments replace earlier ones, lists included. Options not
    /// mentioned keep their current value. All keys and values are checked
    /// before anything is written, so a failed call changes nothing.
    pub fn configure<K, I>(&mut self, settings: I) -> GraphResult<()>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Setting)>,
    {
        let mut parsed = Vec::new();
        for (key, value) in settings {
            let key: ConfigKey = key.as_ref().parse()?;
            match (&value, key.takes_list()) {
                (Setting::List(_), false) => {
                    return Err(invalid_value(key, "expected a single value, got a list"))
                }
                (Setting::Text(_), true) => {
                    return Err(invalid_value(key, "expected a list of values"))
                }
                (Setting::Unset, _)
                    if matches!(key, ConfigKey::AppSecret | ConfigKey::ClientId) =>
                {
                    return Err(invalid_value(key, "required setting cannot be unset"))
                }
                _ => {}
            }
            parsed.push((key, value));
        }

        for (key, value) in parsed {
            self.apply(key, value);
        }
        Ok(())
    }

    fn apply(&mut self, key: ConfigKey, value: Setting) {
        match (key, value) {
            (ConfigKey::AppSecret, Setting::Text(v)) => {
                self.app_secret = Some(SecretString::new(v))
            }
            (ConfigKey::ClientId, Setting::Text(v)) => self.client_id = Some(v),
            (ConfigKey::CallbackUrl, Setting::Text(v)) => self.callback_url = Some(v),
            (ConfigKey::CallbackUrl, Setting::Unset) => self.callback_url = None,
            (ConfigKey::LogoutUrl, Setting::Text(v)) => self.logout_url = Some(v),
            (ConfigKey::LogoutUrl, Setting::Unset) => self.logout_url = None,
            (ConfigKey::AccessScope, Setting::List(v)) => self.access_scope = v,
            (ConfigKey::AccessScope, Setting::Unset) => self.access_scope.clear(),
            (ConfigKey::UserFields, Setting::List(v)) => self.user_fields = v,
            (ConfigKey::UserFields, Setting::Unset) => self.user_fields.clear(),
            _ => {}
        }
    }

    /// Get the client id, failing if it is unset or empty
    pub fn client_id(&self) -> GraphResult<&str> {
        non_empty(self.client_id.as_deref(), ConfigKey::ClientId)
    }

    /// Get the application secret, failing if it is unset or empty
    pub fn app_secret(&self) -> GraphResult<&SecretString> {
        match &self.app_secret {
            Some(secret) if !secret.expose_secret().is_empty() => Ok(secret),
            _ => Err(ConfigurationError::MissingSetting(ConfigKey::AppSecret.as_str()).into()),
        }
    }

    /// Get the configured callback URL, if any
    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Get the logout redirect target, failing if it is unset or empty
    pub fn logout_url(&self) -> GraphResult<&str> {
        non_empty(self.logout_url.as_deref(), ConfigKey::LogoutUrl)
    }

    /// Get the requested authorization scopes
    pub fn access_scope(&self) -> &[String] {
        &self.access_scope
    }

    /// Get the requested user fields
    pub fn user_fields(&self) -> &[String] {
        &self.user_fields
    }

    /// Resolve the redirect URI: a configured callback always wins over the
    /// caller's override.
    pub fn redirect_uri<'a>(&'a self, callback_override: Option<&'a str>) -> Option<&'a str> {
        self.callback_url().or(callback_override)
    }

    /// The fields fetched by a user projection: the configured user fields
    /// followed by `picture`.
    pub fn profile_fields(&self) -> Vec<String> {
        let mut fields = self.user_fields.clone();
        if !fields.iter().any(|f| f == PICTURE_FIELD) {
            fields.push(PICTURE_FIELD.to_string());
        }
        fields
    }

    /// Build the full Graph URL for a path by literal concatenation
    pub fn graph_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.graph_url.as_str().trim_end_matches('/'), path)
    }

    /// Build the full www URL for a path by literal concatenation
    pub fn www_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.www_url.as_str().trim_end_matches('/'), path)
    }

    /// Validate the ambient configuration
    pub fn validate(&self) -> GraphResult<()> {
        for (name, url) in [("graph_url", &self.graph_url), ("www_url", &self.www_url)] {
            if !matches!(url.scheme(), "https" | "http") {
                return Err(GraphError::Configuration(
                    ConfigurationError::InvalidConfiguration {
                        message: format!("{} must use http or https", name),
                    },
                ));
            }
        }

        if self.timeout.is_zero() {
            return Err(GraphError::Configuration(
                ConfigurationError::InvalidConfiguration {
                    message: "timeout must be greater than zero".to_string(),
                },
            ));
        }

        Ok(())
    }
}

fn non_empty(value: Option<&str>, key: ConfigKey) -> GraphResult<&str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigurationError::MissingSetting(key.as_str()).into()),
    }
}

fn invalid_value(key: ConfigKey, message: &str) -> GraphError {
    ConfigurationError::InvalidValue {
        key: key.as_str(),
        message: message.to_string(),
    }
    .into()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Builder for GraphConfig
#[derive(Default)]
pub struct GraphConfigBuilder {
    config: GraphConfig,
}

impl GraphConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: GraphConfig::default(),
        }
    }

    /// Set the application secret
    pub fn app_secret(mut self, secret: &str) -> Self {
        self.config.app_secret = Some(SecretString::new(secret.to_string()));
        self
    }

    /// Set the client id
    pub fn client_id(mut self, id: &str) -> Self {
        self.config.client_id = Some(id.to_string());
        self
    }

    /// Set the registered callback URL
    pub fn callback_url(mut self, url: &str) -> Self {
        self.config.callback_url = Some(url.to_string());
        self
    }

    /// Set the post-logout redirect target
    pub fn logout_url(mut self, url: &str) -> Self {
        self.config.logout_url = Some(url.to_string());
        self
    }

    /// Set the requested scopes
    pub fn access_scope<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.access_scope = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the requested user fields
    pub fn user_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.user_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the Graph API base URL
    pub fn graph_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.graph_url = parse_url(url)?;
        Ok(self)
    }

    /// Set the www base URL
    pub fn www_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.www_url = parse_url(url)?;
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Append `appsecret_proof` to authenticated requests
    pub fn appsecret_proof(mut self, enabled: bool) -> Self {
        self.config.appsecret_proof = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> GraphResult<GraphConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_url(url: &str) -> Result<Url, ConfigurationError> {
    Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
        message: format!("Invalid URL: {}", e),
    })
}
