//! Facebook Graph API Client
//!
//! Client for Facebook's Graph API with:
//! - OAuth authorization URL construction and code-for-token exchange
//! - Authenticated Graph requests parsed as JSON
//! - Profile photo and thumbnail lookups
//! - A lazily loaded user projection over a configured field set
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use facebook_graph_client::AccessToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from environment
//!     let client = facebook_graph_client::create_client_from_env()?;
//!
//!     let user = client.user(AccessToken::new("ACCESS_TOKEN"))?;
//!     println!("Hello, {}", user.field_str("name").await?);
//!     println!("Photo: {}", user.photo().await?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Services
pub mod services;
pub mod user;

// Observability
pub mod observability;

// Testing utilities
pub mod fixtures;
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use auth::AccessToken;
pub use client::GraphClient;
pub use config::{ConfigKey, GraphConfig, GraphConfigBuilder, Setting};
pub use errors::{GraphError, GraphResult};
pub use types::GraphResponse;
pub use user::UserProjection;

/// Default base URL for the Graph API
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Default base URL for the www site
pub const DEFAULT_WWW_URL: &str = "https://www.facebook.com";

/// Default timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Create a Graph client with the given configuration
pub fn create_client(config: GraphConfig) -> GraphResult<GraphClient> {
    GraphClient::new(config)
}

/// Create a Graph client from environment variables
///
/// See [`GraphConfig::from_env`] for the variables read.
pub fn create_client_from_env() -> GraphResult<GraphClient> {
    let config = GraphConfig::from_env()?;
    create_client(config)
}
