//! Service implementations for Graph API endpoints.
//!
//! Each service shares the client's [`RequestExecutor`](crate::client::RequestExecutor)
//! and groups the calls for one area of the Graph API.

pub mod oauth;
pub mod photos;
pub mod users;

pub use oauth::{AccessTokenRequest, OAuthService};
pub use photos::PhotosService;
pub use users::UsersService;
