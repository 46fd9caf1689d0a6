//! Test fixtures for Graph API responses.
//!
//! Provides realistic payloads for unit tests.

use serde_json::{json, Value};

/// Token returned by [`TOKEN_RESPONSE`]
pub const ACCESS_TOKEN: &str = "EAAGm0PX4ZCpsBAKZCZAH4ZB";

/// Body of a successful code exchange
pub const TOKEN_RESPONSE: &str = "access_token=EAAGm0PX4ZCpsBAKZCZAH4ZB&expires=5183999";

/// Cover photo source URL returned by [`photo_source`]
pub const PHOTO_SOURCE_URL: &str = "https://scontent.xx.fbcdn.net/v/t1.0-9/1002_n.jpg";

/// Legacy profile picture URL
pub const THUMBNAIL_URL: &str = "https://graph.facebook.com/1234567890/picture";

/// Album list containing a profile album whose cover photo is `1002`
pub fn albums_with_profile() -> Value {
    json!({
        "data": [
            { "id": "2001", "cover_photo": "2002", "type": "normal" },
            { "id": "1001", "cover_photo": "1002", "type": "profile" },
            { "id": "3001", "cover_photo": "3002", "type": "cover" }
        ]
    })
}

/// Album list without a profile album
pub fn albums_without_profile() -> Value {
    json!({
        "data": [
            { "id": "2001", "cover_photo": "2002", "type": "normal" },
            { "id": "4001", "type": "mobile" }
        ]
    })
}

/// Photo object carrying a `source`
pub fn photo_source() -> Value {
    json!({
        "id": "1002",
        "source": PHOTO_SOURCE_URL
    })
}

/// `/me` response for `name,email,picture`
pub fn user_profile() -> Value {
    json!({
        "id": "1234567890",
        "name": "Jane Doe",
        "email": "jane@example.com",
        "picture": THUMBNAIL_URL
    })
}

/// Graph error envelope for an expired token
pub fn expired_token_error() -> Value {
    json!({
        "error": {
            "message": "Error validating access token: Session has expired.",
            "type": "OAuthException",
            "code": 190
        }
    })
}
