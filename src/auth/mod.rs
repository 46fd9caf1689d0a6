//! Access tokens and the pieces of the OAuth exchange that need no network.

use crate::errors::TokenExchangeError;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

/// An opaque Graph access token.
///
/// The client never stores tokens beyond the call or projection they were
/// handed to, and tracks no expiry.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    /// Expose the token for use in requests
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the token string is empty
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AccessToken {}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken([REDACTED])")
    }
}

/// Extract the access token from an exchange response body.
///
/// The body is `key=value&key=value` text. The token is the value of the
/// `access_token` segment, up to the next `&` or the end of the body.
pub fn parse_access_token(body: &str) -> Result<AccessToken, TokenExchangeError> {
    body.trim()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "access_token")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(AccessToken::new)
        .ok_or(TokenExchangeError::MissingToken)
}

/// Compute the `appsecret_proof` for a token: hex HMAC-SHA256 of the token
/// keyed by the app secret.
pub fn appsecret_proof(app_secret: &SecretString, token: &AccessToken) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(app_secret.expose_secret().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(token.expose().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("access_token=ACCESS_TOKEN&", "ACCESS_TOKEN" ; "trailing ampersand")]
    #[test_case("access_token=TOK&expires=5183999", "TOK" ; "followed by expiry")]
    #[test_case("expires=5183999&access_token=TOK", "TOK" ; "last segment")]
    #[test_case("access_token=TOK\n", "TOK" ; "trailing newline")]
    fn test_parse_access_token(body: &str, expected: &str) {
        assert_eq!(parse_access_token(body).unwrap().expose(), expected);
    }

    #[test_case("" ; "empty body")]
    #[test_case("expires=5183999" ; "no token segment")]
    #[test_case("access_token=&expires=1" ; "empty token")]
    #[test_case(r#"{"error":{"message":"bad code"}}"# ; "json error body")]
    fn test_parse_access_token_missing(body: &str) {
        assert_eq!(
            parse_access_token(body).unwrap_err(),
            TokenExchangeError::MissingToken
        );
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("EAAG-secret");
        assert_eq!(format!("{:?}", token), "AccessToken([REDACTED])");
    }

    #[test]
    fn test_appsecret_proof() {
        let secret = SecretString::new("APP_SECRET".to_string());
        let proof = appsecret_proof(&secret, &AccessToken::new("TOKEN"));

        assert_eq!(proof.len(), 64);
        assert!(proof.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(proof, appsecret_proof(&secret, &AccessToken::new("TOKEN")));
        assert_ne!(proof, appsecret_proof(&secret, &AccessToken::new("OTHER")));
    }
}
