//! Graph API response types.

use crate::errors::{GraphResult, NotFoundError, ParseError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed Graph response, produced fresh by every request
#[derive(Debug, Clone, PartialEq)]
pub enum GraphResponse {
    /// A JSON object
    Object(Map<String, Value>),
    /// A JSON array
    List(Vec<Value>),
    /// JSON `null`
    Empty,
}

impl GraphResponse {
    /// Parse a response body. An empty body is malformed JSON.
    pub fn from_slice(body: &[u8]) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::try_from(value)
    }

    /// Look up a key of an object response
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            GraphResponse::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Read a required string field
    pub fn require_str(&self, key: &str) -> GraphResult<&str> {
        let value = self
            .get(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| NotFoundError::Field(key.to_string()))?;
        value.as_str().ok_or_else(|| {
            ParseError::UnexpectedShape {
                field: key.to_string(),
                expected: "a string",
            }
            .into()
        })
    }

    /// Whether the response carries no data
    pub fn is_empty(&self) -> bool {
        match self {
            GraphResponse::Object(map) => map.is_empty(),
            GraphResponse::List(items) => items.is_empty(),
            GraphResponse::Empty => true,
        }
    }

    /// Take the object payload, failing for other shapes
    pub fn into_object(self) -> Result<Map<String, Value>, ParseError> {
        match self {
            GraphResponse::Object(map) => Ok(map),
            _ => Err(ParseError::UnexpectedShape {
                field: "response".to_string(),
                expected: "a JSON object",
            }),
        }
    }

    /// Deserialize the response into a typed value
    pub fn deserialize<T: for<'de> Deserialize<'de>>(self) -> Result<T, ParseError> {
        Ok(serde_json::from_value(self.into())?)
    }
}

impl TryFrom<Value> for GraphResponse {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(GraphResponse::Object(map)),
            Value::Array(items) => Ok(GraphResponse::List(items)),
            Value::Null => Ok(GraphResponse::Empty),
            _ => Err(ParseError::UnexpectedShape {
                field: "response".to_string(),
                expected: "an object, an array or null",
            }),
        }
    }
}

impl From<GraphResponse> for Value {
    fn from(response: GraphResponse) -> Self {
        match response {
            GraphResponse::Object(map) => Value::Object(map),
            GraphResponse::List(items) => Value::Array(items),
            GraphResponse::Empty => Value::Null,
        }
    }
}

/// Album list returned by `/me/albums`.
///
/// Entries stay as raw JSON. Only the album that is picked is decoded, so
/// unrelated albums of any shape never fail a lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumList {
    /// Albums
    #[serde(default)]
    pub data: Vec<Value>,
}

impl AlbumList {
    /// First album whose type is `profile`, decoded
    pub fn profile_album(&self) -> Result<Option<Album>, ParseError> {
        self.data
            .iter()
            .find(|album| album.get("type").and_then(Value::as_str) == Some("profile"))
            .map(Album::from_value)
            .transpose()
    }
}

/// A photo album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Album id, when it is a string
    pub id: Option<String>,
    /// Id of the album's cover photo
    pub cover_photo: Option<String>,
}

impl Album {
    /// Decode an album entry. `cover_photo` must be a string when present.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let cover_photo = match value.get("cover_photo") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(_) => {
                return Err(ParseError::UnexpectedShape {
                    field: "cover_photo".to_string(),
                    expected: "a photo id string",
                })
            }
        };

        Ok(Self {
            id: value.get("id").and_then(Value::as_str).map(String::from),
            cover_photo,
        })
    }
}
