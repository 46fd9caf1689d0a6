//! Photos service: profile photo and thumbnail lookups.

use crate::auth::AccessToken;
use crate::client::RequestExecutor;
use crate::config::PICTURE_FIELD;
use crate::errors::{GraphResult, NotFoundError, ParseError};
use crate::types::AlbumList;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Photos service
#[derive(Debug, Clone)]
pub struct PhotosService {
    executor: Arc<RequestExecutor>,
}

impl PhotosService {
    /// Create a new photos service
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Source URL of the cover photo of the user's profile album.
    ///
    /// Two requests: the album list, then the cover photo's `source`.
    #[instrument(skip_all)]
    pub async fn fetch_photo(&self, access_token: &AccessToken) -> GraphResult<String> {
        let albums: AlbumList = self
            .executor
            .request("/me/albums?fields=id,cover_photo,type", access_token)
            .await?
            .deserialize()
            .map_err(|_| ParseError::UnexpectedShape {
                field: "data".to_string(),
                expected: "a list of albums",
            })?;

        let album = albums.profile_album()?.ok_or(NotFoundError::ProfileAlbum)?;
        let cover_photo = album
            .cover_photo
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| NotFoundError::Field("cover_photo".to_string()))?;
        debug!(album_id = ?album.id, "Found profile album");

        let photo = self
            .executor
            .request(&format!("/{}/?fields=source", cover_photo), access_token)
            .await?;

        Ok(photo.require_str("source")?.to_string())
    }

    /// URL of the user's current profile picture
    #[instrument(skip_all)]
    pub async fn fetch_thumbnail(&self, access_token: &AccessToken) -> GraphResult<String> {
        let response = self
            .executor
            .request("/me?fields=picture", access_token)
            .await?;

        picture_url(response.get(PICTURE_FIELD))
    }
}

/// Read a `picture` value as a raw URL string.
pub(crate) fn picture_url(value: Option<&Value>) -> GraphResult<String> {
    match value {
        None | Some(Value::Null) => Err(NotFoundError::Field(PICTURE_FIELD.to_string()).into()),
        Some(Value::String(url)) => Ok(url.clone()),
        Some(_) => Err(ParseError::UnexpectedShape {
            field: PICTURE_FIELD.to_string(),
            expected: "a URL string",
        }
        .into()),
    }
}
