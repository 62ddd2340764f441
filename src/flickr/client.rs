use serde::Serialize;
use surf::Url;

use super::raw::ApiResponse;
use super::UpstreamError;

pub const DEFAULT_ENDPOINT: &str = "https://www.flickr.com/services/rest/";

const PUBLIC_PHOTOS_METHOD: &str = "flickr.people.getPublicPhotos";

const EXTRAS: [&str; 9] = [
    "description",
    "date_taken",
    "tags",
    "owner_name",
    "url_o",
    "url_l",
    "url_c",
    "url_z",
    "url_m",
];

/// Query string of a `flickr.people.getPublicPhotos` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicPhotosQuery {
    pub method: &'static str,
    pub api_key: String,
    pub user_id: String,
    pub extras: String,
    pub per_page: u32,
    pub format: &'static str,
    pub nojsoncallback: u8,
}

impl PublicPhotosQuery {
    pub fn new(api_key: &str, user_id: &str, per_page: u32) -> Self {
        PublicPhotosQuery {
            method: PUBLIC_PHOTOS_METHOD,
            api_key: api_key.to_string(),
            user_id: user_id.to_string(),
            extras: EXTRAS.join(","),
            per_page,
            format: "json",
            nojsoncallback: 1,
        }
    }
}

#[async_trait::async_trait]
pub trait PhotoProvider: Send + Sync {
    async fn get_public_photos(
        &self,
        query: &PublicPhotosQuery,
    ) -> Result<ApiResponse, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct SurfPhotoProvider {
    client: surf::Client,
    endpoint: Url,
}

impl SurfPhotoProvider {
    pub fn new(endpoint: Url) -> Self {
        SurfPhotoProvider {
            client: surf::Client::new(),
            endpoint,
        }
    }

    fn url_for(&self, query: &PublicPhotosQuery) -> Result<Url, UpstreamError> {
        let mut url = self.endpoint.clone();
        let query_string = serde_qs::to_string(query)
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;
        url.set_query(Some(&query_string));
        Ok(url)
    }
}

#[async_trait::async_trait]
impl PhotoProvider for SurfPhotoProvider {
    async fn get_public_photos(
        &self,
        query: &PublicPhotosQuery,
    ) -> Result<ApiResponse, UpstreamError> {
        let url = self.url_for(query)?;

        let mut res = self
            .client
            .get(url.as_str())
            .header("Accept", "application/json")
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        let status = res.status();
        tracing::debug!(status = %status, "Flickr responded");
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status as u16,
                reason: status.canonical_reason().to_string(),
            });
        }

        let body = res
            .body_string()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
