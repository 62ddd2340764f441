use std::convert::TryFrom;

use thiserror::Error;
use tide::StatusCode;

use folio_api_structs::NormalizedPhoto;

pub mod client;
pub mod normalize;
pub mod raw;

use client::{PhotoProvider, PublicPhotosQuery};

pub const DEFAULT_PER_PAGE: u32 = 12;
pub const MAX_PER_PAGE: u32 = 50;

/// Provider settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub api_key: Option<String>,
    pub default_user_id: Option<String>,
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            api_key: None,
            default_user_id: None,
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

impl FeedConfig {
    /// Page size limits are kept within `1..=MAX_PER_PAGE`, with the default
    /// never above the maximum.
    pub fn new(
        api_key: Option<String>,
        default_user_id: Option<String>,
        default_per_page: u32,
        max_per_page: u32,
    ) -> Self {
        let max_per_page = max_per_page.max(1).min(MAX_PER_PAGE);
        FeedConfig {
            api_key,
            default_user_id,
            default_per_page: default_per_page.max(1).min(max_per_page),
            max_per_page,
        }
    }

    /// Absent, non-numeric or non-positive page sizes fall back to the
    /// default; larger ones are capped. Trailing garbage after the digits is
    /// ignored, as for image dimensions.
    pub fn resolve_per_page(&self, per_page: Option<&str>) -> u32 {
        match per_page.and_then(normalize::leading_integer) {
            Some(n) if n >= 1 => u32::try_from(n)
                .unwrap_or(u32::MAX)
                .min(self.max_per_page),
            _ => self.default_per_page,
        }
    }

    fn resolve_user_id<'a>(&'a self, user_id: Option<&'a str>) -> Option<&'a str> {
        user_id
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.default_user_id.as_deref())
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationError {
    #[error("Missing Flickr API key. Set FLICKR_API_KEY in your environment.")]
    MissingApiKey,
    #[error("Missing Flickr user id. Provide ?user_id=... or set FLICKR_USER_ID.")]
    MissingUserId,
}

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Flickr responded with {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("{message}")]
    Reported { code: Option<i64>, message: String },
    #[error("Unexpected Flickr API response.")]
    UnexpectedShape { code: Option<i64> },
    #[error("Unexpected Flickr API response.")]
    Decode(#[from] serde_json::Error),
    #[error("Could not reach Flickr: {0}")]
    Transport(String),
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl FeedError {
    /// Status code the web layer answers with.
    pub fn status(&self) -> StatusCode {
        match self {
            FeedError::Configuration(ConfigurationError::MissingApiKey) => {
                StatusCode::InternalServerError
            },
            FeedError::Configuration(ConfigurationError::MissingUserId) => StatusCode::BadRequest,
            FeedError::Upstream(UpstreamError::Status { status, .. }) => {
                StatusCode::try_from(*status).unwrap_or(StatusCode::BadGateway)
            },
            FeedError::Upstream(_) => StatusCode::BadGateway,
        }
    }

    /// Provider error code, if Flickr sent one.
    pub fn code(&self) -> Option<i64> {
        match self {
            FeedError::Upstream(UpstreamError::Reported { code, .. })
            | FeedError::Upstream(UpstreamError::UnexpectedShape { code }) => *code,
            _ => None,
        }
    }
}

/// Fetches a page of a user's public photos and flattens them for the
/// gallery, keeping Flickr's order.
#[tracing::instrument(skip(provider, config))]
pub async fn fetch_and_normalize(
    provider: &dyn PhotoProvider,
    config: &FeedConfig,
    user_id: Option<&str>,
    per_page: Option<&str>,
) -> Result<Vec<NormalizedPhoto>, FeedError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(ConfigurationError::MissingApiKey)?;
    let user_id = config
        .resolve_user_id(user_id)
        .ok_or(ConfigurationError::MissingUserId)?;
    let per_page = config.resolve_per_page(per_page);

    let query = PublicPhotosQuery::new(api_key, user_id, per_page);
    let response = provider.get_public_photos(&query).await?;

    let photos = match (response.stat.as_deref(), response.photos.and_then(|p| p.photo)) {
        (Some("ok"), Some(photos)) => photos,
        _ => {
            return Err(match response.message {
                Some(message) => UpstreamError::Reported {
                    code: response.code,
                    message,
                },
                None => UpstreamError::UnexpectedShape {
                    code: response.code,
                },
            }
            .into())
        },
    };

    tracing::info!(user_id, per_page, count = photos.len(), "fetched public photos");

    Ok(photos.into_iter().map(NormalizedPhoto::from).collect())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::client::{PhotoProvider, PublicPhotosQuery};
    use super::raw::ApiResponse;
    use super::UpstreamError;

    /// In-memory provider answering every call from a canned JSON body or
    /// status code.
    pub(crate) struct StubProvider {
        reply: Result<serde_json::Value, u16>,
        pub(crate) calls: AtomicUsize,
        pub(crate) last_query: Mutex<Option<PublicPhotosQuery>>,
    }

    impl StubProvider {
        pub(crate) fn json(body: serde_json::Value) -> Self {
            StubProvider {
                reply: Ok(body),
                calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
            }
        }

        pub(crate) fn status(status: u16) -> Self {
            StubProvider {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn last_query(&self) -> Option<PublicPhotosQuery> {
            self.last_query.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PhotoProvider for StubProvider {
        async fn get_public_photos(
            &self,
            query: &PublicPhotosQuery,
        ) -> Result<ApiResponse, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            match &self.reply {
                Ok(body) => Ok(serde_json::from_value(body.clone())?),
                Err(status) => Err(UpstreamError::Status {
                    status: *status,
                    reason: "Service Unavailable".to_string(),
                }),
            }
        }
    }

    pub(crate) fn three_photos() -> serde_json::Value {
        serde_json::json!({
            "photos": {
                "page": 1, "pages": 1, "perpage": 12, "total": 3,
                "photo": [
                    {
                        "id": "101", "owner": "12345@N00", "title": "Ridge",
                        "description": {"_content": "Morning on the ridge"},
                        "datetaken": "2023-06-01 06:12:44",
                        "ownername": "runner", "tags": "trail run  sunrise ",
                        "url_l": "https://live.staticflickr.com/101_l.jpg",
                        "width_l": "1024", "height_l": 683
                    },
                    {
                        "id": "102", "owner": "12345@N00", "title": "Track",
                        "tags": ""
                    },
                    {
                        "id": "103", "owner": "12345@N00", "title": "Harbour",
                        "url_z": "https://live.staticflickr.com/103_z.jpg",
                        "width_z": 640, "height_z": "n/a"
                    }
                ]
            },
            "stat": "ok"
        })
    }

    pub(crate) fn configured() -> super::FeedConfig {
        super::FeedConfig {
            api_key: Some("key".to_string()),
            default_user_id: Some("12345@N00".to_string()),
            ..Default::default()
        }
    }
}
