use tide::{Body, Response};

use crate::flickr::{FeedError, UpstreamError};
use folio_api_structs::ErrorBody;

/// Converts a feed failure into the JSON error body sent to the browser.
pub fn error_response(err: &FeedError) -> tide::Result<Response> {
    match err {
        FeedError::Configuration(_) => tracing::error!("Photo feed misconfigured: {}", err),
        FeedError::Upstream(UpstreamError::Decode(source)) => {
            tracing::warn!("Could not decode Flickr response: {}", source)
        },
        FeedError::Upstream(_) => tracing::warn!("Flickr request failed: {}", err),
    }

    let body = ErrorBody {
        error: err.to_string(),
        code: err.code(),
    };

    Ok(Response::builder(err.status())
        .body(Body::from_json(&body)?)
        .build())
}
