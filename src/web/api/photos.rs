use tide::http::Url;
use tide::{Body, Request, Response};

use crate::flickr;
use crate::web::api::utils::error_response;
use folio_api_structs::PhotoFeed;

pub(super) fn mount(mut route: tide::Route<crate::State>) {
    route.get(list_photos);
}

// Both kept as text so that a malformed page size falls back to the default
// instead of rejecting the request.
#[derive(Debug, Default, PartialEq)]
struct PhotosQueryParams {
    user_id: Option<String>,
    per_page: Option<String>,
}

impl PhotosQueryParams {
    /// First occurrence of each key wins; unknown keys are ignored.
    fn from_url(url: &Url) -> Self {
        let mut params = PhotosQueryParams::default();
        for (key, value) in url.query_pairs() {
            let slot = match &*key {
                "user_id" => &mut params.user_id,
                "per_page" => &mut params.per_page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

async fn list_photos(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let query = PhotosQueryParams::from_url(req.url());

    let result = flickr::fetch_and_normalize(
        state.provider.as_ref(),
        &state.feed,
        query.user_id.as_deref(),
        query.per_page.as_deref(),
    )
    .await;

    let items = match result {
        Ok(items) => items,
        Err(err) => return error_response(&err),
    };

    let max_age = state.cache_max_age.as_secs();
    let res = Response::builder(tide::StatusCode::Ok)
        .header(
            "Cache-Control",
            format!("public, max-age={}, s-maxage={}", max_age, max_age),
        )
        .body(Body::from_json(&PhotoFeed { items })?)
        .build();
    Ok(res)
}
