use std::sync::Arc;
use std::time::Duration;

use opentelemetry_tide::TideExt;
use structopt::StructOpt;

use crate::flickr::client::{PhotoProvider, SurfPhotoProvider};
use crate::flickr::FeedConfig;

pub mod flickr;
pub mod models;
pub mod telemetry;
pub mod web;

#[derive(Clone)]
pub struct State {
    pub feed: Arc<FeedConfig>,
    pub provider: Arc<dyn PhotoProvider>,
    pub cache_max_age: Duration,
}

#[derive(Debug)]
pub enum Error {
    InvalidEndpoint(url::ParseError),
    TelemetryInitError(anyhow::Error),
    ListenError(std::io::Error),
}

impl From<Error> for u8 {
    fn from(error: Error) -> u8 {
        match error {
            Error::InvalidEndpoint(_) => 2,
            Error::TelemetryInitError(_) => 4,
            Error::ListenError(_) => 5,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidEndpoint(err) => {
                write!(f, "Invalid Flickr endpoint: {}", err)
            },
            Error::TelemetryInitError(err) => {
                write!(f, "Failed to init telemetry: {}", err)
            },
            Error::ListenError(err) => {
                write!(f, "Failed to start HTTP server: {}", err)
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Args {
    /// Host address to bind to.
    #[structopt(long, default_value = "localhost", env = "FOLIO_BIND_ADDRESS")]
    address: String,
    /// Port to bind to.
    #[structopt(long, default_value = "8166", env = "FOLIO_BIND_PORT")]
    port: u16,

    /// Flickr API key.
    #[structopt(long, env = "FLICKR_API_KEY", hide_env_values = true)]
    flickr_api_key: Option<String>,

    /// Flickr user whose public photos are shown when the request names none.
    #[structopt(long, env = "FLICKR_USER_ID")]
    flickr_user_id: Option<String>,

    /// Flickr REST endpoint.
    #[structopt(
        long,
        default_value = "https://www.flickr.com/services/rest/",
        env = "FOLIO_FLICKR_ENDPOINT"
    )]
    flickr_endpoint: String,

    /// Default number of photos per gallery page
    #[structopt(
        long,
        default_value = "12",
        env = "FOLIO_DEFAULT_PHOTOS_PER_PAGE"
    )]
    default_photos_per_page: u8,

    /// Max number of photos per gallery page
    #[structopt(long, default_value = "50", env = "FOLIO_MAX_PHOTOS_PER_PAGE")]
    max_photos_per_page: u8,

    /// How long browsers and proxies may cache the photo feed, in seconds.
    #[structopt(long, default_value = "1800", env = "FOLIO_PHOTOS_CACHE_SECONDS")]
    photos_cache_seconds: u64,
}

impl From<&Args> for FeedConfig {
    fn from(args: &Args) -> Self {
        FeedConfig::new(
            args.flickr_api_key.clone(),
            args.flickr_user_id.clone(),
            args.default_photos_per_page.into(),
            args.max_photos_per_page.into(),
        )
    }
}

/// Builds the HTTP application with all routes mounted.
pub fn server(state: State) -> tide::Server<State> {
    let mut app = tide::with_state(state);
    web::mount(&mut app);
    app
}

pub async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Args::from_args();

    telemetry::init().map_err(Error::TelemetryInitError)?;

    let feed = FeedConfig::from(&args);
    if feed.api_key.is_none() {
        tracing::warn!("FLICKR_API_KEY is not set, /api/photos will fail");
    }

    let endpoint = url::Url::parse(&args.flickr_endpoint).map_err(Error::InvalidEndpoint)?;

    let state = State {
        feed: Arc::new(feed),
        provider: Arc::new(SurfPhotoProvider::new(endpoint)),
        cache_max_age: Duration::from_secs(args.photos_cache_seconds),
    };
    let mut app = server(state);

    app.with_default_tracing_middleware();

    let address: &str = args.address.as_ref();
    app.listen((address, args.port))
        .await
        .map_err(Error::ListenError)?;

    Ok(())
}
