use serde::Deserialize;

/// Response envelope of the Flickr REST API in `format=json` mode.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    pub stat: Option<String>,
    pub code: Option<i64>,
    pub message: Option<String>,
    pub photos: Option<PhotoPage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PhotoPage {
    pub photo: Option<Vec<Photo>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Content {
    #[serde(rename = "_content")]
    pub content: Option<String>,
}

/// Width or height as sent by Flickr, which uses numbers and strings
/// interchangeably.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: Option<String>,
    pub owner: Option<String>,
    pub ownername: Option<String>,
    pub title: Option<String>,
    pub description: Option<Content>,
    pub datetaken: Option<String>,
    pub tags: Option<String>,

    pub url_l: Option<String>,
    pub width_l: Option<Dimension>,
    pub height_l: Option<Dimension>,

    pub url_o: Option<String>,
    pub width_o: Option<Dimension>,
    pub height_o: Option<Dimension>,

    pub url_c: Option<String>,
    pub width_c: Option<Dimension>,
    pub height_c: Option<Dimension>,

    pub url_z: Option<String>,
    pub width_z: Option<Dimension>,
    pub height_z: Option<Dimension>,

    pub url_m: Option<String>,
    pub width_m: Option<Dimension>,
    pub height_m: Option<Dimension>,
}
