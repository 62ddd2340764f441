/// A single photo as served by `GET /api/photos`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPhoto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub taken_at: Option<String>,
    pub tags: Vec<String>,
    pub owner_name: String,
    pub owner_id: String,
    /// URL of the selected image variant, empty if the photo has none.
    pub image: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub link: String,
}

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PhotoFeed {
    pub items: Vec<NormalizedPhoto>,
}

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}
