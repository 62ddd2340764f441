use folio_api_structs::NormalizedPhoto;

use crate::flickr::normalize::{normalize_tags, select_best_image};
use crate::flickr::raw;

const PHOTO_PAGE_BASE: &str = "https://www.flickr.com/photos";

impl From<raw::Photo> for NormalizedPhoto {
    fn from(p: raw::Photo) -> Self {
        let best_image = select_best_image(&p);
        let tags = normalize_tags(p.tags.as_deref());
        let id = p.id.unwrap_or_default();
        let owner = p.owner.unwrap_or_default();
        let link = format!("{}/{}/{}", PHOTO_PAGE_BASE, owner, id);

        NormalizedPhoto {
            id,
            title: p.title.unwrap_or_default(),
            description: p
                .description
                .and_then(|description| description.content)
                .unwrap_or_default(),
            taken_at: p.datetaken,
            tags,
            owner_name: p.ownername.unwrap_or_default(),
            owner_id: owner,
            image: best_image.url,
            width: best_image.width,
            height: best_image.height,
            link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_provider_record() {
        let photo: raw::Photo = serde_json::from_value(serde_json::json!({
            "id": "53012",
            "owner": "12345@N00",
            "ownername": "runner",
            "title": "Ridge",
            "description": {"_content": "Morning on the ridge"},
            "datetaken": "2023-06-01 06:12:44",
            "tags": "trail run  sunrise ",
            "url_o": "https://live.staticflickr.com/53012_o.jpg",
            "width_o": "4000",
            "height_o": "3000",
            "url_m": "https://live.staticflickr.com/53012_m.jpg",
            "width_m": 500,
            "height_m": 375
        }))
        .unwrap();

        assert_eq!(
            NormalizedPhoto::from(photo),
            NormalizedPhoto {
                id: "53012".to_string(),
                title: "Ridge".to_string(),
                description: "Morning on the ridge".to_string(),
                taken_at: Some("2023-06-01 06:12:44".to_string()),
                tags: vec!["trail".to_string(), "run".to_string(), "sunrise".to_string()],
                owner_name: "runner".to_string(),
                owner_id: "12345@N00".to_string(),
                image: "https://live.staticflickr.com/53012_o.jpg".to_string(),
                width: Some(4000),
                height: Some(3000),
                link: "https://www.flickr.com/photos/12345@N00/53012".to_string(),
            }
        );
    }

    #[test]
    fn absent_metadata_becomes_empty() {
        let photo: raw::Photo = serde_json::from_value(serde_json::json!({
            "id": "7",
            "owner": "99@N01",
            "title": "Untitled",
            "description": {}
        }))
        .unwrap();

        let normalized = NormalizedPhoto::from(photo);
        assert_eq!(normalized.description, "");
        assert_eq!(normalized.taken_at, None);
        assert!(normalized.tags.is_empty());
        assert_eq!(normalized.owner_name, "");
        assert_eq!(normalized.image, "");
        assert_eq!(normalized.width, None);
        assert_eq!(normalized.height, None);
        assert_eq!(normalized.link, "https://www.flickr.com/photos/99@N01/7");
    }

    #[test]
    fn null_identity_fields_do_not_reject_the_record() {
        let response: raw::ApiResponse = serde_json::from_value(serde_json::json!({
            "stat": "ok",
            "photos": {"photo": [
                {"id": "7", "owner": "99@N01", "title": null},
                {"id": null, "owner": null, "title": "Lost"}
            ]}
        }))
        .unwrap();

        let photos: Vec<NormalizedPhoto> = response
            .photos
            .and_then(|page| page.photo)
            .unwrap()
            .into_iter()
            .map(NormalizedPhoto::from)
            .collect();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].title, "");
        assert_eq!(photos[0].link, "https://www.flickr.com/photos/99@N01/7");
        assert_eq!(photos[1].id, "");
        assert_eq!(photos[1].owner_id, "");
        assert_eq!(photos[1].title, "Lost");
    }
}
