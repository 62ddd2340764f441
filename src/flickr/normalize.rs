use std::convert::TryFrom;

use super::raw::{Dimension, Photo};

/// The variant chosen to represent a photo in the gallery.
#[derive(Debug, Default, PartialEq)]
pub struct BestImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

type Variant<'a> = (
    Option<&'a str>,
    Option<&'a Dimension>,
    Option<&'a Dimension>,
);

/// Size variants in order of preference: large, original, 800, 640, 500.
const VARIANTS: [for<'a> fn(&'a Photo) -> Variant<'a>; 5] = [
    |p| (p.url_l.as_deref(), p.width_l.as_ref(), p.height_l.as_ref()),
    |p| (p.url_o.as_deref(), p.width_o.as_ref(), p.height_o.as_ref()),
    |p| (p.url_c.as_deref(), p.width_c.as_ref(), p.height_c.as_ref()),
    |p| (p.url_z.as_deref(), p.width_z.as_ref(), p.height_z.as_ref()),
    |p| (p.url_m.as_deref(), p.width_m.as_ref(), p.height_m.as_ref()),
];

pub fn select_best_image(photo: &Photo) -> BestImage {
    VARIANTS
        .iter()
        .map(|variant| variant(photo))
        .find(|(url, _, _)| url.map_or(false, |url| !url.is_empty()))
        .map(|(url, width, height)| BestImage {
            url: url.unwrap_or_default().to_string(),
            width: width.and_then(parse_dimension),
            height: height.and_then(parse_dimension),
        })
        .unwrap_or_default()
}

/// Reads a width or height leniently, see [`leading_integer`]. Anything that
/// does not yield a finite, non-negative value that fits in a `u32` is `None`.
pub fn parse_dimension(value: &Dimension) -> Option<u32> {
    match value {
        Dimension::Number(n) if n.is_finite() && *n > -1.0 => {
            let truncated = n.trunc();
            if truncated <= f64::from(u32::MAX) {
                Some(truncated as u32)
            } else {
                None
            }
        },
        Dimension::Number(_) => None,
        Dimension::Text(text) => leading_integer(text).and_then(|n| u32::try_from(n).ok()),
        Dimension::Other(_) => None,
    }
}

/// Integer at the start of `text`: leading whitespace and a sign are
/// accepted, everything after the first non-digit is ignored. Values out of
/// `i64` range saturate.
pub fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);
    if digits.is_empty() {
        return None;
    }

    let value = match digits.parse::<i64>() {
        Ok(n) => n,
        Err(_) => i64::MAX,
    };
    Some(if negative { -value } else { value })
}

/// Splits Flickr's space separated tag list. Blank segments are dropped.
pub fn normalize_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|tags| {
        tags.split(' ')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
