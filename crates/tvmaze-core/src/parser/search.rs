//! Search results parser for the TVmaze API
//!
//! Parses the JSON array returned by `/search/shows` into show summaries.

use serde::Deserialize;

use crate::error::Result;
use crate::types::{ShowSummary, MISSING_IMAGE_URL};

/// One entry of the search response: a relevance score wrapping a show.
#[derive(Debug, Deserialize)]
struct SearchHit {
    show: WireShow,
}

#[derive(Debug, Deserialize)]
struct WireShow {
    id: u32,
    name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    image: Option<WireImage>,
}

#[derive(Debug, Deserialize)]
struct WireImage {
    #[serde(default)]
    medium: Option<String>,
}

/// Pick the medium image URL, or the fixed fallback when there is none.
///
/// # Examples
/// ```
/// use tvmaze_core::parser::image_or_fallback;
/// use tvmaze_core::MISSING_IMAGE_URL;
///
/// assert_eq!(image_or_fallback(None), MISSING_IMAGE_URL);
/// assert_eq!(image_or_fallback(Some("")), MISSING_IMAGE_URL);
/// assert_eq!(image_or_fallback(Some("http://x/img.jpg")), "http://x/img.jpg");
/// ```
pub fn image_or_fallback(medium: Option<&str>) -> String {
    match medium.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => MISSING_IMAGE_URL.to_string(),
    }
}

/// Parse search results from the `/search/shows` JSON body.
///
/// Result order matches the response order.
///
/// # Arguments
/// * `json` - Raw JSON body of the search response
///
/// # Returns
/// * `Ok(Vec<ShowSummary>)` with one entry per hit
/// * `Err(TvMazeError::ParseError)` if the payload is malformed
pub fn parse_search_results(json: &str) -> Result<Vec<ShowSummary>> {
    let hits: Vec<SearchHit> = serde_json::from_str(json)?;

    Ok(hits.into_iter().map(|hit| convert_show(hit.show)).collect())
}

fn convert_show(show: WireShow) -> ShowSummary {
    let medium = show.image.as_ref().and_then(|image| image.medium.as_deref());

    ShowSummary {
        id: show.id,
        image: image_or_fallback(medium),
        name: show.name,
        summary: show.summary,
    }
}
