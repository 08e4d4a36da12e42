use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Structured attributes pulled from a rendered listing page.
///
/// Every field is independently optional: the source markup changes often
/// and a missing field is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingAttributes {
    /// Floor area in square meters.
    pub floor_area: Option<u32>,
    /// Number of bedrooms.
    pub bedroom_count: Option<u32>,
    /// Raw listing description text.
    pub description: Option<String>,
}

/// Link to a page hosting one photo at multiple resolutions.
///
/// Produced from the overview page in gallery display order; that order
/// determines final file numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoReference {
    pub detail_url: String,
}

/// Terminal result of one scrape: the on-disk bundle handed to the
/// delivery channel. The caller owns packaging and deletion.
#[derive(Debug, Clone)]
pub struct OutputBundle {
    pub directory_path: PathBuf,
    pub attributes: ListingAttributes,
    pub transformed_image_count: usize,
    pub summary_text: String,
}
