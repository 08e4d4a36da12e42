//! Funda site adapter: every selector and URL convention lives here so a
//! markup change on the site touches one file, not the pipeline.

/// Base origin used to absolutize relative hrefs.
pub const BASE_ORIGIN: &str = "https://www.funda.nl";

/// Cookie consent accept button (Didomi overlay).
pub const CONSENT_ACCEPT: &str = "#didomi-notice-agree-button";

/// Attribute rows on the listing page.
pub const ATTRIBUTE_ROW: &str = "li.flex";

/// Bold value span inside an attribute row.
pub const ATTRIBUTE_VALUE: &str = r"span.md\:font-bold";

/// Listing description container.
pub const DESCRIPTION: &str = ".listing-description-text";

/// Thumbnail anchors on the photo overview page.
pub const THUMBNAIL_LINK: &str = "ul.mt-6 li a";

/// Href path segment that marks a photo-detail link.
pub const PHOTO_PATH_SEGMENT: &str = "/media/foto/";

/// Hero image on a photo-detail page, carrying the resolution variants.
pub const PHOTO_HERO: &str = "img[srcset]";

/// The photo overview page lives under the listing URL plus this suffix.
pub fn overview_url(listing_url: &str) -> String {
    format!("{}/overzicht", listing_url.trim_end_matches('/'))
}

/// Resolve a possibly relative href against the site origin.
pub fn absolute_url(href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", BASE_ORIGIN, href)
    } else {
        href.to_string()
    }
}
