use crate::models::PhotoReference;
use crate::scrapers::site;
use scraper::{Html, Selector};
use tracing::debug;

/// Enumerate photo-detail links from the rendered overview page.
///
/// Document order is preserved; it is the gallery display order and
/// determines final file numbering.
pub fn list_photo_links(overview_markup: &str) -> Vec<PhotoReference> {
    let document = Html::parse_document(overview_markup);
    let thumb_selector = Selector::parse(site::THUMBNAIL_LINK).unwrap();

    let links: Vec<PhotoReference> = document
        .select(&thumb_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(site::PHOTO_PATH_SEGMENT))
        .map(|href| PhotoReference {
            detail_url: site::absolute_url(href),
        })
        .collect();

    debug!("Found {} photo links on overview page", links.len());
    links
}

/// Resolve the largest image variant from a rendered photo-detail page.
///
/// The hero image lists its variants in a srcset ordered ascending by
/// size, so the last entry is the largest. A hero with an empty srcset
/// falls back to its plain src; no hero at all yields `None`, which the
/// caller treats as a per-photo failure.
pub fn resolve_high_res(photo_markup: &str) -> Option<String> {
    let document = Html::parse_document(photo_markup);
    let hero_selector = Selector::parse(site::PHOTO_HERO).unwrap();

    let image = document.select(&hero_selector).next()?;
    if let Some(url) = image.value().attr("srcset").and_then(largest_srcset_entry) {
        return Some(url);
    }
    image.value().attr("src").map(str::to_string)
}

/// URL token of the last entry in a comma-separated srcset list.
fn largest_srcset_entry(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .last()
        .and_then(|entry| entry.split_whitespace().next())
        .map(str::to_string)
}
