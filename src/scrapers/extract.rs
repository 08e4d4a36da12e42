use crate::models::ListingAttributes;
use crate::scrapers::site;
use scraper::{Html, Selector};
use tracing::debug;

/// Extract floor area, bedroom count and description from rendered
/// listing markup.
///
/// Attribute rows are flex list items; a row is only counted when it
/// carries a bold value span, and a non-numeric value leaves the field
/// absent rather than failing. When several rows match the same field the
/// last one wins; that mirrors the site's markup where the final match is
/// the canonical one.
pub fn extract(markup: &str) -> ListingAttributes {
    let document = Html::parse_document(markup);
    let row_selector = Selector::parse(site::ATTRIBUTE_ROW).unwrap();
    let value_selector = Selector::parse(site::ATTRIBUTE_VALUE).unwrap();
    let description_selector = Selector::parse(site::DESCRIPTION).unwrap();

    let mut attributes = ListingAttributes::default();

    for row in document.select(&row_selector) {
        let row_text = row
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let Some(value_el) = row.select(&value_selector).next() else {
            continue;
        };
        let value = value_el.text().collect::<String>().trim().to_string();

        if row_text.contains("m²") || row_text.contains("m2") {
            let cleaned = value.replace("m²", "").replace("m2", "");
            attributes.floor_area = parse_digits(cleaned.trim());
        } else if row_text.contains("slaapkamer") {
            attributes.bedroom_count = parse_digits(&value);
        }
    }

    if let Some(container) = document.select(&description_selector).next() {
        let text = container.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            attributes.description = Some(text);
        }
    }

    debug!(
        "Extracted attributes: area={:?} bedrooms={:?} description={}",
        attributes.floor_area,
        attributes.bedroom_count,
        attributes.description.is_some()
    );

    attributes
}

/// Parse a pure digit string; anything else is silently discarded.
fn parse_digits(value: &str) -> Option<u32> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}
