use crate::models::{ListingAttributes, OutputBundle};
use crate::rewrite::NO_DESCRIPTION;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::info;

/// Marker written for a numeric attribute the extractor could not find.
const MISSING_VALUE: &str = "keine Angabe";

/// Assemble the on-disk bundle: a fresh directory under `output_root`
/// holding the numbered images and the summary file.
///
/// Filesystem failures here are fatal; a bundle that cannot be written
/// completely is worthless to the delivery channel.
pub fn assemble(
    output_root: &Path,
    attributes: ListingAttributes,
    images: &[Vec<u8>],
    rewritten_description: &str,
) -> Result<OutputBundle> {
    fs::create_dir_all(output_root)
        .with_context(|| format!("Failed to create output root {}", output_root.display()))?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let directory_path = output_root.join(directory_name(&attributes, &timestamp));
    fs::create_dir_all(&directory_path)
        .with_context(|| format!("Failed to create bundle directory {}", directory_path.display()))?;

    for (index, image) in images.iter().enumerate() {
        let file_path = directory_path.join(format!("foto_{}.jpg", index + 1));
        fs::write(&file_path, image)
            .with_context(|| format!("Failed to write {}", file_path.display()))?;
    }

    let summary_text = summary_text(&attributes, rewritten_description);
    let summary_path = directory_path.join("infos.txt");
    fs::write(&summary_path, &summary_text)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    info!(
        "Bundle ready: {} ({} images)",
        directory_path.display(),
        images.len()
    );

    Ok(OutputBundle {
        directory_path,
        transformed_image_count: images.len(),
        attributes,
        summary_text,
    })
}

/// Descriptive name only when BOTH numeric attributes are present,
/// otherwise the fallback label. Never a partial combination.
fn directory_name(attributes: &ListingAttributes, timestamp: &str) -> String {
    match (attributes.floor_area, attributes.bedroom_count) {
        (Some(area), Some(bedrooms)) => {
            format!("{}qm-{}Schlafzimmer-{}", area, bedrooms, timestamp)
        }
        _ => format!("Unbekannt-{}", timestamp),
    }
}

/// Summary file body, fixed field order.
fn summary_text(attributes: &ListingAttributes, rewritten_description: &str) -> String {
    let mut text = String::new();

    text.push_str(&format!(
        "Quadratmeter: {}\n",
        attributes
            .floor_area
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    ));
    text.push_str(&format!(
        "Schlafzimmer: {}\n",
        attributes
            .bedroom_count
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    ));

    text.push_str("Beschreibung (Original):\n");
    text.push_str(attributes.description.as_deref().unwrap_or(NO_DESCRIPTION));
    text.push('\n');

    text.push_str("\nBeschreibung (Deutsch, umgeschrieben):\n");
    text.push_str(rewritten_description);
    text.push('\n');

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn attrs(area: Option<u32>, bedrooms: Option<u32>) -> ListingAttributes {
        ListingAttributes {
            floor_area: area,
            bedroom_count: bedrooms,
            description: Some("Mooi huis aan de gracht.".to_string()),
        }
    }

    #[test]
    fn directory_name_uses_attributes_only_when_both_present() {
        let stamp = "2026-08-23_12-00-00";
        assert_eq!(
            directory_name(&attrs(Some(85), Some(3)), stamp),
            "85qm-3Schlafzimmer-2026-08-23_12-00-00"
        );
        assert_eq!(
            directory_name(&attrs(Some(85), None), stamp),
            "Unbekannt-2026-08-23_12-00-00"
        );
        assert_eq!(
            directory_name(&attrs(None, Some(3)), stamp),
            "Unbekannt-2026-08-23_12-00-00"
        );
    }

    #[test]
    fn bundle_contains_numbered_images_and_summary() {
        let root = tempdir().unwrap();
        let images = vec![vec![1u8, 2], vec![3u8, 4], vec![5u8, 6]];

        let bundle = assemble(
            root.path(),
            attrs(Some(85), Some(3)),
            &images,
            "Schönes Haus an der Gracht.",
        )
        .unwrap();

        let name = bundle
            .directory_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(name.starts_with("85qm-3Schlafzimmer-"));
        assert_eq!(bundle.transformed_image_count, 3);

        for n in 1..=3 {
            assert!(bundle.directory_path.join(format!("foto_{}.jpg", n)).exists());
        }
        assert!(!bundle.directory_path.join("foto_4.jpg").exists());

        let summary = fs::read_to_string(bundle.directory_path.join("infos.txt")).unwrap();
        assert!(summary.contains("Quadratmeter: 85"));
        assert!(summary.contains("Schlafzimmer: 3"));
        assert!(summary.contains("Mooi huis aan de gracht."));
        assert!(summary.contains("Schönes Haus an der Gracht."));
    }

    #[test]
    fn missing_attributes_fall_back_to_unknown_label_and_markers() {
        let root = tempdir().unwrap();
        let attributes = ListingAttributes::default();

        let bundle = assemble(root.path(), attributes, &[], NO_DESCRIPTION).unwrap();

        let name = bundle
            .directory_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(name.starts_with("Unbekannt-"));

        let summary = fs::read_to_string(bundle.directory_path.join("infos.txt")).unwrap();
        assert!(summary.contains("Quadratmeter: keine Angabe"));
        assert!(summary.contains("Schlafzimmer: keine Angabe"));
        assert!(summary.contains(&format!("Beschreibung (Original):\n{}", NO_DESCRIPTION)));
    }
}
