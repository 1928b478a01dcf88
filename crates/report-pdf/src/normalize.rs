//! Image normalization
//!
//! Every photo goes through the same pass before layout:
//!
//! 1. load bytes (file path or `data:` URI)
//! 2. decode and apply the EXIF orientation tag
//! 3. downscale to at most [`TARGET_IMAGE_WIDTH_PX`] wide, aspect preserved
//! 4. re-encode as JPEG at quality [`JPEG_QUALITY`]
//!
//! A photo that fails any step degrades to a placeholder cell instead of
//! failing the whole report; the reason is logged at warn level.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::constants::{JPEG_QUALITY, TARGET_IMAGE_WIDTH_PX};
use crate::progress::{ProgressReporter, ProgressStage};
use crate::types::{ImageRef, ReportEntry};

/// A normalized photo, ready to embed: baseline JPEG bytes plus pixel
/// dimensions (orientation already applied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddableImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// What normalization produced for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Photo loaded and normalized
    Ready(EmbeddableImage),
    /// Entry has no photo; cell renders the "No Image" placeholder
    Missing,
    /// Photo was present but unloadable; cell renders "Image Error"
    Failed,
}

impl ImageOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ImageOutcome::Ready(_))
    }
}

/// An entry paired with its normalization outcome. This is the unit the
/// paginator and layout engine operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedEntry {
    pub entry: ReportEntry,
    pub image: ImageOutcome,
}

/// Normalize a single photo reference.
///
/// Returns `None` (with a warn log) on any load or decode failure.
pub fn normalize(photo: &ImageRef) -> Option<EmbeddableImage> {
    match normalize_inner(photo) {
        Ok(image) => Some(image),
        Err(reason) => {
            log::warn!("photo {} skipped: {}", photo_label(photo), reason);
            None
        }
    }
}

fn normalize_inner(photo: &ImageRef) -> Result<EmbeddableImage, String> {
    let bytes = load_photo_bytes(photo)?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| format!("decode failed: {e}"))?;
    let oriented = apply_orientation(decoded, exif_orientation(&bytes));

    let resized = if oriented.width() > TARGET_IMAGE_WIDTH_PX {
        let height = (TARGET_IMAGE_WIDTH_PX as f32 * oriented.height() as f32
            / oriented.width() as f32)
            .round()
            .max(1.0) as u32;
        oriented.resize_exact(TARGET_IMAGE_WIDTH_PX, height, FilterType::Lanczos3)
    } else {
        oriented
    };

    // JPEG has no alpha channel; to_rgb8 drops one if present
    let rgb = resized.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| format!("JPEG encode failed: {e}"))?;

    Ok(EmbeddableImage {
        jpeg,
        width: rgb.width(),
        height: rgb.height(),
    })
}

/// Normalize every photo in the entry list, in order, reporting one
/// compressing event per photo.
pub fn normalize_entries(
    entries: &[ReportEntry],
    reporter: &ProgressReporter,
) -> Vec<ProcessedEntry> {
    let total = entries.iter().filter(|e| e.photo.is_some()).count();
    if total == 0 {
        reporter.report_count(
            ProgressStage::Compressing,
            "No images to process.",
            100,
            0,
            0,
        );
    }

    let mut photo_index = 0usize;
    entries
        .iter()
        .map(|entry| {
            let image = match &entry.photo {
                None => ImageOutcome::Missing,
                Some(photo) => {
                    photo_index += 1;
                    let percent = (photo_index as f32 / total as f32 * 100.0).round() as u8;
                    reporter.report_count(
                        ProgressStage::Compressing,
                        format!("Processing image {photo_index} of {total}"),
                        percent,
                        photo_index,
                        total,
                    );
                    match normalize(photo) {
                        Some(image) => ImageOutcome::Ready(image),
                        None => ImageOutcome::Failed,
                    }
                }
            };
            ProcessedEntry {
                entry: entry.clone(),
                image,
            }
        })
        .collect()
}

fn load_photo_bytes(photo: &ImageRef) -> Result<Vec<u8>, String> {
    match photo {
        ImageRef::Path(path) => {
            std::fs::read(path).map_err(|e| format!("read failed: {e}"))
        }
        ImageRef::DataUri(uri) => decode_data_uri(uri),
    }
}

/// Decode a `data:<mime>;base64,<payload>` URI.
fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let comma = uri
        .find(',')
        .ok_or_else(|| "malformed data URI: no comma".to_string())?;
    let (header, payload) = uri.split_at(comma);
    if !header.ends_with(";base64") {
        return Err("data URI is not base64-encoded".to_string());
    }
    BASE64
        .decode(payload[1..].trim())
        .map_err(|e| format!("base64 decode failed: {e}"))
}

/// EXIF orientation value, defaulting to 1 (upright) when absent.
fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let Ok(data) = exif::Reader::new().read_from_container(&mut cursor) else {
        return 1;
    };
    match data.get_field(exif::Tag::Orientation, exif::In::PRIMARY) {
        Some(field) => match field.value {
            exif::Value::Short(ref values) => values.first().copied().map(u32::from).unwrap_or(1),
            _ => 1,
        },
        None => 1,
    }
}

/// Transpose pixels so the stored orientation tag becomes a no-op.
fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.fliph().rotate270(),
        6 => image.rotate90(),
        7 => image.fliph().rotate90(),
        8 => image.rotate270(),
        _ => image,
    }
}

fn photo_label(photo: &ImageRef) -> String {
    match photo {
        ImageRef::Path(path) => path.display().to_string(),
        ImageRef::DataUri(_) => "<data URI>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Rgb};

    fn test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
        });
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, 90)
            .encode_image(&buffer)
            .unwrap();
        bytes
    }

    fn test_data_uri(width: u32, height: u32) -> ImageRef {
        let encoded = BASE64.encode(test_jpeg(width, height));
        ImageRef::DataUri(format!("data:image/jpeg;base64,{encoded}"))
    }

    #[test]
    fn test_normalize_data_uri() {
        let image = normalize(&test_data_uri(400, 300)).unwrap();
        assert_eq!(image.width, 400);
        assert_eq!(image.height, 300);
        assert!(!image.jpeg.is_empty());
    }

    #[test]
    fn test_normalize_downscales_wide_photo() {
        let image = normalize(&test_data_uri(1400, 700)).unwrap();
        assert_eq!(image.width, 700);
        assert_eq!(image.height, 350);
    }

    #[test]
    fn test_normalize_keeps_narrow_photo() {
        let image = normalize(&test_data_uri(320, 480)).unwrap();
        assert_eq!(image.width, 320);
        assert_eq!(image.height, 480);
    }

    #[test]
    fn test_normalize_is_idempotent_on_width() {
        let first = normalize(&test_data_uri(1400, 933)).unwrap();
        let uri = format!("data:image/jpeg;base64,{}", BASE64.encode(&first.jpeg));
        let second = normalize(&ImageRef::DataUri(uri)).unwrap();
        assert_eq!(second.width, first.width);
        assert_eq!(second.height, first.height);
    }

    #[test]
    fn test_normalize_missing_file() {
        let missing = ImageRef::Path("/no/such/photo.jpg".into());
        assert_eq!(normalize(&missing), None);
    }

    #[test]
    fn test_normalize_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, test_jpeg(200, 100)).unwrap();
        let image = normalize(&ImageRef::Path(path)).unwrap();
        assert_eq!((image.width, image.height), (200, 100));
    }

    #[test]
    fn test_bad_data_uris() {
        assert_eq!(normalize(&ImageRef::DataUri("data:image/png".into())), None);
        assert_eq!(
            normalize(&ImageRef::DataUri("data:image/png;base64,!!!".into())),
            None
        );
        assert_eq!(
            normalize(&ImageRef::DataUri("data:text/plain,hello".into())),
            None
        );
    }

    #[test]
    fn test_apply_orientation_swaps_dimensions() {
        let image = DynamicImage::new_rgb8(40, 20);
        assert_eq!(apply_orientation(image.clone(), 6).dimensions(), (20, 40));
        assert_eq!(apply_orientation(image.clone(), 8).dimensions(), (20, 40));
        assert_eq!(apply_orientation(image.clone(), 3).dimensions(), (40, 20));
        assert_eq!(apply_orientation(image, 1).dimensions(), (40, 20));
    }

    #[test]
    fn test_normalize_entries_outcomes() {
        let entries = vec![
            ReportEntry::new("A", "no photo"),
            ReportEntry::new("B", "bad photo").with_photo(ImageRef::Path("/missing.jpg".into())),
            ReportEntry::new("C", "good photo").with_photo(test_data_uri(100, 100)),
        ];
        let (reporter, mut receiver) = ProgressReporter::channel();
        let processed = normalize_entries(&entries, &reporter);
        drop(reporter);

        assert_eq!(processed.len(), 3);
        assert_eq!(processed[0].image, ImageOutcome::Missing);
        assert_eq!(processed[1].image, ImageOutcome::Failed);
        assert!(processed[2].image.is_ready());

        let mut messages = Vec::new();
        while let Ok(update) = receiver.try_recv() {
            messages.push((update.message, update.current, update.total));
        }
        assert_eq!(
            messages,
            vec![
                ("Processing image 1 of 2".to_string(), Some(1), Some(2)),
                ("Processing image 2 of 2".to_string(), Some(2), Some(2)),
            ]
        );
    }

    #[test]
    fn test_normalize_entries_without_photos_reports_complete() {
        let entries = vec![ReportEntry::new("A", ""), ReportEntry::new("B", "")];
        let (reporter, mut receiver) = ProgressReporter::channel();
        let processed = normalize_entries(&entries, &reporter);
        drop(reporter);

        assert!(processed.iter().all(|p| p.image == ImageOutcome::Missing));
        let update = receiver.try_recv().unwrap();
        assert_eq!(update.message, "No images to process.");
        assert_eq!(update.percent, Some(100));
        assert_eq!(update.total, Some(0));
        assert!(receiver.try_recv().is_err());
    }
}
