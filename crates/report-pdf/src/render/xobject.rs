//! Photo XObject registration and placement
//!
//! Normalized photos keep their source aspect; cells have a fixed one. The
//! renderer closes that gap with a cover crop (`resize_to_fill`) before
//! registering the pixels, so the placement transform is a plain scale and
//! nothing is ever stretched.
//!
//! At `dpi = 72` printpdf maps 1 px to 1 pt, so `scale = desired_pt / px`.

use image::imageops::FilterType;
use printpdf::{
    Op, PdfDocument, Pt, RawImage, RawImageData, RawImageFormat, XObjectId, XObjectTransform,
};

use crate::constants::mm_to_pt;
use crate::layout::Rect;
use crate::normalize::{EmbeddableImage, ImageOutcome, ProcessedEntry};
use crate::template::TemplateSpec;

/// A photo registered with the document, ready to place into cells.
#[derive(Debug, Clone)]
pub(crate) struct PlacedImage {
    pub xobj_id: XObjectId,
    pub px_width: u32,
    pub px_height: u32,
}

/// Register every ready photo as an XObject, cover-cropped to the template's
/// image aspect. The result is parallel to `entries`; placeholder cells get
/// `None`.
pub(crate) fn register_images(
    doc: &mut PdfDocument,
    entries: &[ProcessedEntry],
    spec: &TemplateSpec,
) -> Vec<Option<PlacedImage>> {
    entries
        .iter()
        .map(|processed| match &processed.image {
            ImageOutcome::Ready(image) => register_one(doc, image, spec.image_aspect),
            _ => None,
        })
        .collect()
}

fn register_one(
    doc: &mut PdfDocument,
    image: &EmbeddableImage,
    aspect: f32,
) -> Option<PlacedImage> {
    let decoded = match image::load_from_memory(&image.jpeg) {
        Ok(decoded) => decoded,
        Err(e) => {
            // Normalization produced these bytes, so this should not happen
            log::warn!("embedded photo no longer decodes: {e}");
            return None;
        }
    };

    let (target_w, target_h) = cover_target(decoded.width(), aspect);
    let cropped = decoded
        .resize_to_fill(target_w, target_h, FilterType::Lanczos3)
        .to_rgb8();
    let (px_width, px_height) = (cropped.width(), cropped.height());

    let raw = RawImage {
        pixels: RawImageData::U8(cropped.into_raw()),
        width: px_width as usize,
        height: px_height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    Some(PlacedImage {
        xobj_id: doc.add_image(&raw),
        px_width,
        px_height,
    })
}

/// Pixel dimensions of the cover crop: keep the source width, derive the
/// height from the cell aspect.
fn cover_target(source_width: u32, aspect: f32) -> (u32, u32) {
    let width = source_width.max(1);
    let height = ((width as f32 * aspect).round() as u32).max(1);
    (width, height)
}

/// Draw a registered photo into its image region.
pub(crate) fn place_image(
    ops: &mut Vec<Op>,
    image: &PlacedImage,
    region: &Rect,
    page_height_mm: f32,
) {
    ops.push(Op::UseXobject {
        id: image.xobj_id.clone(),
        transform: XObjectTransform {
            translate_x: Some(Pt(mm_to_pt(region.x))),
            translate_y: Some(Pt(mm_to_pt(page_height_mm - region.bottom()))),
            dpi: Some(72.0),
            scale_x: Some(scale_for(region.width, image.px_width)),
            scale_y: Some(scale_for(region.height, image.px_height)),
            rotate: None,
        },
    });
}

fn scale_for(region_mm: f32, px: u32) -> f32 {
    if px > 0 {
        mm_to_pt(region_mm) / px as f32
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportEntry;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ImageBuffer, Rgb};

    fn embeddable(width: u32, height: u32) -> EmbeddableImage {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgb([80u8, 120u8, 160u8]));
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, 85)
            .encode_image(&buffer)
            .unwrap();
        EmbeddableImage {
            jpeg,
            width,
            height,
        }
    }

    #[test]
    fn test_cover_target_follows_aspect() {
        assert_eq!(cover_target(700, 1.33), (700, 931));
        assert_eq!(cover_target(700, 0.75), (700, 525));
        assert_eq!(cover_target(0, 0.75), (1, 1));
    }

    #[test]
    fn test_scale_is_point_per_pixel() {
        // 66.4mm region, 700px: 188.25pt / 700px
        let scale = scale_for(66.4, 700);
        assert!((scale - mm_to_pt(66.4) / 700.0).abs() < 1e-6);
        assert_eq!(scale_for(10.0, 0), 1.0);
    }

    #[test]
    fn test_register_images_crops_to_cell_aspect() {
        let mut doc = PdfDocument::new("test");
        let spec = crate::template::TemplateId::A4Portrait2x3.spec();
        let entries = vec![
            ProcessedEntry {
                entry: ReportEntry::new("A", ""),
                image: ImageOutcome::Ready(embeddable(100, 50)),
            },
            ProcessedEntry {
                entry: ReportEntry::new("B", ""),
                image: ImageOutcome::Missing,
            },
        ];
        let placed = register_images(&mut doc, &entries, spec);
        assert_eq!(placed.len(), 2);
        let first = placed[0].as_ref().unwrap();
        // 0.75 aspect: 100px wide source crops to 100x75
        assert_eq!((first.px_width, first.px_height), (100, 75));
        assert!(placed[1].is_none());
    }

    #[test]
    fn test_place_image_transform() {
        let image = PlacedImage {
            xobj_id: XObjectId::new(),
            px_width: 100,
            px_height: 75,
        };
        let region = Rect::new(28.6, 48.0, 66.4, 88.312);
        let mut ops = Vec::new();
        place_image(&mut ops, &image, &region, 297.0);
        assert_eq!(ops.len(), 1);
        let Op::UseXobject { transform, .. } = &ops[0] else {
            panic!("expected xobject op");
        };
        assert_eq!(transform.dpi, Some(72.0));
        let ty = transform.translate_y.unwrap().0;
        assert!((ty - mm_to_pt(297.0 - (48.0 + 88.312))).abs() < 1e-3);
    }
}
