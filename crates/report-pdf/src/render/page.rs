//! Page assembly
//!
//! One function per page region: the metadata or minimal header, the cards,
//! the footer. Draw order inside a card matches the visual stacking: bands
//! and photo first, timestamp overlay, observation text, then the card
//! border on top.

use chrono::Local;
use printpdf::{BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions};

use crate::constants::{
    ATTRIBUTION, CARD_HEADER_BASELINE_MM, CARD_TEXT_INSET_MM, DEFAULT_TITLE, FOOTER_BASELINE_MM,
    HEADER_FIELD_GAP_MM, HEADER_ROW_1_MM, HEADER_ROW_2_MM, HEADER_TITLE_MM, IMAGE_ERROR,
    MINIMAL_TITLE_MM, OBSERVATIONS_TITLE, OBS_LINE_HEIGHT_MM, OBS_TEXT_INSET_MM, OBS_TEXT_TOP_MM,
    OBS_TITLE_BASELINE_MM, STYLE, TIMESTAMP_HALO_MM, TIMESTAMP_INSET_MM,
};
use crate::layout::{PlacedCell, Rect, layout_page};
use crate::normalize::ProcessedEntry;
use crate::paginate::{Page, paginate};
use crate::render::shapes::{fill_rect, stroke_rect};
use crate::render::text::{draw_text, text_width_mm};
use crate::render::xobject::{PlacedImage, place_image, register_images};
use crate::template::TemplateSpec;
use crate::timefmt::format_header_date;
use crate::types::{HeaderMetadata, ReportError, Result, text_or};

/// Render the whole document and return the PDF bytes.
///
/// Photos are registered as XObjects once per entry up front; pages then
/// reference them by id, so a photo is never embedded twice.
pub(crate) fn render_document(
    entries: &[ProcessedEntry],
    header: &HeaderMetadata,
    spec: &TemplateSpec,
    include_header: bool,
) -> Result<Vec<u8>> {
    let pages = paginate(entries, spec);
    if pages.is_empty() {
        return Err(ReportError::NoEntries);
    }

    let mut doc = PdfDocument::new(text_or(&header.type_of_report, DEFAULT_TITLE));
    let images = register_images(&mut doc, entries, spec);
    let date_fallback = format_header_date(&Local::now());

    let (page_w, page_h) = spec.page_size_mm();
    doc.pages = pages
        .iter()
        .map(|page| {
            PdfPage::new(
                Mm(page_w),
                Mm(page_h),
                page_ops(&images, page, header, &date_fallback, spec, include_header),
            )
        })
        .collect();

    let mut warnings = Vec::new();
    Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
}

fn page_ops(
    images: &[Option<PlacedImage>],
    page: &Page<'_>,
    header: &HeaderMetadata,
    date_fallback: &str,
    spec: &TemplateSpec,
    include_header: bool,
) -> Vec<Op> {
    let (page_w, page_h) = spec.page_size_mm();
    let mut ops = Vec::new();

    header_ops(&mut ops, header, date_fallback, spec, include_header, page_w, page_h);

    let page_images = &images[page.start_index..page.start_index + page.entries.len()];
    for (cell, image) in layout_page(page, spec, include_header).iter().zip(page_images) {
        cell_ops(&mut ops, cell, image.as_ref(), page_h);
    }

    footer_ops(&mut ops, page, spec, page_w, page_h);
    ops
}

fn header_ops(
    ops: &mut Vec<Op>,
    header: &HeaderMetadata,
    date_fallback: &str,
    spec: &TemplateSpec,
    include_header: bool,
    page_w: f32,
    page_h: f32,
) {
    if !include_header {
        // Minimal header is always the fixed title, whatever the metadata says
        let x = (page_w - text_width_mm(DEFAULT_TITLE, STYLE.minimal_title_size_pt)) / 2.0;
        draw_text(
            ops,
            DEFAULT_TITLE,
            BuiltinFont::HelveticaBold,
            STYLE.minimal_title_size_pt,
            x,
            MINIMAL_TITLE_MM,
            STYLE.black,
            page_h,
        );
        return;
    }

    let margin = spec.header_footer_margin_mm;
    let size = STYLE.header_meta_size_pt;

    let company = format!("Company: {}", text_or(&header.company, "Company Name"));
    draw_text(
        ops,
        &company,
        BuiltinFont::Helvetica,
        size,
        margin,
        HEADER_ROW_1_MM,
        STYLE.black,
        page_h,
    );

    let created_by = format!("Created By: {}", text_or(&header.created_by, "Inspector"));
    let created_by_x = margin + text_width_mm(&company, size) + HEADER_FIELD_GAP_MM;
    draw_text(
        ops,
        &created_by,
        BuiltinFont::Helvetica,
        size,
        created_by_x,
        HEADER_ROW_1_MM,
        STYLE.black,
        page_h,
    );

    let report_for = format!("Report For: {}", text_or(&header.report_for, "Client"));
    draw_text(
        ops,
        &report_for,
        BuiltinFont::Helvetica,
        size,
        margin,
        HEADER_ROW_2_MM,
        STYLE.black,
        page_h,
    );

    let date = format!("Date: {}", text_or(&header.date, date_fallback));
    draw_text(
        ops,
        &date,
        BuiltinFont::Helvetica,
        size,
        page_w - margin - text_width_mm(&date, size),
        HEADER_ROW_2_MM,
        STYLE.black,
        page_h,
    );

    let title = text_or(&header.type_of_report, DEFAULT_TITLE);
    let title_x = (page_w - text_width_mm(title, STYLE.header_title_size_pt)) / 2.0;
    draw_text(
        ops,
        title,
        BuiltinFont::HelveticaBold,
        STYLE.header_title_size_pt,
        title_x,
        HEADER_TITLE_MM,
        STYLE.black,
        page_h,
    );
}

fn cell_ops(ops: &mut Vec<Op>, cell: &PlacedCell, image: Option<&PlacedImage>, page_h: f32) {
    fill_rect(ops, &cell.header_band, STYLE.white, page_h);
    stroke_rect(ops, &cell.header_band, STYLE.gray, STYLE.border_width_mm, page_h);

    let band_baseline = cell.card.y + CARD_HEADER_BASELINE_MM;
    draw_text(
        ops,
        &cell.location_text,
        BuiltinFont::HelveticaBold,
        STYLE.location_size_pt,
        cell.card.x + CARD_TEXT_INSET_MM,
        band_baseline,
        STYLE.black,
        page_h,
    );
    let index_x = cell.header_band.right()
        - text_width_mm(&cell.index_label, STYLE.index_size_pt)
        - CARD_TEXT_INSET_MM;
    draw_text(
        ops,
        &cell.index_label,
        BuiltinFont::HelveticaBold,
        STYLE.index_size_pt,
        index_x,
        band_baseline,
        STYLE.black,
        page_h,
    );

    match image {
        Some(placed) => place_image(ops, placed, &cell.image_region, page_h),
        // Registration failure after normalization degrades like a bad photo
        None => placeholder_ops(ops, cell.placeholder.unwrap_or(IMAGE_ERROR), &cell.image_region, page_h),
    }

    if let Some(stamp) = &cell.timestamp {
        timestamp_ops(ops, stamp, &cell.image_region, page_h);
    }

    if let Some(band) = &cell.observations_band {
        fill_rect(ops, band, STYLE.observation_fill, page_h);
        draw_text(
            ops,
            OBSERVATIONS_TITLE,
            BuiltinFont::HelveticaBold,
            STYLE.obs_title_size_pt,
            band.x + OBS_TEXT_INSET_MM,
            band.y + OBS_TITLE_BASELINE_MM,
            STYLE.black,
            page_h,
        );
        for (line_index, line) in cell.observation_lines.iter().enumerate() {
            draw_text(
                ops,
                line,
                BuiltinFont::Helvetica,
                STYLE.obs_text_size_pt,
                band.x + OBS_TEXT_INSET_MM,
                band.y + OBS_TEXT_TOP_MM + line_index as f32 * OBS_LINE_HEIGHT_MM,
                STYLE.black,
                page_h,
            );
        }
    }

    stroke_rect(ops, &cell.card, STYLE.gray, STYLE.border_width_mm, page_h);
}

fn placeholder_ops(ops: &mut Vec<Op>, label: &str, region: &Rect, page_h: f32) {
    fill_rect(ops, region, STYLE.light_gray, page_h);
    let x = region.center_x() - text_width_mm(label, STYLE.placeholder_size_pt) / 2.0;
    draw_text(
        ops,
        label,
        BuiltinFont::HelveticaOblique,
        STYLE.placeholder_size_pt,
        x,
        region.center_y(),
        STYLE.dark_gray,
        page_h,
    );
}

/// White halo passes under the black timestamp keep it readable on any
/// photo background.
fn timestamp_ops(ops: &mut Vec<Op>, stamp: &str, region: &Rect, page_h: f32) {
    let x = region.x + TIMESTAMP_INSET_MM;
    let baseline = region.bottom() - TIMESTAMP_INSET_MM;
    for (dx, dy) in [
        (-TIMESTAMP_HALO_MM, 0.0),
        (TIMESTAMP_HALO_MM, 0.0),
        (0.0, -TIMESTAMP_HALO_MM),
        (0.0, TIMESTAMP_HALO_MM),
    ] {
        draw_text(
            ops,
            stamp,
            BuiltinFont::HelveticaBold,
            STYLE.timestamp_size_pt,
            x + dx,
            baseline + dy,
            STYLE.white,
            page_h,
        );
    }
    draw_text(
        ops,
        stamp,
        BuiltinFont::HelveticaBold,
        STYLE.timestamp_size_pt,
        x,
        baseline,
        STYLE.black,
        page_h,
    );
}

fn footer_ops(ops: &mut Vec<Op>, page: &Page<'_>, spec: &TemplateSpec, page_w: f32, page_h: f32) {
    let margin = spec.header_footer_margin_mm;
    let baseline = page_h - FOOTER_BASELINE_MM;
    draw_text(
        ops,
        ATTRIBUTION,
        BuiltinFont::Helvetica,
        STYLE.footer_size_pt,
        margin,
        baseline,
        STYLE.dark_gray,
        page_h,
    );
    let page_text = format!("Page {} of {}", page.page_number, page.total_pages);
    draw_text(
        ops,
        &page_text,
        BuiltinFont::Helvetica,
        STYLE.footer_size_pt,
        page_w - margin - text_width_mm(&page_text, STYLE.footer_size_pt),
        baseline,
        STYLE.dark_gray,
        page_h,
    );
}
