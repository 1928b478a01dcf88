//! Grid geometry
//!
//! Derives card dimensions and positions from a [`TemplateSpec`]. Cards are
//! laid out row-major: cell index 0 is the top-left card, indexes walk left
//! to right, then down. The grid as a whole is centered horizontally inside
//! the printable width; leftover space from the width reserve and scale
//! factors becomes the centering offset.

use crate::constants::{HEADER_BLOCK_FULL_MM, HEADER_BLOCK_MINIMAL_MM, PAGE_MARGIN_MM};
use crate::layout::types::{GridPosition, Rect};
use crate::template::TemplateSpec;

/// Resolved dimensions for one template/header combination. All in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    /// Height of the image region inside each card
    pub image_height_mm: f32,
    /// Left edge of the first column (centering applied)
    pub origin_x_mm: f32,
    /// Top edge of the first row: header block plus content gap
    pub content_top_mm: f32,
}

/// Compute the grid geometry for a template.
///
/// `include_header` selects the full metadata header (more vertical space
/// consumed) or the minimal title-only header.
pub fn grid_geometry(spec: &TemplateSpec, include_header: bool) -> GridGeometry {
    let printable = spec.printable_width_mm();
    let card_width = (printable - spec.width_reserve_mm) / spec.columns as f32 * spec.width_scale;
    let image_height = card_width * spec.image_aspect;
    let card_height = image_height + spec.vertical_overhead_mm;

    let grid_width =
        spec.columns as f32 * card_width + (spec.columns as f32 - 1.0) * spec.cell_gap_x_mm;
    let origin_x = PAGE_MARGIN_MM + (printable - grid_width) / 2.0;

    let (header_block, content_gap) = if include_header {
        (HEADER_BLOCK_FULL_MM, spec.content_top_full_mm)
    } else {
        (HEADER_BLOCK_MINIMAL_MM, spec.content_top_minimal_mm)
    };

    GridGeometry {
        card_width_mm: card_width,
        card_height_mm: card_height,
        image_height_mm: image_height,
        origin_x_mm: origin_x,
        content_top_mm: header_block + content_gap,
    }
}

/// Row/column of a cell index within the grid (row-major).
pub fn grid_position(spec: &TemplateSpec, cell_index: usize) -> GridPosition {
    GridPosition {
        row: cell_index / spec.columns,
        col: cell_index % spec.columns,
    }
}

/// Outer rectangle of the card at a grid position.
pub fn card_rect(geometry: &GridGeometry, spec: &TemplateSpec, position: GridPosition) -> Rect {
    Rect::new(
        geometry.origin_x_mm
            + position.col as f32 * (geometry.card_width_mm + spec.cell_gap_x_mm),
        geometry.content_top_mm
            + position.row as f32 * (geometry.card_height_mm + spec.cell_gap_y_mm),
        geometry.card_width_mm,
        geometry.card_height_mm,
    )
}
