//! Shared constants for report layout
//!
//! This module centralizes magic numbers and constants used throughout
//! the layout and rendering pipeline. Page geometry is expressed in
//! millimeters with a top-left origin; conversion to PDF points happens
//! at the render boundary.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Page Frame
// =============================================================================

/// A4 short edge (mm)
pub const A4_WIDTH_MM: f32 = 210.0;

/// A4 long edge (mm)
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Outer page margin on all sides (mm); the card grid is centered inside it
pub const PAGE_MARGIN_MM: f32 = 15.0;

/// Vertical space consumed by the full metadata header block (mm)
pub const HEADER_BLOCK_FULL_MM: f32 = 10.0;

/// Vertical space consumed by the minimal title-only header block (mm)
pub const HEADER_BLOCK_MINIMAL_MM: f32 = 12.0;

/// Footer baseline, measured up from the bottom page edge (mm)
pub const FOOTER_BASELINE_MM: f32 = 8.0;

/// Baseline of the first metadata row in the full header (mm from top)
pub const HEADER_ROW_1_MM: f32 = 15.0;

/// Baseline of the second metadata row in the full header (mm from top)
pub const HEADER_ROW_2_MM: f32 = 21.0;

/// Baseline of the centered title in the full header (mm from top)
pub const HEADER_TITLE_MM: f32 = 31.0;

/// Baseline of the centered title in the minimal header (mm from top)
pub const MINIMAL_TITLE_MM: f32 = 18.0;

/// Horizontal gap between the company and created-by header fields (mm)
pub const HEADER_FIELD_GAP_MM: f32 = 10.0;

// =============================================================================
// Card Geometry
// =============================================================================

/// Height of the white location/index band at the top of every card (mm);
/// the image region starts directly below it
pub const CARD_HEADER_BAND_MM: f32 = 8.0;

/// Location text inset from the card's left edge (mm)
pub const CARD_TEXT_INSET_MM: f32 = 2.0;

/// Location/index baseline inside the card header band (mm from card top)
pub const CARD_HEADER_BASELINE_MM: f32 = 5.5;

/// Timestamp inset from the image region's left and bottom edges (mm)
pub const TIMESTAMP_INSET_MM: f32 = 2.0;

/// Offset of each white halo pass drawn under the timestamp (mm)
pub const TIMESTAMP_HALO_MM: f32 = 0.05;

// =============================================================================
// Observation Band
// =============================================================================

/// The band starts this far in from the card's left edge (mm)
pub const OBS_BAND_INSET_MM: f32 = 1.0;

/// The band is this much narrower than the card (mm); the trim is not
/// symmetric, the band ends 3mm short of the card's right edge
pub const OBS_BAND_WIDTH_TRIM_MM: f32 = 4.0;

/// Title and text lines start this far in from the band's left edge (mm)
pub const OBS_TEXT_INSET_MM: f32 = 0.5;

/// Title baseline below the band top (mm)
pub const OBS_TITLE_BASELINE_MM: f32 = 2.0;

/// First wrapped text line baseline below the band top (mm)
pub const OBS_TEXT_TOP_MM: f32 = 6.0;

/// Wrapped observation line height (mm)
pub const OBS_LINE_HEIGHT_MM: f32 = 2.5;

// =============================================================================
// Text Metrics
// =============================================================================

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

// =============================================================================
// Image Normalization
// =============================================================================

/// Photos wider than this are downscaled before embedding (px)
pub const TARGET_IMAGE_WIDTH_PX: u32 = 700;

/// JPEG re-encode quality for embedded photos
pub const JPEG_QUALITY: u8 = 75;

// =============================================================================
// Fixed Strings
// =============================================================================

/// Footer attribution, left side of every page
pub const ATTRIBUTION: &str = "Developer: PDF Report Maker";

/// Document title fallback, also the fixed minimal-header title
pub const DEFAULT_TITLE: &str = "Inspection Report";

/// Card header fallback when the entry has no location text
pub const NO_LOCATION: &str = "No Location";

/// Observation band fallback when the entry has no observation text
pub const NO_OBSERVATIONS: &str = "No observations";

/// Placeholder label when the entry has no photo
pub const NO_IMAGE: &str = "No Image";

/// Placeholder label when the photo failed to load or decode
pub const IMAGE_ERROR: &str = "Image Error";

/// Title line of the observation band
pub const OBSERVATIONS_TITLE: &str = "Observations:";

// =============================================================================
// Style Table
// =============================================================================

/// Shared paint values: RGB components in `0.0..=1.0` and font sizes in
/// points. One instance, [`STYLE`], is threaded through the renderer.
#[derive(Debug, Clone, Copy)]
pub struct StyleConstants {
    pub black: [f32; 3],
    pub white: [f32; 3],
    /// Card borders and header-band outlines
    pub gray: [f32; 3],
    /// Placeholder fill behind "No Image" / "Image Error"
    pub light_gray: [f32; 3],
    /// Footer text and placeholder labels
    pub dark_gray: [f32; 3],
    /// Observation band background
    pub observation_fill: [f32; 3],
    pub header_meta_size_pt: f32,
    pub header_title_size_pt: f32,
    pub minimal_title_size_pt: f32,
    pub footer_size_pt: f32,
    pub location_size_pt: f32,
    pub index_size_pt: f32,
    pub obs_title_size_pt: f32,
    pub obs_text_size_pt: f32,
    pub timestamp_size_pt: f32,
    pub placeholder_size_pt: f32,
    /// Card and band border width (mm)
    pub border_width_mm: f32,
}

/// Build a unit-range color from 8-bit channels
const fn rgb8(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

pub const STYLE: StyleConstants = StyleConstants {
    black: rgb8(0, 0, 0),
    white: rgb8(255, 255, 255),
    gray: rgb8(204, 204, 204),
    light_gray: rgb8(224, 224, 224),
    dark_gray: rgb8(136, 136, 136),
    observation_fill: rgb8(249, 249, 249),
    header_meta_size_pt: 9.0,
    header_title_size_pt: 12.0,
    minimal_title_size_pt: 16.0,
    footer_size_pt: 8.0,
    location_size_pt: 8.0,
    index_size_pt: 8.0,
    obs_title_size_pt: 8.0,
    obs_text_size_pt: 7.0,
    timestamp_size_pt: 6.0,
    placeholder_size_pt: 8.0,
    border_width_mm: 0.2,
};
