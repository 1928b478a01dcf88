//! Layout primitives
//!
//! Everything here is in millimeters with the origin at the top-left of the
//! page, matching how the templates are specified. The renderer converts to
//! PDF points (bottom-left origin) at the last moment.

/// Position of a cell within the template grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

/// A rectangle in millimeters, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate (larger y is lower on the page)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// A fully shaped cell: every rectangle and line of text the renderer needs,
/// with truncation, wrapping and fallbacks already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    /// Continuous 1-based entry number across the whole document
    pub global_index: usize,
    pub card: Rect,
    /// White location/index band at the top of the card
    pub header_band: Rect,
    /// Photo or placeholder area, directly below the header band
    pub image_region: Rect,
    /// `None` when the template hides observations
    pub observations_band: Option<Rect>,
    /// Location text with the "No Location" fallback applied
    pub location_text: String,
    /// `[N]` label, right-aligned in the header band
    pub index_label: String,
    /// Truncated, wrapped and height-clipped observation lines
    pub observation_lines: Vec<String>,
    /// Capture timestamp, present only when the entry has a photo
    pub timestamp: Option<String>,
    /// Placeholder label when there is no drawable photo
    pub placeholder: Option<&'static str>,
}
