//! Template registry
//!
//! Declarative descriptions of the six supported grid layouts. Each
//! [`TemplateSpec`] is a pure constant table entry; the layout engine derives
//! every card position from it, so adding a grid means adding a row here and
//! nothing else.
//!
//! Card width derivation, shared by all templates:
//!
//! ```text
//! printable_width = page_width - 2 * PAGE_MARGIN_MM
//! card_width      = (printable_width - width_reserve_mm) / columns * width_scale
//! ```
//!
//! The reserve and scale factors are tuned per grid; they are deliberately
//! not derived from the gap sizes, and the leftover space is what centers
//! the grid on the page.

use crate::constants::{A4_HEIGHT_MM, A4_WIDTH_MM, CARD_HEADER_BAND_MM, PAGE_MARGIN_MM};
use crate::types::Orientation;

/// Identifier for one of the supported grid templates.
///
/// The string forms are the ids used in job files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// 2 x 2 portrait grid, landscape photos
    A4Portrait2x2,
    /// 2 x 3 portrait grid, portrait photos
    A4Portrait2x3,
    /// 3 x 2 landscape grid, portrait photos
    A4Landscape3x2,
    /// 4 x 2 landscape grid, portrait photos
    A4Landscape4x2,
    /// 5 x 2 landscape grid, landscape photos
    A4Landscape5x2,
    /// 4 x 6 portrait contact sheet, observations hidden
    A4Portrait4x6,
}

/// Template used when a requested id is unknown.
pub const DEFAULT_TEMPLATE: TemplateId = TemplateId::A4Portrait2x2;

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::A4Portrait2x2,
        TemplateId::A4Portrait2x3,
        TemplateId::A4Landscape3x2,
        TemplateId::A4Landscape4x2,
        TemplateId::A4Landscape5x2,
        TemplateId::A4Portrait4x6,
    ];

    /// Parse a template id string.
    ///
    /// `A4Landscape5x3` is accepted as an alias for `A4Landscape5x2`: the
    /// 5 x 2 grid shipped under that name for a while and saved job files
    /// still carry it.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "A4Portrait2x2" => Some(TemplateId::A4Portrait2x2),
            "A4Portrait2x3" => Some(TemplateId::A4Portrait2x3),
            "A4Landscape3x2" => Some(TemplateId::A4Landscape3x2),
            "A4Landscape4x2" => Some(TemplateId::A4Landscape4x2),
            "A4Landscape5x2" | "A4Landscape5x3" => Some(TemplateId::A4Landscape5x2),
            "A4Portrait4x6" => Some(TemplateId::A4Portrait4x6),
            _ => None,
        }
    }

    /// Canonical id string.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::A4Portrait2x2 => "A4Portrait2x2",
            TemplateId::A4Portrait2x3 => "A4Portrait2x3",
            TemplateId::A4Landscape3x2 => "A4Landscape3x2",
            TemplateId::A4Landscape4x2 => "A4Landscape4x2",
            TemplateId::A4Landscape5x2 => "A4Landscape5x2",
            TemplateId::A4Portrait4x6 => "A4Portrait4x6",
        }
    }

    /// The registry entry for this template.
    pub fn spec(self) -> &'static TemplateSpec {
        &TEMPLATES[self as usize]
    }
}

/// Resolve a template id string, falling back to [`DEFAULT_TEMPLATE`].
///
/// Unknown ids degrade rather than fail: a report with a stale template id
/// still generates, it just uses the default grid.
pub fn resolve_template(id: &str) -> TemplateId {
    match TemplateId::parse(id) {
        Some(template) => template,
        None => {
            log::warn!(
                "unknown template id {:?}, falling back to {}",
                id,
                DEFAULT_TEMPLATE.as_str()
            );
            DEFAULT_TEMPLATE
        }
    }
}

/// Geometry constants for one grid template. All lengths in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateSpec {
    pub id: TemplateId,
    pub columns: usize,
    pub rows: usize,
    pub orientation: Orientation,
    /// Image region height as a fraction of its width
    pub image_aspect: f32,
    /// Subtracted from the printable width before dividing by columns
    pub width_reserve_mm: f32,
    /// Final card width multiplier
    pub width_scale: f32,
    /// Horizontal gap between cards
    pub cell_gap_x_mm: f32,
    /// Vertical gap between card rows
    pub cell_gap_y_mm: f32,
    /// Card height minus image height: header band plus observation band
    pub vertical_overhead_mm: f32,
    /// Gap between the full header block and the first card row
    pub content_top_full_mm: f32,
    /// Gap between the minimal header block and the first card row
    pub content_top_minimal_mm: f32,
    /// Left/right margin for page header and footer text
    pub header_footer_margin_mm: f32,
    /// Gap between the image region and the observation band
    pub obs_gap_mm: f32,
    /// Space kept below the observation band inside the card
    pub obs_bottom_inset_mm: f32,
    /// Observation text is truncated to this many characters (plus `...`)
    pub observation_budget: usize,
    /// The contact-sheet template hides observations entirely
    pub show_observations: bool,
}

impl TemplateSpec {
    /// Cell capacity of one page.
    pub fn entries_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Page dimensions with orientation applied (mm).
    pub fn page_size_mm(&self) -> (f32, f32) {
        match self.orientation {
            Orientation::Portrait => (A4_WIDTH_MM, A4_HEIGHT_MM),
            Orientation::Landscape => (A4_HEIGHT_MM, A4_WIDTH_MM),
        }
    }

    /// Width available to the card grid (mm).
    pub fn printable_width_mm(&self) -> f32 {
        self.page_size_mm().0 - 2.0 * PAGE_MARGIN_MM
    }

    /// Height of the observation band (mm); zero when hidden.
    pub fn observation_band_height_mm(&self) -> f32 {
        if !self.show_observations {
            return 0.0;
        }
        self.vertical_overhead_mm - CARD_HEADER_BAND_MM - self.obs_gap_mm - self.obs_bottom_inset_mm
    }

    /// Human-readable grid shape, e.g. `"2x3"`.
    pub fn grid_label(&self) -> String {
        format!("{}x{}", self.columns, self.rows)
    }
}

static TEMPLATES: [TemplateSpec; 6] = [
    // 2 x 2: four wide landscape photos per portrait page
    TemplateSpec {
        id: TemplateId::A4Portrait2x2,
        columns: 2,
        rows: 2,
        orientation: Orientation::Portrait,
        image_aspect: 1.33,
        width_reserve_mm: 20.0,
        width_scale: 0.83,
        cell_gap_x_mm: 20.0,
        cell_gap_y_mm: 5.0,
        vertical_overhead_mm: 25.0,
        content_top_full_mm: 30.0,
        content_top_minimal_mm: 20.0,
        header_footer_margin_mm: 23.0,
        obs_gap_mm: 1.0,
        obs_bottom_inset_mm: 1.0,
        observation_budget: 300,
        show_observations: true,
    },
    // 2 x 3: six portrait photos per portrait page
    TemplateSpec {
        id: TemplateId::A4Portrait2x3,
        columns: 2,
        rows: 3,
        orientation: Orientation::Portrait,
        image_aspect: 0.75,
        width_reserve_mm: 10.0,
        width_scale: 0.82,
        cell_gap_x_mm: 13.0,
        cell_gap_y_mm: 5.0,
        vertical_overhead_mm: 25.0,
        content_top_full_mm: 30.0,
        content_top_minimal_mm: 20.0,
        header_footer_margin_mm: 23.0,
        obs_gap_mm: 2.0,
        obs_bottom_inset_mm: 1.0,
        observation_budget: 200,
        show_observations: true,
    },
    // 3 x 2: six portrait photos per landscape page
    TemplateSpec {
        id: TemplateId::A4Landscape3x2,
        columns: 3,
        rows: 2,
        orientation: Orientation::Landscape,
        image_aspect: 0.75,
        width_reserve_mm: 20.0,
        width_scale: 0.85,
        cell_gap_x_mm: 15.0,
        cell_gap_y_mm: 5.0,
        vertical_overhead_mm: 25.0,
        content_top_full_mm: 15.0,
        content_top_minimal_mm: 12.0,
        header_footer_margin_mm: 23.0,
        obs_gap_mm: 2.0,
        obs_bottom_inset_mm: 0.0,
        observation_budget: 200,
        show_observations: true,
    },
    // 4 x 2: eight portrait photos per landscape page, taller observation band
    TemplateSpec {
        id: TemplateId::A4Landscape4x2,
        columns: 4,
        rows: 2,
        orientation: Orientation::Landscape,
        image_aspect: 0.75,
        width_reserve_mm: 21.0,
        width_scale: 0.97,
        cell_gap_x_mm: 7.0,
        cell_gap_y_mm: 5.0,
        vertical_overhead_mm: 30.0,
        content_top_full_mm: 15.0,
        content_top_minimal_mm: 12.0,
        header_footer_margin_mm: 19.0,
        obs_gap_mm: 2.0,
        obs_bottom_inset_mm: 0.0,
        observation_budget: 150,
        show_observations: true,
    },
    // 5 x 2: ten landscape photos per landscape page, tight gaps
    TemplateSpec {
        id: TemplateId::A4Landscape5x2,
        columns: 5,
        rows: 2,
        orientation: Orientation::Landscape,
        image_aspect: 1.33,
        width_reserve_mm: 32.0,
        width_scale: 0.9,
        cell_gap_x_mm: 8.0,
        cell_gap_y_mm: 2.0,
        vertical_overhead_mm: 24.0,
        content_top_full_mm: 10.0,
        content_top_minimal_mm: 10.0,
        header_footer_margin_mm: 23.0,
        obs_gap_mm: 2.0,
        obs_bottom_inset_mm: 0.0,
        observation_budget: 100,
        show_observations: true,
    },
    // 4 x 6: twenty-four photo contact sheet, no observations
    TemplateSpec {
        id: TemplateId::A4Portrait4x6,
        columns: 4,
        rows: 6,
        orientation: Orientation::Portrait,
        image_aspect: 0.72,
        width_reserve_mm: 12.0,
        width_scale: 1.0,
        cell_gap_x_mm: 2.0,
        cell_gap_y_mm: 2.0,
        vertical_overhead_mm: 9.0,
        content_top_full_mm: 8.0,
        content_top_minimal_mm: 6.0,
        header_footer_margin_mm: 10.0,
        obs_gap_mm: 0.0,
        obs_bottom_inset_mm: 0.0,
        observation_budget: 0,
        show_observations: false,
    },
];
