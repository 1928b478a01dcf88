//! Cell placement and text shaping
//!
//! Turns one page of processed entries into [`PlacedCell`]s: band rectangles
//! from the grid geometry, plus all text decisions (fallback substitution,
//! character-budget truncation, width wrapping, height clipping). The
//! renderer below this layer only draws; it never makes a layout choice.

use crate::constants::{
    CARD_HEADER_BAND_MM, HELVETICA_CHAR_WIDTH_RATIO, IMAGE_ERROR, NO_IMAGE, NO_LOCATION,
    NO_OBSERVATIONS, OBS_BAND_INSET_MM, OBS_BAND_WIDTH_TRIM_MM, OBS_LINE_HEIGHT_MM,
    OBS_TEXT_TOP_MM, STYLE, pt_to_mm,
};
use crate::layout::grid::{card_rect, grid_geometry, grid_position};
use crate::layout::types::{PlacedCell, Rect};
use crate::normalize::{ImageOutcome, ProcessedEntry};
use crate::paginate::Page;
use crate::template::TemplateSpec;

/// Shape every cell on a page.
pub fn layout_page(page: &Page<'_>, spec: &TemplateSpec, include_header: bool) -> Vec<PlacedCell> {
    let geometry = grid_geometry(spec, include_header);
    page.entries
        .iter()
        .enumerate()
        .map(|(cell_index, processed)| {
            let card = card_rect(&geometry, spec, grid_position(spec, cell_index));
            layout_cell(
                processed,
                page.start_index + cell_index + 1,
                card,
                geometry.image_height_mm,
                spec,
            )
        })
        .collect()
}

/// Shape a single cell at a known card rectangle.
pub fn layout_cell(
    processed: &ProcessedEntry,
    global_index: usize,
    card: Rect,
    image_height_mm: f32,
    spec: &TemplateSpec,
) -> PlacedCell {
    let entry = &processed.entry;

    let header_band = Rect::new(card.x, card.y, card.width, CARD_HEADER_BAND_MM);
    let image_region = Rect::new(
        card.x,
        card.y + CARD_HEADER_BAND_MM,
        card.width,
        image_height_mm,
    );

    let location_text = if entry.location.is_empty() {
        NO_LOCATION.to_string()
    } else {
        entry.location.clone()
    };

    let placeholder = match processed.image {
        ImageOutcome::Ready(_) => None,
        ImageOutcome::Missing => Some(NO_IMAGE),
        ImageOutcome::Failed => Some(IMAGE_ERROR),
    };

    // The gate is photo presence, not decode success: a timestamp still
    // overlays the "Image Error" placeholder
    let timestamp = match (&entry.photo, &entry.timestamp) {
        (Some(_), Some(stamp)) if !stamp.is_empty() => Some(stamp.clone()),
        _ => None,
    };

    let (observations_band, observation_lines) = if spec.show_observations {
        let band = Rect::new(
            card.x + OBS_BAND_INSET_MM,
            image_region.bottom() + spec.obs_gap_mm,
            card.width - OBS_BAND_WIDTH_TRIM_MM,
            spec.observation_band_height_mm(),
        );
        let text = truncate_observations(&entry.observations, spec.observation_budget);
        let mut lines = wrap_text(&text, max_line_chars(band.width, STYLE.obs_text_size_pt));
        lines.truncate(max_observation_lines(band.height));
        (Some(band), lines)
    } else {
        (None, Vec::new())
    };

    PlacedCell {
        global_index,
        card,
        header_band,
        image_region,
        observations_band,
        location_text,
        index_label: format!("[{global_index}]"),
        observation_lines,
        timestamp,
        placeholder,
    }
}

/// Apply the template's character budget: text at or under the budget is
/// untouched, longer text keeps exactly `budget` characters plus `...`.
/// Empty text becomes the "No observations" fallback.
pub fn truncate_observations(text: &str, budget: usize) -> String {
    if text.is_empty() {
        return NO_OBSERVATIONS.to_string();
    }
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(budget).collect();
    truncated.push_str("...");
    truncated
}

/// Greedy word wrap at a character budget per line. Words longer than a
/// whole line are hard-broken; explicit newlines start a new line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            push_word(&mut lines, &mut current, word, max_chars);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn push_word(lines: &mut Vec<String>, current: &mut String, word: &str, max_chars: usize) {
    let word_len = word.chars().count();
    if current.is_empty() {
        if word_len <= max_chars {
            current.push_str(word);
            return;
        }
    } else if current.chars().count() + 1 + word_len <= max_chars {
        current.push(' ');
        current.push_str(word);
        return;
    } else {
        lines.push(std::mem::take(current));
        if word_len <= max_chars {
            current.push_str(word);
            return;
        }
    }
    // Hard-break: full lines out of the oversized word, remainder continues
    let chars: Vec<char> = word.chars().collect();
    let mut start = 0;
    while chars.len() - start > max_chars {
        lines.push(chars[start..start + max_chars].iter().collect());
        start += max_chars;
    }
    *current = chars[start..].iter().collect();
}

/// How many characters of the given font size fit in `width_mm`.
fn max_line_chars(width_mm: f32, font_size_pt: f32) -> usize {
    let char_width_mm = pt_to_mm(font_size_pt * HELVETICA_CHAR_WIDTH_RATIO);
    ((width_mm / char_width_mm).floor() as usize).max(1)
}

/// How many wrapped lines fit under the band title.
fn max_observation_lines(band_height_mm: f32) -> usize {
    ((band_height_mm - OBS_TEXT_TOP_MM) / OBS_LINE_HEIGHT_MM).max(0.0) as usize
}
