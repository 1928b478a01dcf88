//! Text op emission for the builtin Helvetica faces
//!
//! Positions are baselines in millimeters from the top-left page corner,
//! the coordinate system the layout engine speaks. Width measurement is the
//! same approximation the layout engine wraps with, so right-aligned and
//! centered text can never overshoot what layout reserved for it.

use printpdf::{BuiltinFont, Op, Point, Pt, TextItem};

use crate::constants::{HELVETICA_CHAR_WIDTH_RATIO, mm_to_pt, pt_to_mm};
use crate::render::shapes::rgb;

/// Emit one line of text with its baseline at `(x_mm, baseline_mm)`.
pub(crate) fn draw_text(
    ops: &mut Vec<Op>,
    text: &str,
    font: BuiltinFont,
    size_pt: f32,
    x_mm: f32,
    baseline_mm: f32,
    color: [f32; 3],
    page_height_mm: f32,
) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(mm_to_pt(x_mm)),
            y: Pt(mm_to_pt(page_height_mm - baseline_mm)),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size_pt),
        font,
    });
    ops.push(Op::SetFillColor { col: rgb(color) });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(sanitize_text(text))],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Approximate rendered width (mm) of `text` at `size_pt`.
pub(crate) fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * pt_to_mm(size_pt * HELVETICA_CHAR_WIDTH_RATIO)
}

/// Fold text onto what the builtin-font encoding can show: typographic
/// punctuation degrades to its ASCII cousin, anything still outside the
/// Latin-1 range becomes `?`.
pub(crate) fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' => out.push('*'),
            '\u{00A0}' => out.push(' '),
            c if (c as u32) < 256 => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
