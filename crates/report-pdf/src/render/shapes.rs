//! Rectangle and line primitives
//!
//! Layout rectangles arrive in millimeters with a top-left origin; PDF
//! content streams want points with a bottom-left origin. The flip happens
//! here and nowhere else in the renderer.

use printpdf::{
    Color, Line, LinePoint, Op, PaintMode, Point, Polygon, PolygonRing, Pt, Rgb, WindingOrder,
};

use crate::constants::mm_to_pt;
use crate::layout::Rect;

/// Solid RGB color from a style-table triple.
pub(crate) fn rgb(color: [f32; 3]) -> Color {
    Color::Rgb(Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
        icc_profile: None,
    })
}

fn rect_points(rect: &Rect, page_height_mm: f32) -> Vec<LinePoint> {
    let x1 = mm_to_pt(rect.x);
    let x2 = mm_to_pt(rect.right());
    let y1 = mm_to_pt(page_height_mm - rect.bottom());
    let y2 = mm_to_pt(page_height_mm - rect.y);
    [(x1, y1), (x2, y1), (x2, y2), (x1, y2)]
        .into_iter()
        .map(|(x, y)| LinePoint {
            p: Point { x: Pt(x), y: Pt(y) },
            bezier: false,
        })
        .collect()
}

/// Fill a rectangle with a solid color.
pub(crate) fn fill_rect(ops: &mut Vec<Op>, rect: &Rect, color: [f32; 3], page_height_mm: f32) {
    ops.push(Op::SetFillColor { col: rgb(color) });
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: rect_points(rect, page_height_mm),
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

/// Stroke a rectangle outline.
pub(crate) fn stroke_rect(
    ops: &mut Vec<Op>,
    rect: &Rect,
    color: [f32; 3],
    width_mm: f32,
    page_height_mm: f32,
) {
    ops.push(Op::SetOutlineColor { col: rgb(color) });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(mm_to_pt(width_mm)),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: rect_points(rect, page_height_mm),
            is_closed: true,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_points_flip_vertically() {
        // 10mm tall rect 20mm from the top of a 297mm page
        let rect = Rect::new(15.0, 20.0, 50.0, 10.0);
        let points = rect_points(&rect, 297.0);
        assert_eq!(points.len(), 4);
        // Bottom edge in PDF space is page minus rect bottom
        let y_bottom = points[0].p.y.0;
        let y_top = points[2].p.y.0;
        assert!((y_bottom - mm_to_pt(297.0 - 30.0)).abs() < 1e-3);
        assert!((y_top - mm_to_pt(297.0 - 20.0)).abs() < 1e-3);
        assert!(y_top > y_bottom);
    }

    #[test]
    fn test_fill_rect_emits_two_ops() {
        let mut ops = Vec::new();
        fill_rect(&mut ops, &Rect::new(0.0, 0.0, 10.0, 10.0), [1.0, 1.0, 1.0], 297.0);
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], Op::SetFillColor { .. }));
        assert!(matches!(ops[1], Op::DrawPolygon { .. }));
    }

    #[test]
    fn test_stroke_rect_sets_thickness() {
        let mut ops = Vec::new();
        stroke_rect(&mut ops, &Rect::new(0.0, 0.0, 10.0, 10.0), [0.8, 0.8, 0.8], 0.2, 210.0);
        assert_eq!(ops.len(), 3);
        let Op::SetOutlineThickness { pt } = &ops[1] else {
            panic!("expected thickness op");
        };
        assert!((pt.0 - mm_to_pt(0.2)).abs() < 1e-4);
    }
}
