//! Piece outlines: four clockwise edge traversals closed into one path.
//!
//! Coordinates are local to the piece: the square occupies `[0, size]²`, and tabs
//! reach at most `tab_size` past it.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    path::{Bounds, Cmd, Path},
    puzzle::edge::{EdgeCode, PieceEdges, Side},
    r2::R2,
};

/// Extra room around a piece's tab reach when sizing its render box.
pub const VIEWPORT_MARGIN: f64 = 5.;

/// One side of an outline, from its first corner to its second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTrace {
    pub side: Side,
    pub code: EdgeCode,
    pub start: R2<f64>,
    /// `LineTo` / `QuadTo` commands only
    pub cmds: Vec<Cmd>,
}

impl EdgeTrace {
    pub fn end(&self) -> R2<f64> {
        self.cmds.iter().rev().find_map(Cmd::end).unwrap_or(self.start)
    }

    /// Start point followed by every command point (controls included), in drawing order.
    pub fn points(&self) -> Vec<R2<f64>> {
        std::iter::once(self.start)
            .chain(self.cmds.iter().flat_map(Cmd::all_points))
            .collect()
    }
}

/// Trace one side of a `size`-square piece.
///
/// A tabbed side replaces the middle `tab_size` of the side with two quadratic
/// curves meeting at an apex `tab_size` away from the side, outward for
/// [`EdgeCode::TabOut`] and inward for [`EdgeCode::TabIn`].
pub fn trace_edge(side: Side, code: EdgeCode, size: f64, tab_size: f64) -> EdgeTrace {
    let (start, end) = side.corners(size);
    let mut cmds = Vec::with_capacity(4);
    if !code.is_flat() {
        let u = (end - start) / size;
        let n = side.outward_normal();
        let mid = (start + end) / 2.;
        let half = u * (tab_size / 2.);
        let depth = code.sign() * tab_size;
        let p1 = mid - half;
        let p2 = mid + half;
        cmds.push(Cmd::LineTo { to: p1 });
        cmds.push(Cmd::QuadTo { ctrl: p1 + n * (depth / 2.), to: mid + n * depth });
        cmds.push(Cmd::QuadTo { ctrl: p2 + n * (depth / 2.), to: p2 });
    }
    cmds.push(Cmd::LineTo { to: end });
    EdgeTrace { side, code, start, cmds }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub size: f64,
    pub tab_size: f64,
    /// Top, right, bottom, left
    pub edges: [EdgeTrace; 4],
}

impl Outline {
    pub fn edge(&self, side: Side) -> &EdgeTrace {
        &self.edges[side as usize]
    }

    /// The closed outline as a single path starting at the top-left corner.
    pub fn path(&self) -> Path {
        let mut path = Path::new();
        path.move_to(self.edges[0].start);
        path.cmds.extend(self.edges.iter().flat_map(|e| e.cmds.iter().copied()));
        path.close();
        path
    }

    pub fn to_svg(&self) -> String {
        self.path().to_svg()
    }

    /// Render box covering the largest possible tab reach, plus [`VIEWPORT_MARGIN`].
    pub fn viewport(&self) -> Bounds {
        let pad = self.tab_size + VIEWPORT_MARGIN;
        Bounds {
            min: R2 { x: -pad, y: -pad },
            max: R2 { x: self.size + pad, y: self.size + pad },
        }
    }
}

/// Build a piece outline from its four edge codes.
pub fn synthesize_outline(edges: PieceEdges, size: f64, tab_size: f64) -> Outline {
    let edges = Side::ALL.map(|side| trace_edge(side, edges.get(side), size, tab_size));
    Outline { size, tab_size, edges }
}

/// Maps a piece's local outline space onto the shared source image.
///
/// The image is `source_size` on a side and drawn in board coordinates; shifting it
/// by `-correct` puts the piece's own slice under its outline wherever the piece
/// is currently drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct ImageWindow {
    pub offset: R2<f64>,
    pub source_size: f64,
}

impl ImageWindow {
    pub fn new(correct: R2<f64>, source_size: f64) -> Self {
        ImageWindow { offset: -correct, source_size }
    }

    /// Source-image point shown at `local` in the piece's outline space.
    pub fn source_point(&self, local: R2<f64>) -> R2<f64> {
        local - self.offset
    }

    pub fn svg_transform(&self) -> String {
        format!(
            "translate({}, {})",
            crate::path::fmt_coord(self.offset.x),
            crate::path::fmt_coord(self.offset.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::puzzle::edge::EdgeCode::*;

    const S: f64 = 100.;
    const T: f64 = 25.;

    #[test]
    fn flat_piece_is_square() {
        let outline = synthesize_outline(PieceEdges::FLAT, S, T);
        assert_eq!(outline.to_svg(), "M 0 0 L 100 0 L 100 100 L 0 100 L 0 0 Z");
        for edge in &outline.edges {
            assert_eq!(edge.cmds.len(), 1);
        }
    }

    #[test]
    fn tabbed_top_svg() {
        let outline = synthesize_outline(PieceEdges::new(TabOut, Flat, Flat, Flat), S, T);
        assert_eq!(
            outline.to_svg(),
            "M 0 0 L 37.5 0 Q 37.5 -12.5 50 -25 Q 62.5 -12.5 62.5 0 L 100 0 L 100 100 L 0 100 L 0 0 Z"
        );
    }

    #[test]
    fn edges_meet_at_corners() {
        for code in [Flat, TabOut, TabIn] {
            let outline = synthesize_outline(PieceEdges::new(code, -code, code, -code), S, T);
            for (idx, side) in Side::ALL.into_iter().enumerate() {
                let edge = outline.edge(side);
                let (start, end) = side.corners(S);
                assert_eq!(edge.start, start);
                assert_eq!(edge.end(), end);
                let next = &outline.edges[(idx + 1) % 4];
                assert_eq!(edge.end(), next.start);
            }
        }
    }

    #[test]
    fn tab_is_symmetric_and_signed() {
        for side in Side::ALL {
            for code in [TabOut, TabIn] {
                let edge = trace_edge(side, code, S, T);
                let (start, end) = side.corners(S);
                let mid = (start + end) / 2.;
                let u = (end - start) / S;
                let n = side.outward_normal();
                let points = edge.points();
                // Reflecting across the normal through the midpoint reverses the point sequence
                let reflected: Vec<_> = points
                    .iter()
                    .rev()
                    .map(|p| *p - u * (2. * (*p - mid).dot(&u)))
                    .collect();
                for (a, b) in points.iter().zip(reflected.iter()) {
                    assert_relative_eq!(*a, *b, epsilon = 1e-9);
                }
                // Apex sits `T` along the outward normal, signed by the code
                let apex = edge.cmds[1].end().unwrap();
                assert_relative_eq!((apex - mid).dot(&n), code.sign() * T, epsilon = 1e-9);
                assert_relative_eq!((apex - mid).dot(&u), 0., epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn neighbors_interlock() {
        for code in [TabOut, TabIn] {
            // Horizontal neighbors: A at (0, 0), B at (S, 0)
            let a = synthesize_outline(PieceEdges::new(Flat, code, Flat, Flat), S, T);
            let b = synthesize_outline(PieceEdges::new(Flat, Flat, Flat, -code), S, T);
            let a_pts: Vec<_> = a.edge(Side::Right).points();
            let mut b_pts: Vec<_> = b
                .edge(Side::Left)
                .points()
                .into_iter()
                .map(|p| p + R2::new(S, 0.))
                .collect();
            b_pts.reverse();
            assert_eq!(a_pts.len(), b_pts.len());
            for (pa, pb) in a_pts.iter().zip(b_pts.iter()) {
                assert_relative_eq!(*pa, *pb, epsilon = 1e-9);
            }

            // Vertical neighbors: A at (0, 0), B at (0, S)
            let a = synthesize_outline(PieceEdges::new(Flat, Flat, code, Flat), S, T);
            let b = synthesize_outline(PieceEdges::new(-code, Flat, Flat, Flat), S, T);
            let a_pts = a.edge(Side::Bottom).points();
            let mut b_pts: Vec<_> = b
                .edge(Side::Top)
                .points()
                .into_iter()
                .map(|p| p + R2::new(0., S))
                .collect();
            b_pts.reverse();
            for (pa, pb) in a_pts.iter().zip(b_pts.iter()) {
                assert_relative_eq!(*pa, *pb, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn viewport_covers_tabs() {
        let outline = synthesize_outline(PieceEdges::new(TabOut, TabOut, TabOut, TabOut), S, T);
        let bounds = outline.path().bounds().unwrap();
        let viewport = outline.viewport();
        assert_relative_eq!(bounds.min, R2::new(-T, -T));
        assert_relative_eq!(bounds.max, R2::new(S + T, S + T));
        assert_relative_eq!(viewport.min, R2::new(-30., -30.));
        assert_relative_eq!(viewport.width(), 160.);
    }

    #[test]
    fn image_window() {
        let window = ImageWindow::new(R2::new(200., 100.), 300.);
        assert_eq!(window.source_point(R2::new(0., 0.)), R2::new(200., 100.));
        assert_eq!(window.source_point(R2::new(50., 50.)), R2::new(250., 150.));
        assert_eq!(window.svg_transform(), "translate(-200, -100)");
    }
}
