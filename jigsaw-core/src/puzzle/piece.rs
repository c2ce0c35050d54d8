use serde::{Deserialize, Serialize};

use crate::{
    puzzle::{edge::PieceEdges, shape::{ImageWindow, Outline}},
    r2::R2,
};

/// One puzzle piece.
///
/// Pieces are plain values: the session replaces a record wholesale rather than
/// mutating it through shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// `row * grid_size + col`
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub edges: PieceEdges,
    /// Top-left corner when placed correctly
    pub correct: R2<f64>,
    /// Current top-left corner
    pub position: R2<f64>,
    pub locked: bool,
    /// Tilt in degrees; zero once locked
    pub rotation: f64,
    pub outline: Outline,
    pub image: ImageWindow,
}

impl Piece {
    /// Distance from the current position to the correct one.
    pub fn offset_from_correct(&self) -> f64 {
        self.position.distance(&self.correct)
    }

    pub fn is_draggable(&self) -> bool {
        !self.locked
    }
}
