//! Edge codes and the shared per-edge table that keeps neighbors interlocking.

use std::ops::Neg;

use itertools::iproduct;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::ShapeError, r2::R2};

/// Shape of one side of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum EdgeCode {
    Flat,
    TabOut,
    TabIn,
}

impl EdgeCode {
    pub fn sign(self) -> f64 {
        match self {
            EdgeCode::Flat => 0.,
            EdgeCode::TabOut => 1.,
            EdgeCode::TabIn => -1.,
        }
    }

    pub fn is_flat(self) -> bool {
        self == EdgeCode::Flat
    }

    /// Fair coin between [`EdgeCode::TabOut`] and [`EdgeCode::TabIn`].
    pub fn random_tab<R: Rng>(rng: &mut R) -> EdgeCode {
        if rng.gen_bool(0.5) {
            EdgeCode::TabOut
        } else {
            EdgeCode::TabIn
        }
    }
}

impl Neg for EdgeCode {
    type Output = EdgeCode;
    fn neg(self) -> EdgeCode {
        match self {
            EdgeCode::Flat => EdgeCode::Flat,
            EdgeCode::TabOut => EdgeCode::TabIn,
            EdgeCode::TabIn => EdgeCode::TabOut,
        }
    }
}

impl From<EdgeCode> for i8 {
    fn from(code: EdgeCode) -> i8 {
        match code {
            EdgeCode::Flat => 0,
            EdgeCode::TabOut => 1,
            EdgeCode::TabIn => -1,
        }
    }
}

impl TryFrom<i8> for EdgeCode {
    type Error = ShapeError;
    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EdgeCode::Flat),
            1 => Ok(EdgeCode::TabOut),
            -1 => Ok(EdgeCode::TabIn),
            _ => Err(ShapeError::EdgeCode(code)),
        }
    }
}

/// Piece sides, in clockwise drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Unit normal pointing away from the piece (screen coordinates, y down).
    pub fn outward_normal(self) -> R2<f64> {
        match self {
            Side::Top => R2 { x: 0., y: -1. },
            Side::Right => R2 { x: 1., y: 0. },
            Side::Bottom => R2 { x: 0., y: 1. },
            Side::Left => R2 { x: -1., y: 0. },
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Corners `(start, end)` of this side on a square of side `size`, traversed clockwise.
    pub fn corners(self, size: f64) -> (R2<f64>, R2<f64>) {
        let tl = R2 { x: 0., y: 0. };
        let tr = R2 { x: size, y: 0. };
        let br = R2 { x: size, y: size };
        let bl = R2 { x: 0., y: size };
        match self {
            Side::Top => (tl, tr),
            Side::Right => (tr, br),
            Side::Bottom => (br, bl),
            Side::Left => (bl, tl),
        }
    }
}

/// The four edge codes of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct PieceEdges {
    #[tsify(type = "-1 | 0 | 1")]
    pub top: EdgeCode,
    #[tsify(type = "-1 | 0 | 1")]
    pub right: EdgeCode,
    #[tsify(type = "-1 | 0 | 1")]
    pub bottom: EdgeCode,
    #[tsify(type = "-1 | 0 | 1")]
    pub left: EdgeCode,
}

impl PieceEdges {
    pub const FLAT: PieceEdges = PieceEdges {
        top: EdgeCode::Flat,
        right: EdgeCode::Flat,
        bottom: EdgeCode::Flat,
        left: EdgeCode::Flat,
    };

    pub fn new(top: EdgeCode, right: EdgeCode, bottom: EdgeCode, left: EdgeCode) -> Self {
        PieceEdges { top, right, bottom, left }
    }

    pub fn get(&self, side: Side) -> EdgeCode {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }
}

/// One random draw per interior edge of an `N×N` grid.
///
/// `horizontal[r][c]` is the edge between `(r, c)` and `(r + 1, c)`, stored as the
/// upper piece's bottom side sees it. `vertical[r][c]` is the edge between `(r, c)`
/// and `(r, c + 1)`, stored as the left piece's right side sees it. The other piece
/// reads the same entry negated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTable {
    pub grid_size: usize,
    pub horizontal: Vec<Vec<EdgeCode>>,
    pub vertical: Vec<Vec<EdgeCode>>,
}

impl EdgeTable {
    pub fn generate<R: Rng>(grid_size: usize, rng: &mut R) -> Self {
        let inner = grid_size.saturating_sub(1);
        let horizontal = (0..inner)
            .map(|_| (0..grid_size).map(|_| EdgeCode::random_tab(rng)).collect())
            .collect();
        let vertical = (0..grid_size)
            .map(|_| (0..inner).map(|_| EdgeCode::random_tab(rng)).collect())
            .collect();
        debug!("Generated edge table for {}x{} grid", grid_size, grid_size);
        EdgeTable { grid_size, horizontal, vertical }
    }

    /// Edge codes for the piece at `(row, col)`; border sides are flat.
    pub fn edges_for(&self, row: usize, col: usize) -> PieceEdges {
        let n = self.grid_size;
        let top = if row == 0 {
            EdgeCode::Flat
        } else {
            -self.horizontal[row - 1][col]
        };
        let bottom = if row + 1 == n {
            EdgeCode::Flat
        } else {
            self.horizontal[row][col]
        };
        let left = if col == 0 {
            EdgeCode::Flat
        } else {
            -self.vertical[row][col - 1]
        };
        let right = if col + 1 == n {
            EdgeCode::Flat
        } else {
            self.vertical[row][col]
        };
        PieceEdges { top, right, bottom, left }
    }

    /// Edge codes for every piece, row-major.
    pub fn all_edges(&self) -> Vec<PieceEdges> {
        iproduct!(0..self.grid_size, 0..self.grid_size)
            .map(|(row, col)| self.edges_for(row, col))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use test_log::test;

    #[test]
    fn neg_complements() {
        assert_eq!(-EdgeCode::TabOut, EdgeCode::TabIn);
        assert_eq!(-EdgeCode::TabIn, EdgeCode::TabOut);
        assert_eq!(-EdgeCode::Flat, EdgeCode::Flat);
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.outward_normal(), -side.opposite().outward_normal());
        }
    }

    #[test]
    fn i8_codes() {
        assert_eq!(i8::from(EdgeCode::TabIn), -1);
        assert_eq!(EdgeCode::try_from(1), Ok(EdgeCode::TabOut));
        assert_eq!(EdgeCode::try_from(2), Err(ShapeError::EdgeCode(2)));
    }

    #[test]
    fn neighbors_complement() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let n = 4;
            let table = EdgeTable::generate(n, &mut rng);
            for (row, col) in iproduct!(0..n, 0..n) {
                let edges = table.edges_for(row, col);
                if row == 0 { assert_eq!(edges.top, EdgeCode::Flat); }
                if row == n - 1 { assert_eq!(edges.bottom, EdgeCode::Flat); }
                if col == 0 { assert_eq!(edges.left, EdgeCode::Flat); }
                if col == n - 1 { assert_eq!(edges.right, EdgeCode::Flat); }
                if col + 1 < n {
                    let right = table.edges_for(row, col + 1);
                    assert!(!edges.right.is_flat());
                    assert_eq!(edges.right, -right.left);
                }
                if row + 1 < n {
                    let below = table.edges_for(row + 1, col);
                    assert!(!edges.bottom.is_flat());
                    assert_eq!(edges.bottom, -below.top);
                }
            }
        }
    }

    #[test]
    fn single_piece_is_flat() {
        let mut rng = StdRng::seed_from_u64(0);
        let table = EdgeTable::generate(1, &mut rng);
        assert_eq!(table.all_edges(), vec![PieceEdges::FLAT]);
    }
}
