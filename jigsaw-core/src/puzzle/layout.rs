//! Piece layout: correct slots, edge codes, scattered starting positions.

use itertools::iproduct;
use log::debug;
use rand::Rng;

use crate::{
    config::PuzzleConfig,
    puzzle::{edge::EdgeTable, piece::Piece, shape::{synthesize_outline, ImageWindow}},
    r2::R2,
};

/// Uniform sample from `[-radius, radius]`; zero radius yields zero.
fn symmetric<R: Rng>(rng: &mut R, radius: f64) -> f64 {
    if radius > 0. {
        rng.gen_range(-radius..=radius)
    } else {
        0.
    }
}

/// Generate every piece of a `grid_size × grid_size` puzzle, row-major.
///
/// Each interior edge is drawn once in an [`EdgeTable`]; pieces read their sides
/// from it, so neighbors always complement. Starting positions are scattered
/// independently per axis within `scatter_radius` of the correct slot, and each
/// piece gets a tilt within `±max_rotation` degrees.
pub fn generate_layout<R: Rng>(config: &PuzzleConfig, rng: &mut R) -> Vec<Piece> {
    let n = config.grid_size;
    let size = config.piece_size;
    let tab_size = config.tab_size();
    let board_size = config.board_size();
    let table = EdgeTable::generate(n, rng);

    let pieces: Vec<Piece> = iproduct!(0..n, 0..n)
        .map(|(row, col)| {
            let edges = table.edges_for(row, col);
            let correct = R2 { x: col as f64 * size, y: row as f64 * size };
            let scatter = R2 {
                x: symmetric(rng, config.scatter_radius),
                y: symmetric(rng, config.scatter_radius),
            };
            let rotation = symmetric(rng, config.max_rotation);
            Piece {
                id: row * n + col,
                row,
                col,
                edges,
                correct,
                position: correct + scatter,
                locked: false,
                rotation,
                outline: synthesize_outline(edges, size, tab_size),
                image: ImageWindow::new(correct, board_size),
            }
        })
        .collect();
    debug!(
        "Generated {} pieces (piece size {}, scatter radius {})",
        pieces.len(),
        size,
        config.scatter_radius
    );
    pieces
}
