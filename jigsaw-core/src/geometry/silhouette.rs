//! Decorative heart outline revealed when the puzzle is solved.

use crate::{path::Path, r2::R2};

/// Side of the square canvas the heart is drawn on.
pub const REFERENCE_SIZE: f64 = 300.;

fn p(x: f64, y: f64) -> R2<f64> {
    R2 { x, y }
}

/// Heart outline on the [`REFERENCE_SIZE`] canvas.
pub fn heart() -> Path {
    let mut path = Path::new();
    path.move_to(p(150., 280.))
        .cubic_to(p(60., 190.), p(10., 120.), p(10., 70.))
        .cubic_to(p(10., 20.), p(60., 5.), p(100., 40.))
        .line_to(p(150., 90.))
        .line_to(p(200., 40.))
        .cubic_to(p(240., 5.), p(290., 20.), p(290., 70.))
        .cubic_to(p(290., 120.), p(240., 190.), p(150., 280.))
        .close();
    path
}

/// Heart outline scaled to cover a square board of side `board_size`.
pub fn heart_for_board(board_size: f64) -> Path {
    heart().scale(board_size / REFERENCE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reference_heart_svg() {
        assert_eq!(
            heart().to_svg(),
            "M 150 280 C 60 190 10 120 10 70 C 10 20 60 5 100 40 L 150 90 L 200 40 C 240 5 290 20 290 70 C 290 120 240 190 150 280 Z"
        );
    }

    #[test]
    fn scaled_heart_stays_in_board() {
        let heart = heart_for_board(600.);
        let bounds = heart.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 20.);
        assert_relative_eq!(bounds.max.x, 580.);
        assert!(bounds.min.y >= 0. && bounds.max.y <= 600.);
        // Closed: last on-curve point returns to the start
        let points = heart.points();
        assert_eq!(points.first(), points.last());
    }
}
