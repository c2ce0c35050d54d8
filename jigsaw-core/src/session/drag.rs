//! Drag/snap transitions, as pure functions over piece records.

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::SessionError, puzzle::piece::Piece, r2::R2};

/// What a drag release did to a piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragOutcome {
    /// The piece was locked (or the puzzle solved); nothing changed.
    Ignored,
    /// The piece stays free at a new position.
    Moved { position: R2<f64> },
    /// The piece locked into its correct position.
    Snapped,
}

/// Apply a drag release of `displacement` to `piece`.
///
/// The candidate position locks if it lies strictly within `snap_threshold` of the
/// correct position; the piece then sits exactly on its slot with no tilt. A
/// non-finite displacement is treated as an abandoned gesture.
pub fn release(piece: &Piece, displacement: R2<f64>, snap_threshold: f64) -> (Piece, DragOutcome) {
    if piece.locked {
        debug!("Ignoring release of locked piece {}", piece.id);
        return (piece.clone(), DragOutcome::Ignored);
    }
    if !displacement.is_finite() {
        debug!("Ignoring non-finite release {} of piece {}", displacement, piece.id);
        return (piece.clone(), DragOutcome::Ignored);
    }
    let candidate = piece.position + displacement;
    let distance = candidate.distance(&piece.correct);
    if distance < snap_threshold {
        debug!("Piece {} snapped (distance {:.2})", piece.id, distance);
        let locked = Piece {
            position: piece.correct,
            rotation: 0.,
            locked: true,
            ..piece.clone()
        };
        (locked, DragOutcome::Snapped)
    } else {
        let moved = Piece { position: candidate, ..piece.clone() };
        (moved, DragOutcome::Moved { position: candidate })
    }
}

/// Copy-on-write update: a new collection where only piece `id` has been replaced by `f(piece)`.
pub fn update_piece<T>(
    pieces: &[Piece],
    id: usize,
    f: impl FnOnce(&Piece) -> (Piece, T),
) -> Result<(Vec<Piece>, T), SessionError> {
    let idx = pieces
        .iter()
        .position(|p| p.id == id)
        .ok_or(SessionError::UnknownPiece(id))?;
    let (updated, out) = f(&pieces[idx]);
    let mut next = pieces.to_vec();
    next[idx] = updated;
    Ok((next, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::PuzzleConfig, layout::generate_layout};
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use test_log::test;

    fn piece() -> Piece {
        let config = PuzzleConfig::default();
        let mut pieces = generate_layout(&config, &mut StdRng::seed_from_u64(1));
        let mut piece = pieces.remove(4);
        piece.position = R2::new(150., 180.);
        piece.rotation = 7.;
        piece
    }

    #[test]
    fn snaps_just_inside_threshold() {
        let piece = piece();
        // correct is (100, 100); land 34.99 to the right of it
        let displacement = R2::new(134.99 - 150., 100. - 180.);
        let (next, outcome) = release(&piece, displacement, 35.);
        assert_eq!(outcome, DragOutcome::Snapped);
        assert!(next.locked);
        assert_eq!(next.position, next.correct);
        assert_eq!(next.rotation, 0.);
    }

    #[test]
    fn stays_free_just_outside_threshold() {
        let piece = piece();
        let displacement = R2::new(135.01 - 150., 100. - 180.);
        let (next, outcome) = release(&piece, displacement, 35.);
        assert!(!next.locked);
        assert_relative_eq!(next.position, R2::new(135.01, 100.), epsilon = 1e-9);
        assert_eq!(next.rotation, 7.);
        assert!(matches!(outcome, DragOutcome::Moved { .. }));
    }

    #[test]
    fn exactly_at_threshold_stays_free() {
        let piece = piece();
        let displacement = R2::new(0., 100. + 35. - 180.) - R2::new(150. - 100., 0.);
        let (next, _) = release(&piece, displacement, 35.);
        assert_relative_eq!(next.offset_from_correct(), 35., epsilon = 1e-9);
        assert!(!next.locked);
    }

    #[test]
    fn locked_piece_ignores_release() {
        let piece = piece();
        let (locked, _) = release(&piece, piece.correct - piece.position, 35.);
        let (again, outcome) = release(&locked, R2::new(200., -50.), 35.);
        assert_eq!(outcome, DragOutcome::Ignored);
        assert_eq!(again, locked);
    }

    #[test]
    fn non_finite_release_is_ignored() {
        let piece = piece();
        for displacement in [R2::new(f64::NAN, 0.), R2::new(0., f64::INFINITY), R2::new(f64::NEG_INFINITY, f64::NAN)] {
            let (next, outcome) = release(&piece, displacement, 35.);
            assert_eq!(outcome, DragOutcome::Ignored);
            assert_eq!(next, piece);
        }
    }

    #[test]
    fn update_piece_copies_on_write() {
        let config = PuzzleConfig::default();
        let pieces = generate_layout(&config, &mut StdRng::seed_from_u64(2));
        let (next, outcome) = update_piece(&pieces, 3, |p| release(p, R2::new(1000., 0.), 35.)).unwrap();
        assert!(matches!(outcome, DragOutcome::Moved { .. }));
        for (before, after) in pieces.iter().zip(next.iter()) {
            if before.id == 3 {
                assert_relative_eq!(after.position.x, before.position.x + 1000.);
            } else {
                assert_eq!(before, after);
            }
        }
        assert_eq!(
            update_piece(&pieces, 9, |p| release(p, R2::zero(), 35.)).unwrap_err(),
            SessionError::UnknownPiece(9)
        );
    }
}
