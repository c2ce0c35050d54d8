//! Render-ready descriptions of a session for the presentation layer.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    path::Bounds,
    piece::Piece,
    r2::R2,
    shape::ImageWindow,
    silhouette,
    state::{Phase, Progress, Session},
};

/// Stacking order: locked pieces sit behind free ones, the dragged piece above all.
pub const Z_LOCKED: u32 = 1;
pub const Z_FREE: u32 = 10;
pub const Z_DRAGGING: u32 = 30;

/// Display scale: free pieces look slightly lifted off the board.
pub const SCALE_LOCKED: f64 = 1.;
pub const SCALE_FREE: f64 = 1.05;
pub const SCALE_DRAGGING: f64 = 1.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct PieceView {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    /// Top-left corner in board coordinates
    pub position: R2<f64>,
    /// Degrees
    pub rotation: f64,
    pub locked: bool,
    pub draggable: bool,
    pub z_index: u32,
    pub scale: f64,
    /// SVG path data of the piece outline, in piece-local coordinates
    pub outline: String,
    pub image: ImageWindow,
    /// Piece-local box the outline (and its clip) fits in
    pub viewport: Bounds,
}

impl PieceView {
    pub fn new(piece: &Piece, dragging: bool) -> Self {
        let (z_index, scale) = if piece.locked {
            (Z_LOCKED, SCALE_LOCKED)
        } else if dragging {
            (Z_DRAGGING, SCALE_DRAGGING)
        } else {
            (Z_FREE, SCALE_FREE)
        };
        PieceView {
            id: piece.id,
            row: piece.row,
            col: piece.col,
            position: piece.position,
            rotation: if piece.locked { 0. } else { piece.rotation },
            locked: piece.locked,
            draggable: piece.is_draggable(),
            z_index,
            scale,
            outline: piece.outline.to_svg(),
            image: piece.image,
            viewport: piece.outline.viewport(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub board_size: f64,
    pub phase: Phase,
    pub progress: Progress,
    /// Empty once solved: the composed image replaces the pieces
    pub pieces: Vec<PieceView>,
    /// SVG path data of the decorative silhouette, in board coordinates
    pub silhouette: String,
    /// Whether to draw the silhouette as an assembly guide (while playing)
    pub show_guide: bool,
}

impl BoardView {
    pub fn new(session: &Session) -> Self {
        let phase = session.phase();
        let dragged = session.active_drag().map(|d| d.piece_id);
        let pieces = match phase {
            Phase::Playing => session
                .pieces()
                .iter()
                .map(|p| PieceView::new(p, dragged == Some(p.id)))
                .collect(),
            Phase::Solved => vec![],
        };
        let board_size = session.config().board_size();
        BoardView {
            board_size,
            phase,
            progress: session.progress(),
            pieces,
            silhouette: silhouette::heart_for_board(board_size).to_svg(),
            show_guide: phase == Phase::Playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PuzzleConfig;
    use test_log::test;

    #[test]
    fn playing_view() {
        let mut session = Session::new(PuzzleConfig::default(), 8).unwrap();
        let piece = session.piece(2).unwrap().clone();
        session.drag_end(2, piece.correct - piece.position).unwrap();
        session.drag_start(5).unwrap();

        let view = BoardView::new(&session);
        assert_eq!(view.board_size, 300.);
        assert_eq!(view.phase, Phase::Playing);
        assert!(view.show_guide);
        assert_eq!(view.progress, Progress { locked: 1, total: 9 });
        assert_eq!(view.pieces.len(), 9);
        assert!(view.silhouette.starts_with("M 150 280 C 60 190"));

        let locked = &view.pieces[2];
        assert!(locked.locked && !locked.draggable);
        assert_eq!((locked.z_index, locked.rotation), (Z_LOCKED, 0.));
        assert_eq!(locked.position, piece.correct);
        assert_eq!(view.pieces[5].z_index, Z_DRAGGING);
        assert_eq!(view.pieces[5].scale, SCALE_DRAGGING);
        assert_eq!(view.pieces[0].z_index, Z_FREE);
        assert_eq!(view.pieces[0].outline, session.piece(0).unwrap().outline.to_svg());
        assert_eq!(view.pieces[0].viewport.min, R2::new(-30., -30.));
    }

    #[test]
    fn solved_view_hides_pieces() {
        let mut session = Session::new(PuzzleConfig::default(), 9).unwrap();
        for id in 0..9 {
            let piece = session.piece(id).unwrap().clone();
            session.drag_end(id, piece.correct - piece.position).unwrap();
        }
        let view = BoardView::new(&session);
        assert_eq!(view.phase, Phase::Solved);
        assert!(view.pieces.is_empty());
        assert!(!view.show_guide);
        assert_eq!(view.progress, Progress { locked: 9, total: 9 });
    }

    #[test]
    fn camel_case_json() {
        let session = Session::new(PuzzleConfig::default(), 10).unwrap();
        let json = serde_json::to_value(BoardView::new(&session)).unwrap();
        assert_eq!(json["boardSize"], 300.);
        assert_eq!(json["showGuide"], true);
        assert_eq!(json["phase"], "playing");
        assert!(json["pieces"][0]["zIndex"].is_u64());
        assert_eq!(json["pieces"][0]["image"]["offset"]["x"], 0.);
    }
}
