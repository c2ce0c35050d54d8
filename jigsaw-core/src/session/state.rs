//! A single puzzle session: the piece collection plus the interaction state around it.

use std::fmt;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    config::PuzzleConfig,
    error::SessionError,
    layout::generate_layout,
    piece::Piece,
    r2::R2,
    session::{completion::Completion, drag::{release, update_piece, DragOutcome}},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Playing,
    Solved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct Progress {
    pub locked: usize,
    pub total: usize,
}

/// A drag gesture that has started but not yet been released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDrag {
    pub piece_id: usize,
    /// Latest offset reported by the presentation layer, relative to the drag start
    pub offset: R2<f64>,
}

pub type SolvedCallback = Box<dyn FnMut()>;

pub struct Session {
    config: PuzzleConfig,
    rng: StdRng,
    pieces: Vec<Piece>,
    completion: Completion,
    drag: Option<ActiveDrag>,
    on_solved: Option<SolvedCallback>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("pieces", &self.pieces.len())
            .field("completion", &self.completion)
            .field("drag", &self.drag)
            .field("on_solved", &self.on_solved.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session with a layout drawn from `seed`.
    pub fn new(config: PuzzleConfig, seed: u64) -> Result<Self, SessionError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: PuzzleConfig, mut rng: StdRng) -> Result<Self, SessionError> {
        config.validate()?;
        let pieces = generate_layout(&config, &mut rng);
        Ok(Session {
            config,
            rng,
            pieces,
            completion: Completion::new(),
            drag: None,
            on_solved: None,
        })
    }

    /// Register the callback invoked once when the puzzle becomes solved.
    pub fn set_on_solved(&mut self, callback: impl FnMut() + 'static) {
        self.on_solved = Some(Box::new(callback));
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: usize) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn phase(&self) -> Phase {
        if self.completion.is_solved() {
            Phase::Solved
        } else {
            Phase::Playing
        }
    }

    pub fn is_solved(&self) -> bool {
        self.completion.is_solved()
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.drag.as_ref()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            locked: self.pieces.iter().filter(|p| p.locked).count(),
            total: self.pieces.len(),
        }
    }

    fn require_piece(&self, id: usize) -> Result<&Piece, SessionError> {
        self.piece(id).ok_or(SessionError::UnknownPiece(id))
    }

    /// Begin dragging piece `id`. Returns `false` (and records nothing) for locked
    /// pieces or a solved puzzle.
    pub fn drag_start(&mut self, id: usize) -> Result<bool, SessionError> {
        let piece = self.require_piece(id)?;
        if piece.locked || self.is_solved() {
            debug!("Piece {} is not draggable", id);
            return Ok(false);
        }
        self.drag = Some(ActiveDrag { piece_id: id, offset: R2::zero() });
        Ok(true)
    }

    /// Record the latest offset of the drag on `id`. Never touches the pieces.
    pub fn drag_move(&mut self, id: usize, offset: R2<f64>) -> Result<bool, SessionError> {
        self.require_piece(id)?;
        match self.drag.as_mut() {
            Some(drag) if drag.piece_id == id => {
                drag.offset = offset;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Abandon the in-flight drag; its offset is never applied.
    pub fn drag_cancel(&mut self) -> Option<ActiveDrag> {
        self.drag.take()
    }

    /// Commit a drag gesture on `id` that moved the piece by `offset`.
    pub fn drag_end(&mut self, id: usize, offset: R2<f64>) -> Result<DragOutcome, SessionError> {
        self.require_piece(id)?;
        if self.drag.map_or(false, |drag| drag.piece_id == id) {
            self.drag = None;
        }
        if self.is_solved() {
            debug!("Ignoring drag of piece {} after solve", id);
            return Ok(DragOutcome::Ignored);
        }
        if !offset.is_finite() {
            debug!("Ignoring drag of piece {} with non-finite offset {}", id, offset);
            return Ok(DragOutcome::Ignored);
        }
        let threshold = self.config.snap_threshold;
        let (pieces, outcome) = update_piece(&self.pieces, id, |p| release(p, offset, threshold))?;
        self.pieces = pieces;
        self.check_completion();
        Ok(outcome)
    }

    /// Re-evaluate completion; fires the solved callback only on the transition.
    pub fn check_completion(&mut self) -> bool {
        if !self.completion.observe(&self.pieces) {
            return false;
        }
        self.drag = None;
        if let Some(callback) = self.on_solved.as_mut() {
            callback();
        }
        true
    }

    /// Fresh layout and scatter with the current config.
    pub fn reset(&mut self) {
        self.pieces = generate_layout(&self.config, &mut self.rng);
        self.completion = Completion::new();
        self.drag = None;
        info!("Puzzle reset ({} pieces)", self.pieces.len());
    }

    /// Replace the config and start over.
    pub fn regenerate(&mut self, config: PuzzleConfig) -> Result<(), SessionError> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }
}
