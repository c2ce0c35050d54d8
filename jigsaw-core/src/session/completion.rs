use log::info;
use serde::{Deserialize, Serialize};

use crate::puzzle::piece::Piece;

/// Edge-triggered completion detector.
///
/// Holds an explicit terminal flag: once solved, further observations never fire again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    solved: bool,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether every piece of a non-empty collection is locked.
    pub fn all_locked(pieces: &[Piece]) -> bool {
        !pieces.is_empty() && pieces.iter().all(|p| p.locked)
    }

    /// Re-evaluate `pieces`; returns `true` only on the transition into the solved state.
    pub fn observe(&mut self, pieces: &[Piece]) -> bool {
        if self.solved || !Self::all_locked(pieces) {
            return false;
        }
        self.solved = true;
        info!("Puzzle solved ({} pieces)", pieces.len());
        true
    }
}
