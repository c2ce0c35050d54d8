//! Simulated players, for tuning snap threshold and scatter radius.
//!
//! A simulated player repeatedly picks a random free piece and drags it towards its
//! slot, missing by a uniform aiming error on each axis.

use std::{cell::Cell, rc::Rc};

use jigsaw_core::{DragOutcome, PuzzleConfig, Session, SessionError, R2};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub trials: usize,
    /// Give up on a trial after this many drags
    pub max_drags: usize,
    /// Maximum per-axis miss when aiming at a slot
    pub aim_error: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialResult {
    pub seed: u64,
    pub drags: usize,
    pub snaps: usize,
    pub solved: bool,
    /// Number of times the solved callback fired (1 for a solved trial)
    pub solved_signals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub trials: usize,
    pub solved: usize,
    pub mean_drags: f64,
    pub min_drags: usize,
    pub max_drags: usize,
    pub results: Vec<TrialResult>,
}

/// Play one session until solved or `max_drags` is reached.
pub fn run_trial(config: &PuzzleConfig, seed: u64, aim_error: f64, max_drags: usize) -> Result<TrialResult, SessionError> {
    let mut session = Session::new(config.clone(), seed)?;
    let signals = Rc::new(Cell::new(0));
    let counter = signals.clone();
    session.set_on_solved(move || counter.set(counter.get() + 1));

    // Independent stream for the player, so layouts match across aim settings
    let mut rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
    let mut drags = 0;
    let mut snaps = 0;
    while !session.is_solved() && drags < max_drags {
        let free: Vec<usize> = session.pieces().iter().filter(|p| !p.locked).map(|p| p.id).collect();
        if free.is_empty() {
            break;
        }
        let id = free[rng.gen_range(0..free.len())];
        let piece = session.piece(id).ok_or(SessionError::UnknownPiece(id))?;
        let miss = if aim_error > 0. {
            R2::new(rng.gen_range(-aim_error..=aim_error), rng.gen_range(-aim_error..=aim_error))
        } else {
            R2::zero()
        };
        let offset = piece.correct + miss - piece.position;

        session.drag_start(id)?;
        session.drag_move(id, offset / 2.)?;
        session.drag_move(id, offset)?;
        drags += 1;
        if session.drag_end(id, offset)? == DragOutcome::Snapped {
            snaps += 1;
        }
    }
    debug!("Trial {}: {} drags, solved: {}", seed, drags, session.is_solved());
    Ok(TrialResult {
        seed,
        drags,
        snaps,
        solved: session.is_solved(),
        solved_signals: signals.get(),
    })
}

/// Run `sim.trials` independent trials in parallel.
pub fn simulate(config: &PuzzleConfig, sim: &SimConfig) -> Result<Summary, SessionError> {
    let results = (0..sim.trials as u64)
        .into_par_iter()
        .map(|trial| run_trial(config, sim.seed.wrapping_add(trial), sim.aim_error, sim.max_drags))
        .collect::<Result<Vec<_>, _>>()?;
    let solved = results.iter().filter(|r| r.solved).count();
    let total: usize = results.iter().map(|r| r.drags).sum();
    let mean_drags = if results.is_empty() {
        0.
    } else {
        total as f64 / results.len() as f64
    };
    Ok(Summary {
        trials: results.len(),
        solved,
        mean_drags,
        min_drags: results.iter().map(|r| r.drags).min().unwrap_or(0),
        max_drags: results.iter().map(|r| r.drags).max().unwrap_or(0),
        results,
    })
}
