//! WASM bindings for the jigsaw puzzle engine.
//!
//! This crate exposes a [`Puzzle`] session handle to the browser presentation
//! layer: it renders from [`Puzzle::view`] and feeds drag gestures back in.

use std::{cell::Cell, rc::Rc};

use jigsaw_core::{BoardView, PuzzleConfig, Session, R2};
use log::{debug, info, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsValue> {
    let level: Option<String> = serde_wasm_bindgen::from_value(level)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse log level: {}", e)))?;
    let level = jigsaw_core::parse_log_level(level.as_deref());
    log::set_max_level(level);
    Ok(())
}

/// Returns the reference puzzle configuration (3×3, piece size 100).
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    to_js(&PuzzleConfig::default())
}

/// Returns a configuration whose scatter radius and snap threshold scale with `piece_size`.
#[wasm_bindgen]
pub fn scaled_config(grid_size: usize, piece_size: f64) -> Result<JsValue, JsValue> {
    to_js(&PuzzleConfig::scaled(grid_size, piece_size))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

fn parse_config(config: JsValue) -> Result<PuzzleConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(PuzzleConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

fn err<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = queueMicrotask)]
    fn queue_microtask(callback: &js_sys::Function);
}

/// Latches the session's solved transition so the JS handler can run once the
/// `Puzzle` borrow is released.
#[derive(Debug, Clone, Default)]
struct SolvedSignal(Rc<Cell<bool>>);

impl SolvedSignal {
    fn attach(session: &mut Session) -> SolvedSignal {
        let signal = SolvedSignal::default();
        let pending = signal.0.clone();
        session.set_on_solved(move || pending.set(true));
        signal
    }

    fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// A puzzle session owned by the presentation layer.
#[wasm_bindgen]
pub struct Puzzle {
    session: Session,
    solved: SolvedSignal,
    on_solved: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Puzzle {
    /// Creates a session with a freshly randomized layout.
    ///
    /// # Arguments
    /// * `config` - A `PuzzleConfig` (missing fields take reference values), or
    ///   null/undefined for the reference puzzle.
    /// * `seed` - Optional layout seed; drawn from `Math.random()` when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, seed: Option<u32>) -> Result<Puzzle, JsValue> {
        let config = parse_config(config)?;
        let seed = seed.map(u64::from).unwrap_or_else(random_seed);
        let mut session = Session::new(config, seed).map_err(err)?;
        let solved = SolvedSignal::attach(&mut session);
        info!("Created {}x{} puzzle", session.config().grid_size, session.config().grid_size);
        Ok(Puzzle { session, solved, on_solved: None })
    }

    /// Registers `callback`, invoked once when the last piece locks.
    ///
    /// The callback runs as a microtask after the triggering call returns, so it
    /// may freely call back into this `Puzzle` (e.g. `view()` or `reset()`).
    #[wasm_bindgen(js_name = onSolved)]
    pub fn on_solved(&mut self, callback: js_sys::Function) {
        self.on_solved = Some(callback);
    }

    fn dispatch_solved(&self) {
        if !self.solved.take() {
            return;
        }
        match &self.on_solved {
            Some(callback) => queue_microtask(callback),
            None => debug!("Puzzle solved with no onSolved callback registered"),
        }
    }

    /// Render-ready `BoardView` of the current state.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&BoardView::new(&self.session))
    }

    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.session.is_solved()
    }

    /// Marks piece `id` as being dragged. Returns false if it cannot be dragged.
    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, id: usize) -> Result<bool, JsValue> {
        self.session.drag_start(id).map_err(err)
    }

    /// Records the latest drag offset of piece `id`; the pieces are unchanged until release.
    #[wasm_bindgen(js_name = dragMove)]
    pub fn drag_move(&mut self, id: usize, dx: f64, dy: f64) -> Result<bool, JsValue> {
        self.session.drag_move(id, R2 { x: dx, y: dy }).map_err(err)
    }

    /// Abandons the current drag without applying it.
    #[wasm_bindgen(js_name = dragCancel)]
    pub fn drag_cancel(&mut self) {
        self.session.drag_cancel();
    }

    /// Commits a drag of piece `id` by `(dx, dy)`.
    ///
    /// # Returns
    /// A `DragOutcome`: `ignored`, `moved` (with the new position) or `snapped`.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, id: usize, dx: f64, dy: f64) -> Result<JsValue, JsValue> {
        let outcome = self.session.drag_end(id, R2 { x: dx, y: dy }).map_err(err)?;
        self.dispatch_solved();
        to_js(&outcome)
    }

    /// Re-checks completion. True only if this call solved the puzzle.
    #[wasm_bindgen(js_name = checkCompletion)]
    pub fn check_completion(&mut self) -> bool {
        let solved = self.session.check_completion();
        self.dispatch_solved();
        solved
    }

    /// Starts over with a fresh layout; the solved callback stays registered.
    pub fn reset(&mut self) {
        self.session.reset();
        self.solved.take();
    }

    /// Starts over with a new configuration.
    pub fn regenerate(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config = parse_config(config)?;
        self.session.regenerate(config).map_err(err)?;
        self.solved.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jigsaw_core::DragOutcome;
    use test_log::test;

    fn solve(session: &mut Session) {
        for id in 0..session.pieces().len() {
            let piece = session.piece(id).unwrap();
            let offset = piece.correct - piece.position;
            assert_eq!(session.drag_end(id, offset).unwrap(), DragOutcome::Snapped);
        }
    }

    #[test]
    fn solved_signal_latches_once() {
        let mut session = Session::new(PuzzleConfig::default(), 11).unwrap();
        let signal = SolvedSignal::attach(&mut session);
        assert!(!signal.take());

        solve(&mut session);
        // The session is free again by the time the signal is read.
        assert!(session.is_solved());
        assert!(signal.take());
        assert!(!signal.take());

        assert!(!session.check_completion());
        assert!(!signal.take());
    }

    #[test]
    fn solved_signal_survives_reset() {
        let mut session = Session::new(PuzzleConfig::default(), 12).unwrap();
        let signal = SolvedSignal::attach(&mut session);
        solve(&mut session);
        assert!(signal.take());

        session.reset();
        assert!(!signal.take());
        solve(&mut session);
        assert!(signal.take());
    }
}
