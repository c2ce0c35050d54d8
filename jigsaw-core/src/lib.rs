//! Jigsaw puzzle engine: piece layout, piece outlines, drag/snap and completion.

// Organized modules
pub mod geometry;
pub mod puzzle;
pub mod session;

pub use geometry::path;
pub use geometry::r2;
pub use geometry::silhouette;

pub use puzzle::edge;
pub use puzzle::layout;
pub use puzzle::piece;
pub use puzzle::shape;

pub use session::completion;
pub use session::drag;
pub use session::state;

// Utility modules
pub mod config;
pub mod error;
pub mod view;

// Re-export key types for external use
pub use config::PuzzleConfig;
pub use drag::DragOutcome;
pub use edge::{EdgeCode, EdgeTable, PieceEdges, Side};
pub use error::{ConfigError, SessionError, ShapeError};
pub use path::Path;
pub use piece::Piece;
pub use r2::R2;
pub use shape::{ImageWindow, Outline};
pub use state::{Phase, Progress, Session};
pub use view::{BoardView, PieceView};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => {
            log::warn!("invalid log level {:?}, using info", level);
            log::LevelFilter::Info
        }
    }
}
