use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::error::ConfigError;

/// Puzzle session parameters.
///
/// Distances are in board units (the board is `grid_size * piece_size` on a side),
/// angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase", default)]
pub struct PuzzleConfig {
    /// Pieces per row and per column
    pub grid_size: usize,
    /// Side length of a (square) piece
    pub piece_size: f64,
    /// Tab size as a fraction of `piece_size`
    pub tab_ratio: f64,
    /// Maximum per-axis scatter offset from the correct position
    pub scatter_radius: f64,
    /// Maximum absolute initial tilt of an unlocked piece
    pub max_rotation: f64,
    /// A release strictly closer than this to the correct position locks the piece
    pub snap_threshold: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            piece_size: Self::DEFAULT_PIECE_SIZE,
            tab_ratio: Self::DEFAULT_TAB_RATIO,
            scatter_radius: Self::DEFAULT_SCATTER_RADIUS,
            max_rotation: Self::DEFAULT_MAX_ROTATION,
            snap_threshold: Self::DEFAULT_SNAP_THRESHOLD,
        }
    }
}

impl PuzzleConfig {
    pub const DEFAULT_GRID_SIZE: usize = 3;
    pub const DEFAULT_PIECE_SIZE: f64 = 100.;
    pub const DEFAULT_TAB_RATIO: f64 = 0.25;
    pub const DEFAULT_SCATTER_RADIUS: f64 = 80.;
    pub const DEFAULT_MAX_ROTATION: f64 = 10.;
    pub const DEFAULT_SNAP_THRESHOLD: f64 = 35.;

    /// Config for an arbitrary grid whose scatter radius and snap threshold
    /// keep the reference proportions to the piece size.
    pub fn scaled(grid_size: usize, piece_size: f64) -> Self {
        let ratio = piece_size / Self::DEFAULT_PIECE_SIZE;
        Self {
            grid_size,
            piece_size,
            scatter_radius: Self::DEFAULT_SCATTER_RADIUS * ratio,
            snap_threshold: Self::DEFAULT_SNAP_THRESHOLD * ratio,
            ..Self::default()
        }
    }

    pub fn tab_size(&self) -> f64 {
        self.piece_size * self.tab_ratio
    }

    pub fn board_size(&self) -> f64 {
        self.grid_size as f64 * self.piece_size
    }

    pub fn num_pieces(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if !self.piece_size.is_finite() || self.piece_size <= 0. {
            return Err(ConfigError::PieceSize(self.piece_size));
        }
        if !(self.tab_ratio > 0. && self.tab_ratio <= 0.5) {
            return Err(ConfigError::TabRatio(self.tab_ratio));
        }
        for (field, value) in [
            ("scatterRadius", self.scatter_radius),
            ("maxRotation", self.max_rotation),
            ("snapThreshold", self.snap_threshold),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let config = PuzzleConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_relative_eq!(config.tab_size(), 25.);
        assert_relative_eq!(config.board_size(), 300.);
        assert_eq!(config.num_pieces(), 9);
    }

    #[test]
    fn scaled_keeps_proportions() {
        let config = PuzzleConfig::scaled(5, 60.);
        assert_relative_eq!(config.snap_threshold, 21.);
        assert_relative_eq!(config.scatter_radius, 48.);
        assert_relative_eq!(config.tab_size(), 15.);
        assert_eq!(PuzzleConfig::scaled(3, 100.), PuzzleConfig::default());
    }

    #[test]
    fn invalid() {
        let config = PuzzleConfig { grid_size: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));
        let config = PuzzleConfig { piece_size: f64::NAN, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::PieceSize(_))));
        let config = PuzzleConfig { tab_ratio: 0.6, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::TabRatio(0.6)));
        let config = PuzzleConfig { snap_threshold: -1., ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative { field: "snapThreshold", value: -1. })
        );
    }

    #[test]
    fn partial_json() {
        let config: PuzzleConfig = serde_json::from_str(r#"{ "gridSize": 4, "snapThreshold": 20 }"#).unwrap();
        assert_eq!(config.grid_size, 4);
        assert_relative_eq!(config.snap_threshold, 20.);
        assert_relative_eq!(config.piece_size, 100.);
    }
}
