#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid size must be at least 1")]
    EmptyGrid,

    #[error("Piece size must be positive and finite, got {0}")]
    PieceSize(f64),

    #[error("Tab ratio must be in (0, 0.5], got {0}")]
    TabRatio(f64),

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative {
        field: &'static str,
        value: f64,
    },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("No piece with id {0}")]
    UnknownPiece(usize),

    #[error("Invalid puzzle config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("Unrecognized edge code {0} (expected -1, 0 or 1)")]
    EdgeCode(i8),
}
