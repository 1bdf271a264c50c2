//! Error type shared by the engine, the board parser and the binaries.

/// Errors raised when a caller hands the engine something it cannot represent.
///
/// Valid engine usage never produces an error: a move that changes nothing,
/// a spawn on a full grid, or a search on a finished game are all ordinary
/// outcomes, not failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A value outside the domain of the parameter, e.g. an unknown direction
    /// or a tile that is not a power of two.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed board text.
    #[error("row {row}: {message}")]
    Parse { row: usize, message: String },
}
