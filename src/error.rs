use thiserror::Error;

use crate::board::Point;

/// Errors returned by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Invalid construction parameters; no grid was built.
    #[error("invalid board configuration: {0}")]
    Config(String),
    /// Coordinate outside `[0, dimen)`.
    #[error("cell {point:?} is outside a {dimen}x{dimen} board")]
    OutOfBounds { point: Point, dimen: usize },
    /// Destination is not reachable by any legal outflank.
    #[error("illegal move to {0:?}")]
    InvalidMove(Point),
}

pub type Result<T> = std::result::Result<T, EngineError>;
