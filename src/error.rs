//! Error taxonomy shared by the board, the engine and the game loop.

use thiserror::Error;

use crate::board::Move;

/// Errors raised by the board model and the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Board or engine parameters cannot describe a playable game.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Attempt to place a stone on an occupied or out-of-range cell.
    #[error("invalid move: {0}")]
    InvalidMove(Move),

    /// The engine was asked to move on a full board.
    #[error("no legal move available")]
    NoLegalMoveAvailable,
}
