use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by the rules engine.
///
/// `AlreadyOccupied` and `BoardRepetition` are ordinary move rejections; the
/// caller is expected to ask for another move. The allocation variants leave
/// the game exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: point is already occupied")]
    AlreadyOccupied,
    #[error("illegal move: repeats a position already reached by this player")]
    BoardRepetition,
    #[error("out of memory")]
    OutOfMemory(#[from] TryReserveError),
    #[error("position history is full")]
    HistoryExhausted,
}
