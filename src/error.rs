use thiserror::Error;

use crate::map::MapError;

/// Errors that can escape the game loop or its setup.
///
/// Misses, redundant removals and loop overruns are not errors; they are
/// absorbed where they happen.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Map(#[from] MapError),
}
