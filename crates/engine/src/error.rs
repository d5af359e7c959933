use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("game loop is already running")]
    AlreadyRunning,

    /// The session was lost to a loop thread that never finished.
    #[error("no session to run")]
    NoSession,

    #[error("failed to spawn loop thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("loop thread did not stop within {0:?}")]
    JoinTimeout(Duration),

    #[error("loop thread panicked")]
    Panicked,
}
