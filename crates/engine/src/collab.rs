//! Outward collaborators of a running game.

use std::sync::mpsc::{self, Receiver, Sender};

use flummi_core::types::Screen;
use tracing::debug;

/// Persists the duration of a won run.
pub trait ScoreSink: Send {
    fn save_score(&mut self, elapsed_secs: f64) -> anyhow::Result<()>;
}

/// Switches to another screen when the player leaves a finished game.
pub trait Navigator: Send {
    fn request_transition(&mut self, target: Screen);
}

/// Forwards transition requests to whoever owns the receiving end.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: Sender<Screen>,
}

impl ChannelNavigator {
    pub fn channel() -> (Self, Receiver<Screen>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn request_transition(&mut self, target: Screen) {
        if self.tx.send(target).is_err() {
            debug!(?target, "navigation receiver dropped");
        }
    }
}
