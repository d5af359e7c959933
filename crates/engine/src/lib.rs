//! Loop runner and collaborators.
//!
//! [`GameLoop`] drives a [`GameSession`](flummi_core::GameSession) on its own
//! thread at a fixed cadence and publishes a snapshot after every tick into a
//! [`FrameSlot`], from which the render side picks up the latest frame. The
//! session's outward events are handed to a [`ScoreSink`] and a
//! [`Navigator`].

pub mod collab;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod score_store;
pub mod slot;

pub use collab::{ChannelNavigator, Navigator, ScoreSink};
pub use config::{GameConfig, LoopConfig};
pub use error::LoopError;
pub use game_loop::{GameLoop, LoopState};
pub use score_store::{JsonScoreStore, Score, ScoreStoreError};
pub use slot::FrameSlot;
