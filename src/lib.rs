//! Flummi (workspace facade crate).
//!
//! A side-scrolling platformer for the terminal. The implementation lives in
//! dedicated crates under `crates/`; this package re-exports them under short
//! module names and hosts the `flummi` binary.

pub use flummi_core as core;
pub use flummi_engine as engine;
pub use flummi_input as input;
pub use flummi_term as term;
pub use flummi_types as types;
