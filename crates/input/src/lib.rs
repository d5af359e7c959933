//! Pointer input module (engine-facing).
//!
//! Raw pointer events arrive on the render/event thread and are folded into a
//! single lock-free [`SharedPointer`] record. Once per tick the simulation
//! reads that record and an [`InputController`] turns it into an
//! [`InputFrame`](crate::types::InputFrame) by hit-testing the on-screen
//! buttons of a [`ButtonLayout`]:
//!
//! - **jump** and **pause** are edge-triggered (only a new press counts)
//! - **left** and **right** are level-triggered (re-checked every tick while
//!   the pointer stays down)
//!
//! Terminal front-ends feed the pointer from crossterm mouse events ([`map`])
//! and synthesise presses from the keyboard ([`keyboard`]).

pub mod controller;
pub mod keyboard;
pub mod layout;
pub mod map;
pub mod pointer;

pub use flummi_types as types;

pub use controller::InputController;
pub use keyboard::KeyboardPointer;
pub use layout::ButtonLayout;
pub use map::{apply_mouse_event, should_quit, CellScale};
pub use pointer::{PointerState, SharedPointer};
