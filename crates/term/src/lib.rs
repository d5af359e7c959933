//! Terminal front-end.
//!
//! Snapshots are drawn through a small [`Canvas`] trait (`draw`, `draw_frame`,
//! `draw_text`) so the draw order can be tested without a terminal. The
//! terminal implementation rasterises pixel rectangles into character cells of
//! a [`FrameBuffer`], which [`TerminalRenderer`] flushes as a diff.

pub mod assets;
pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod throttle;

pub use flummi_core as core;
pub use flummi_types as types;

pub use assets::BuiltinAssets;
pub use canvas::{Canvas, TermCanvas};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{fingerprint, GameView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use throttle::RenderThrottle;
