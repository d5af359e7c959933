//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no behaviour beyond small helpers, making them
//! usable in any context (simulation, input mapping, terminal rendering).
//!
//! # Coordinate System
//!
//! World coordinates are display pixels with the origin in the top-left corner:
//!
//! - **x** grows to the right
//! - **y** grows downwards (so gravity *adds* to y)
//!
//! The terminal front-end maps pixels to character cells; the simulation never
//! sees cells.
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_SPEED` | 200 | Fall speed in px/s (no terminal velocity) |
//! | `JUMP_SPEED` | 1700 | Rise speed in px/s while a jump is active |
//! | `MOVE_SPEED` | 200 | Button-driven horizontal speed in px/s |
//! | `SCROLL_SPEED` | 200 | Camera scroll speed in px/s |
//! | `FIXED_DT` | 0.03 | Per-tick delta used for scrolling only |
//! | `JUMP_TICK_CAP` | 5 | Ticks of ascent granted by one press |
//! | `FRAME_INTERVAL_MS` | 100 | Sprite animation cadence (wall clock) |
//! | `BUTTON_OFFSET` | 270 | Margin used to place the on-screen buttons |
//!
//! # Examples
//!
//! ```
//! use flummi_types::{AssetId, BoundingBox, Button, SessionState};
//!
//! let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
//! let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
//! assert!(a.intersects(&b));
//! assert!(a.contains(0.0, 0.0));
//! assert!(!a.contains(10.0, 5.0));
//!
//! assert!(SessionState::GameWon.is_terminal());
//! assert!(!SessionState::Jumping.is_terminal());
//!
//! assert_eq!("player".parse::<AssetId>(), Ok(AssetId::Player));
//! assert_eq!(Button::Pause.index(), 3);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fall speed in pixels per second. No terminal velocity is applied.
pub const GRAVITY_SPEED: f64 = 200.0;

/// Rise speed in pixels per second while a jump is active.
pub const JUMP_SPEED: f64 = 1700.0;

/// Horizontal speed in pixels per second while a direction button is held.
pub const MOVE_SPEED: f64 = 200.0;

/// Camera scroll speed in pixels per second.
pub const SCROLL_SPEED: f64 = 200.0;

/// Per-tick delta (seconds) used for camera scrolling.
///
/// Scrolling deliberately ignores the measured frame delta, so scroll speed
/// follows the tick rate while player motion follows wall-clock time.
pub const FIXED_DT: f64 = 0.03;

/// Number of ticks of ascent a single jump press grants.
pub const JUMP_TICK_CAP: u8 = 5;

/// Sprite animation cadence in milliseconds (wall clock, not ticks).
pub const FRAME_INTERVAL_MS: u64 = 100;

/// Margin used to place the direction buttons from the display edges.
pub const BUTTON_OFFSET: f64 = 270.0;

/// Left edge of the jump button.
pub const JUMP_BUTTON_X: f64 = 150.0;

/// Default loop cadence in milliseconds.
pub const TICK_MS: u32 = 30;

/// Axis-aligned bounding box in world pixels.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box with the given top-left corner and size.
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the box has positive extent on both axes.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Overlap test.
    ///
    /// Boxes overlap iff they share a region of non-zero width and height;
    /// touching edges do not count. Empty boxes never intersect anything.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Half-open point test: `[left, right) x [top, bottom)`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Session state of a running level.
///
/// `Jumping` is a sub-state of `Running`. `GameOver` and `GameWon` are terminal:
/// the simulation no longer advances and a press only requests a screen change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Running,
    Jumping,
    GameOver,
    GameWon,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::GameWon)
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self, SessionState::Jumping)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Running => "running",
            SessionState::Jumping => "jumping",
            SessionState::GameOver => "game_over",
            SessionState::GameWon => "game_won",
        }
    }
}

/// On-screen buttons.
///
/// Used as an index into fixed arrays, so the discriminants are dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Jump,
    Pause,
}

impl Button {
    pub const COUNT: usize = 4;
    pub const ALL: [Button; Button::COUNT] =
        [Button::Left, Button::Right, Button::Jump, Button::Pause];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Jump => "jump",
            Button::Pause => "pause",
        }
    }
}

/// Screens the navigation collaborator can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Result screen shown after a run ends.
    AfterGame,
}

/// Identifiers for every image the game loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetId {
    Background,
    Player,
    Enemy,
    Goal,
    Platform,
    Fire,
    ButtonLeft,
    ButtonRight,
    ButtonUp,
    ButtonPause,
    ButtonPlay,
    GameOver,
    YouWin,
    Paused,
}

impl AssetId {
    pub const ALL: [AssetId; 14] = [
        AssetId::Background,
        AssetId::Player,
        AssetId::Enemy,
        AssetId::Goal,
        AssetId::Platform,
        AssetId::Fire,
        AssetId::ButtonLeft,
        AssetId::ButtonRight,
        AssetId::ButtonUp,
        AssetId::ButtonPause,
        AssetId::ButtonPlay,
        AssetId::GameOver,
        AssetId::YouWin,
        AssetId::Paused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetId::Background => "background",
            AssetId::Player => "player",
            AssetId::Enemy => "enemy",
            AssetId::Goal => "goal",
            AssetId::Platform => "platform",
            AssetId::Fire => "fire",
            AssetId::ButtonLeft => "button_left",
            AssetId::ButtonRight => "button_right",
            AssetId::ButtonUp => "button_up",
            AssetId::ButtonPause => "button_pause",
            AssetId::ButtonPlay => "button_play",
            AssetId::GameOver => "game_over",
            AssetId::YouWin => "you_win",
            AssetId::Paused => "paused",
        }
    }
}

/// Name that matches no [`AssetId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAsset(pub String);

impl fmt::Display for UnknownAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown asset {:?}", self.0)
    }
}

impl std::error::Error for UnknownAsset {}

/// Parses the snake_case name used in level files.
impl FromStr for AssetId {
    type Err = UnknownAsset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownAsset(s.to_string()))
    }
}

/// Loaded image as seen by the simulation: only its size matters.
///
/// A sprite sheet lays `frame_count` equally wide frames side by side, so a
/// single frame is `width / frame_count` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    pub id: AssetId,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
}

impl Bitmap {
    pub const fn new(id: AssetId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            frame_count: 1,
        }
    }

    pub const fn sheet(id: AssetId, width: u32, height: u32, frame_count: u32) -> Self {
        Self {
            id,
            width,
            height,
            frame_count,
        }
    }

    /// Width of one animation frame.
    pub fn frame_width(&self) -> u32 {
        self.width / self.frame_count.max(1)
    }
}

/// Display geometry queried once when a level loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMetrics {
    pub width: u32,
    pub height: u32,
    /// Safe-area inset on the left edge.
    pub bar_height: u32,
}

impl DisplayMetrics {
    pub const fn new(width: u32, height: u32, bar_height: u32) -> Self {
        Self {
            width,
            height,
            bar_height,
        }
    }

    /// Small margin used for HUD placement (2% of the width).
    pub fn padding(&self) -> f64 {
        (self.width as f64 * 0.02).floor()
    }
}

/// Input for one simulation tick, derived from the last known pointer state.
///
/// `press`/`release` are edges (seen once); `left_held`/`right_held` are levels
/// re-evaluated every tick while the pointer stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// A new press started since the previous tick.
    pub press: bool,
    /// The button under the new press, if any.
    pub pressed_button: Option<Button>,
    /// The pointer was released since the previous tick.
    pub release: bool,
    pub left_held: bool,
    pub right_held: bool,
}

impl InputFrame {
    /// Frame for a fresh press on `button`.
    pub fn pressed(button: Option<Button>) -> Self {
        Self {
            press: true,
            pressed_button: button,
            ..Self::default()
        }
    }

    pub fn released() -> Self {
        Self {
            release: true,
            ..Self::default()
        }
    }

    pub fn holding(button: Button) -> Self {
        Self {
            left_held: button == Button::Left,
            right_held: button == Button::Right,
            ..Self::default()
        }
    }
}
