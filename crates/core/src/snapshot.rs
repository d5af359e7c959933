//! Render-side copy of one tick's result.
//!
//! The simulation writes a snapshot after every update and hands it to the
//! render cycle; the renderer never touches the live world.

use crate::entity::Entity;
use crate::sprite::AnimatedSprite;
use crate::types::{AssetId, BoundingBox, DisplayMetrics, SessionState};

/// One positioned bitmap (or bitmap frame) to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub sprite: AssetId,
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
    pub frame: u32,
}

impl DrawItem {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_origin(self.x, self.y, self.width as f64, self.height as f64)
    }
}

impl From<&Entity> for DrawItem {
    fn from(e: &Entity) -> Self {
        Self {
            sprite: e.sprite,
            x: e.x(),
            y: e.y(),
            width: e.width(),
            height: e.height(),
            frame: 0,
        }
    }
}

impl From<&AnimatedSprite> for DrawItem {
    fn from(s: &AnimatedSprite) -> Self {
        Self {
            frame: s.current_frame(),
            ..DrawItem::from(&s.entity)
        }
    }
}

impl Default for DrawItem {
    fn default() -> Self {
        Self {
            sprite: AssetId::Player,
            x: 0.0,
            y: 0.0,
            width: 0,
            height: 0,
            frame: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub level_id: u32,
    pub metrics: DisplayMetrics,
    pub scroll_offset: f64,
    pub platforms: Vec<DrawItem>,
    pub enemies: Vec<DrawItem>,
    pub scenery: Vec<DrawItem>,
    pub player: DrawItem,
    pub goal: DrawItem,
    pub state: SessionState,
    pub paused: bool,
    pub elapsed_secs: f64,
    /// Number of updates the session has run.
    pub tick: u64,
}

impl WorldSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

impl Default for WorldSnapshot {
    fn default() -> Self {
        Self {
            level_id: 0,
            metrics: DisplayMetrics::new(0, 0, 0),
            scroll_offset: 0.0,
            platforms: Vec::new(),
            enemies: Vec::new(),
            scenery: Vec::new(),
            player: DrawItem::default(),
            goal: DrawItem {
                sprite: AssetId::Goal,
                ..DrawItem::default()
            },
            state: SessionState::Running,
            paused: false,
            elapsed_secs: 0.0,
            tick: 0,
        }
    }
}
