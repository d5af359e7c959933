//! Sprite-sheet animation paced by wall-clock time.
//!
//! Frames advance on a fixed real-time interval regardless of how often the
//! simulation ticks, so a faster loop does not make the fire flicker faster.

use crate::entity::Entity;
use crate::types::FRAME_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedSprite {
    pub entity: Entity,
    frame_count: u32,
    current_frame: u32,
    last_advance_ms: u64,
    frame_interval_ms: u64,
}

impl AnimatedSprite {
    /// `frame_count` of zero is treated as a single frame.
    pub fn new(entity: Entity, frame_count: u32, now_ms: u64) -> Self {
        Self {
            entity,
            frame_count: frame_count.max(1),
            current_frame: 0,
            last_advance_ms: now_ms,
            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }

    pub fn with_frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn last_advance_ms(&self) -> u64 {
        self.last_advance_ms
    }

    /// Step to the next frame once `frame_interval_ms` has passed since the
    /// last step. Returns whether the frame changed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_advance_ms) < self.frame_interval_ms {
            return false;
        }
        self.current_frame = (self.current_frame + 1) % self.frame_count;
        self.last_advance_ms = now_ms;
        true
    }
}
