//! Level world state.
//!
//! The world owns every placed object of a level, grouped by category:
//! platforms, enemies, scenery sprites, the player and the goal. Category
//! order is insertion order and is also the draw order.
//!
//! The camera is modelled by moving the world rather than a view transform:
//! scrolling translates every dynamic object and accumulates the total shift in
//! `scroll_offset`. Only [`crate::physics`] scrolls.

use tracing::debug;

use crate::arena::{Arena, Handle};
use crate::entity::Entity;
use crate::snapshot::{DrawItem, WorldSnapshot};
use crate::sprite::AnimatedSprite;
use crate::types::DisplayMetrics;

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    level_id: u32,
    metrics: DisplayMetrics,
    player: Entity,
    goal: Entity,
    enemies: Arena<Entity>,
    platforms: Arena<Entity>,
    scenery: Arena<AnimatedSprite>,
    scroll_offset: f64,
}

impl World {
    pub fn new(level_id: u32, metrics: DisplayMetrics, player: Entity, goal: Entity) -> Self {
        Self {
            level_id,
            metrics,
            player,
            goal,
            enemies: Arena::new(),
            platforms: Arena::new(),
            scenery: Arena::new(),
            scroll_offset: 0.0,
        }
    }

    pub fn add_platform(&mut self, platform: Entity) -> Handle<Entity> {
        self.platforms.insert(platform)
    }

    pub fn add_enemy(&mut self, enemy: Entity) -> Handle<Entity> {
        self.enemies.insert(enemy)
    }

    pub fn add_scenery(&mut self, sprite: AnimatedSprite) -> Handle<AnimatedSprite> {
        self.scenery.insert(sprite)
    }

    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    pub fn metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.player
    }

    pub fn goal(&self) -> &Entity {
        &self.goal
    }

    pub fn goal_mut(&mut self) -> &mut Entity {
        &mut self.goal
    }

    pub fn platforms(&self) -> &Arena<Entity> {
        &self.platforms
    }

    pub fn platform_mut(&mut self, handle: Handle<Entity>) -> Option<&mut Entity> {
        self.platforms.get_mut(handle)
    }

    pub fn enemies(&self) -> &Arena<Entity> {
        &self.enemies
    }

    pub fn enemy_mut(&mut self, handle: Handle<Entity>) -> Option<&mut Entity> {
        self.enemies.get_mut(handle)
    }

    pub fn scenery(&self) -> &Arena<AnimatedSprite> {
        &self.scenery
    }

    /// Step every scenery animation against the wall clock.
    pub fn animate(&mut self, now_ms: u64) {
        for sprite in self.scenery.iter_mut() {
            sprite.advance(now_ms);
        }
    }

    /// Translate all dynamic objects horizontally by `dx`.
    pub(crate) fn scroll_by(&mut self, dx: f64) {
        for p in self.platforms.iter_mut() {
            p.move_by(dx, 0.0);
        }
        for e in self.enemies.iter_mut() {
            e.move_by(dx, 0.0);
        }
        for s in self.scenery.iter_mut() {
            s.entity.move_by(dx, 0.0);
        }
        self.player.move_by(dx, 0.0);
        self.goal.move_by(dx, 0.0);
        self.scroll_offset += dx;
    }

    /// Copy the drawable state into `out`, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut WorldSnapshot) {
        out.level_id = self.level_id;
        out.metrics = self.metrics;
        out.scroll_offset = self.scroll_offset;
        out.player = DrawItem::from(&self.player);
        out.goal = DrawItem::from(&self.goal);

        out.platforms.clear();
        out.platforms.extend(self.platforms.iter().map(DrawItem::from));
        out.enemies.clear();
        out.enemies.extend(self.enemies.iter().map(DrawItem::from));
        out.scenery.clear();
        out.scenery.extend(self.scenery.iter().map(DrawItem::from));
    }

    pub(crate) fn log_summary(&self) {
        debug!(
            level = self.level_id,
            platforms = self.platforms.len(),
            enemies = self.enemies.len(),
            scenery = self.scenery.len(),
            width = self.metrics.width,
            height = self.metrics.height,
            "world built"
        );
    }
}
