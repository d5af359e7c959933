#![allow(dead_code)]

use flummi::core::{AnimatedSprite, Entity, GameSession, World};
use flummi::types::{AssetId, BoundingBox, DisplayMetrics};

pub const W: u32 = 2000;
pub const H: u32 = 1000;

pub fn metrics() -> DisplayMetrics {
    DisplayMetrics::new(W, H, 0)
}

/// Deterministic LCG for randomized checks (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Uniform-ish value in `[lo, hi)`.
    pub fn next_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (self.next_u32() as f64 / u32::MAX as f64) * (hi - lo)
    }

    /// Entity with a non-degenerate box somewhere in a 400x400 area.
    pub fn entity(&mut self, sprite: AssetId) -> Entity {
        Entity::new(
            sprite,
            self.next_f64(0.0, 400.0),
            self.next_f64(0.0, 400.0),
            1 + self.next_range(150),
            1 + self.next_range(150),
        )
    }
}

pub fn player_at(x: f64, y: f64) -> Entity {
    Entity::new(AssetId::Player, x, y, 100, 120)
}

pub fn far_goal() -> Entity {
    Entity::new(AssetId::Goal, 50_000.0, 0.0, 150, 200)
}

/// Player at `(x, y)`, goal out of reach, nothing else.
pub fn world_with_player(x: f64, y: f64) -> World {
    World::new(1, metrics(), player_at(x, y), far_goal())
}

/// Player standing on (overlapping) a wide platform.
pub fn standing_world(x: f64) -> World {
    let mut w = world_with_player(x, 500.0);
    w.add_platform(Entity::new(AssetId::Platform, 0.0, 600.0, 1900, 60));
    w
}

pub fn standing_session() -> GameSession {
    GameSession::new(standing_world(300.0))
}

/// World with one object of every category, for scroll checks.
pub fn populated_world(player_x: f64) -> World {
    let mut w = world_with_player(player_x, 300.0);
    w.add_platform(Entity::new(AssetId::Platform, 100.0, 800.0, 600, 60));
    w.add_enemy(Entity::new(AssetId::Enemy, 1500.0, 100.0, 100, 100));
    w.add_scenery(AnimatedSprite::new(
        Entity::new(AssetId::Fire, 100.0, 700.0, 100, 120),
        4,
        0,
    ));
    w
}

pub fn xs(world: &World) -> Vec<f64> {
    let mut v = vec![world.player().x(), world.goal().x()];
    v.extend(world.platforms().iter().map(|p| p.x()));
    v.extend(world.enemies().iter().map(|e| e.x()));
    v.extend(world.scenery().iter().map(|s| s.entity.x()));
    v
}

pub fn boxes_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.intersects(b)
}
