//! Physics and collision.
//!
//! Motion is kinematic: positions change by `speed * dt` with no velocity
//! state, no terminal velocity and no positional correction. A player that
//! overlaps any platform is "resting" and simply stops falling, even if it
//! visually sinks into the platform.
//!
//! # Step order
//!
//! 1. Gravity (unless jumping or resting)
//! 2. Jump ascent (at most [`JUMP_TICK_CAP`] ticks per press)
//! 3. Horizontal button motion (frame-time scaled)
//! 4. Camera scroll (fixed-dt scaled, see [`FIXED_DT`])
//! 5. Lose check (enemy overlap or fell below the display)
//! 6. Win check (goal overlap) - evaluated last, so it wins a tie

use crate::entity::Entity;
use crate::types::{
    SessionState, FIXED_DT, GRAVITY_SPEED, JUMP_SPEED, JUMP_TICK_CAP, MOVE_SPEED, SCROLL_SPEED,
};
use crate::world::World;

/// Per-session control state consumed by [`step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub state: SessionState,
    /// Ticks of ascent already spent on the current jump press.
    pub jump_ticks: u8,
    pub left_held: bool,
    pub right_held: bool,
}

impl Controls {
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Begin a jump: enter `Jumping` and re-arm the tick budget.
    pub fn start_jump(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.state = SessionState::Jumping;
        self.jump_ticks = 0;
    }

    /// End the jump immediately, whether or not the budget was spent.
    pub fn end_jump(&mut self) {
        if self.state == SessionState::Jumping {
            self.state = SessionState::Running;
        }
    }
}

/// Camera scroll applied during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scroll {
    #[default]
    None,
    /// World moved left (camera followed the player to the right).
    Left,
    /// World moved right (camera followed the player to the left).
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Player overlapped a platform at the start of the step.
    pub resting: bool,
    pub scroll: Scroll,
    pub lost: bool,
    pub won: bool,
}

/// True if `player` overlaps any of `platforms`.
pub fn resting<'a>(player: &Entity, platforms: impl IntoIterator<Item = &'a Entity>) -> bool {
    let bb = player.bounding_box();
    platforms
        .into_iter()
        .any(|p| p.bounding_box().intersects(&bb))
}

/// Advance the world by one tick of `dt` seconds.
///
/// Terminal sessions are left untouched.
pub fn step(world: &mut World, dt: f64, controls: &mut Controls) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if controls.state.is_terminal() {
        return outcome;
    }

    let metrics = world.metrics();
    let half_width = metrics.width as f64 / 2.0;
    let bar = metrics.bar_height as f64;

    outcome.resting = resting(world.player(), world.platforms());
    if !controls.state.is_jumping() && !outcome.resting {
        world.player_mut().move_by(0.0, GRAVITY_SPEED * dt);
    }

    // The budget is re-armed only by a new press (see `Controls::start_jump`),
    // so holding the button past the cap hovers instead of climbing.
    if controls.state.is_jumping() && controls.jump_ticks < JUMP_TICK_CAP {
        controls.jump_ticks += 1;
        world.player_mut().move_by(0.0, -JUMP_SPEED * dt);
    }

    if controls.right_held && world.player().x() < half_width {
        world.player_mut().move_by(MOVE_SPEED * dt, 0.0);
    }
    if controls.left_held && world.player().x() > bar {
        world.player_mut().move_by(-MOVE_SPEED * dt, 0.0);
    }

    outcome.scroll = scroll(world, controls);

    let player_box = world.player().bounding_box();
    let hit_enemy = world
        .enemies()
        .iter()
        .any(|e| e.bounding_box().intersects(&player_box));
    if hit_enemy || player_box.top > metrics.height as f64 {
        controls.state = SessionState::GameOver;
        outcome.lost = true;
    }

    if world.goal().bounding_box().intersects(&player_box) {
        controls.state = SessionState::GameWon;
        outcome.won = true;
    }

    outcome
}

/// Follow the player with the camera. Uses [`FIXED_DT`], not the frame delta.
fn scroll(world: &mut World, controls: &Controls) -> Scroll {
    let metrics = world.metrics();
    let x = world.player().x();

    if x >= metrics.width as f64 / 2.0 && !controls.state.is_jumping() && !controls.left_held {
        world.scroll_by(-SCROLL_SPEED * FIXED_DT);
        Scroll::Left
    } else if x <= metrics.bar_height as f64 * 2.0 {
        world.scroll_by(SCROLL_SPEED * FIXED_DT);
        Scroll::Right
    } else {
        Scroll::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetId, DisplayMetrics};

    const W: u32 = 2000;
    const H: u32 = 1000;

    fn world_with_player(x: f64, y: f64) -> World {
        World::new(
            1,
            DisplayMetrics::new(W, H, 0),
            Entity::new(AssetId::Player, x, y, 100, 120),
            Entity::new(AssetId::Goal, 50_000.0, 0.0, 150, 200),
        )
    }

    #[test]
    fn gravity_pulls_down_when_airborne() {
        let mut w = world_with_player(500.0, 100.0);
        let mut c = Controls::default();
        let out = step(&mut w, 0.5, &mut c);
        assert!(!out.resting);
        assert_eq!(w.player().y(), 100.0 + GRAVITY_SPEED * 0.5);
    }

    #[test]
    fn resting_player_does_not_fall() {
        let mut w = world_with_player(500.0, 100.0);
        w.add_platform(Entity::new(AssetId::Platform, 400.0, 200.0, 600, 60));
        let mut c = Controls::default();
        let out = step(&mut w, 0.5, &mut c);
        assert!(out.resting);
        assert_eq!(w.player().y(), 100.0);
    }

    #[test]
    fn jumping_suppresses_gravity_after_cap() {
        let mut w = world_with_player(500.0, 500.0);
        let mut c = Controls::default();
        c.start_jump();
        for _ in 0..JUMP_TICK_CAP {
            step(&mut w, 0.01, &mut c);
        }
        let top = w.player().y();
        step(&mut w, 0.01, &mut c);
        assert_eq!(w.player().y(), top);
        assert_eq!(c.jump_ticks, JUMP_TICK_CAP);
    }

    #[test]
    fn left_button_respects_inset() {
        let mut w = World::new(
            1,
            DisplayMetrics::new(W, H, 40),
            Entity::new(AssetId::Player, 40.0, 0.0, 10, 10),
            Entity::new(AssetId::Goal, 50_000.0, 0.0, 10, 10),
        );
        let mut c = Controls {
            left_held: true,
            ..Controls::default()
        };
        step(&mut w, 0.1, &mut c);
        // x == bar: left motion blocked; x <= 2 * bar: camera scrolls right.
        assert_eq!(w.player().x(), 40.0 + SCROLL_SPEED * FIXED_DT);
    }

    #[test]
    fn terminal_session_is_frozen() {
        let mut w = world_with_player(500.0, 100.0);
        let mut c = Controls::new(SessionState::GameOver);
        let out = step(&mut w, 1.0, &mut c);
        assert_eq!(out, StepOutcome::default());
        assert_eq!(w.player().position(), (500.0, 100.0));
    }
}
