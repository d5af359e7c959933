//! Session state machine.
//!
//! A [`GameSession`] wraps a [`World`] with the per-level state that input
//! drives: running/jumping/terminal state, the jump budget, the held
//! direction buttons, and the pause flag. Each tick the loop hands it one
//! [`InputFrame`] and the measured `dt`, and gets back the events the outside
//! world has to act on (persist a score, switch screens).

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::physics::{self, Controls};
use crate::snapshot::WorldSnapshot;
use crate::types::{Button, InputFrame, Screen, SessionState};
use crate::world::World;

/// Something the session needs done outside the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// A press arrived while the session was terminal.
    TransitionRequested(Screen),
    /// First tick that ended in `GameWon`; emitted exactly once.
    SaveScore { elapsed_secs: f64 },
    /// First tick that ended in `GameOver`.
    Lost,
    PauseChanged(bool),
}

pub type SessionEvents = ArrayVec<SessionEvent, 4>;

#[derive(Debug, Clone)]
pub struct GameSession {
    world: World,
    controls: Controls,
    paused: bool,
    started_ms: Option<u64>,
    last_now_ms: u64,
    finished_secs: Option<f64>,
    tick: u64,
}

impl GameSession {
    pub fn new(world: World) -> Self {
        Self {
            world,
            controls: Controls::new(SessionState::Running),
            paused: false,
            started_ms: None,
            last_now_ms: 0,
            finished_secs: None,
            tick: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn state(&self) -> SessionState {
        self.controls.state
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Wall-clock seconds since the first update, frozen once the run ends.
    pub fn elapsed_secs(&self) -> f64 {
        if let Some(done) = self.finished_secs {
            return done;
        }
        match self.started_ms {
            Some(start) => self.last_now_ms.saturating_sub(start) as f64 / 1000.0,
            None => 0.0,
        }
    }

    /// Run one tick.
    ///
    /// `dt` is the measured frame delta in seconds; `now_ms` is a monotonic
    /// wall-clock reading used for animation and the run timer.
    pub fn update(&mut self, dt: f64, now_ms: u64, input: &InputFrame) -> SessionEvents {
        let mut events = SessionEvents::new();
        self.tick = self.tick.wrapping_add(1);
        if self.started_ms.is_none() {
            self.started_ms = Some(now_ms);
        }
        self.last_now_ms = now_ms;

        if self.controls.state.is_terminal() {
            if let Some(event) = self.terminal_input(input) {
                let _ = events.try_push(event);
            }
            return events;
        }

        if input.release {
            self.controls.end_jump();
        }

        if input.press && input.pressed_button == Some(Button::Pause) {
            self.paused = !self.paused;
            info!(paused = self.paused, "pause toggled");
            let _ = events.try_push(SessionEvent::PauseChanged(self.paused));
        }
        if self.paused {
            self.controls.left_held = false;
            self.controls.right_held = false;
            return events;
        }

        if input.press && input.pressed_button == Some(Button::Jump) {
            self.controls.start_jump();
        }
        self.controls.left_held = input.left_held;
        self.controls.right_held = input.right_held;

        self.world.animate(now_ms);
        let outcome = physics::step(&mut self.world, dt, &mut self.controls);

        if outcome.lost || outcome.won {
            let elapsed = self.elapsed_secs();
            self.finished_secs = Some(elapsed);
            match self.controls.state {
                SessionState::GameWon => {
                    info!(elapsed_secs = elapsed, lost_too = outcome.lost, "game won");
                    let _ = events.try_push(SessionEvent::SaveScore {
                        elapsed_secs: elapsed,
                    });
                }
                _ => {
                    info!(elapsed_secs = elapsed, "game over");
                    let _ = events.try_push(SessionEvent::Lost);
                }
            }
        }

        events
    }

    /// Gameplay input is ignored once the run has ended; a press asks for the
    /// after-game screen instead. Does not advance the simulation.
    pub fn terminal_input(&self, input: &InputFrame) -> Option<SessionEvent> {
        if !self.controls.state.is_terminal() || !input.press {
            return None;
        }
        debug!(state = self.controls.state.as_str(), "transition requested");
        Some(SessionEvent::TransitionRequested(Screen::AfterGame))
    }

    /// Copy everything the renderer needs into `out`, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut WorldSnapshot) {
        self.world.snapshot_into(out);
        out.state = self.controls.state;
        out.paused = self.paused;
        out.elapsed_secs = self.elapsed_secs();
        out.tick = self.tick;
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut s = WorldSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
