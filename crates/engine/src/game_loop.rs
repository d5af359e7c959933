//! Threaded game loop.
//!
//! The loop owns the [`GameSession`] while it runs. Every tick it reads the
//! shared pointer, updates the session with the measured frame delta, and
//! publishes a snapshot. Rendering never touches the session.
//!
//! # Stopping
//!
//! A tick holds the gate lock from the "still running?" check until its
//! snapshot is published. [`GameLoop::stop`] clears the gate under the same
//! lock, so once it has the lock no tick is in progress and none can start.
//! It then waits a bounded time for the thread to exit; a thread that does not
//! finish in time is logged and left detached.
//!
//! The loop parks itself when the session reaches `GameOver`: no further
//! ticks run, but the thread keeps watching the pointer so a press still
//! reaches the [`Navigator`]. A won session keeps ticking (it only reacts to
//! presses) until it is stopped.
//!
//! Timestamps handed to the session are measured from one origin taken when
//! the [`GameLoop`] is created, so they keep increasing across restarts.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use flummi_core::types::SessionState;
use flummi_core::{GameSession, SessionEvent, WorldSnapshot};
use flummi_input::{ButtonLayout, InputController, SharedPointer};
use tracing::{debug, info, warn};

use crate::collab::{Navigator, ScoreSink};
use crate::config::LoopConfig;
use crate::error::LoopError;
use crate::slot::FrameSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

impl LoopState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::Stopped => "stopped",
            LoopState::Running => "running",
        }
    }
}

fn state_code(state: SessionState) -> u8 {
    match state {
        SessionState::Running => 0,
        SessionState::Jumping => 1,
        SessionState::GameOver => 2,
        SessionState::GameWon => 3,
    }
}

fn state_from_code(code: u8) -> SessionState {
    match code {
        1 => SessionState::Jumping,
        2 => SessionState::GameOver,
        3 => SessionState::GameWon,
        _ => SessionState::Running,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Ticking,
    /// Lost; only terminal presses are handled.
    Parked,
    Closed,
}

struct Shared {
    gate: Mutex<Gate>,
    ticks: AtomicU64,
    state: AtomicU8,
}

impl Shared {
    fn gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Default)]
struct Collaborators {
    score: Option<Box<dyn ScoreSink>>,
    navigator: Option<Box<dyn Navigator>>,
}

impl Collaborators {
    fn dispatch(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SaveScore { elapsed_secs } => match self.score.as_mut() {
                Some(sink) => {
                    if let Err(e) = sink.save_score(elapsed_secs) {
                        warn!(error = %e, elapsed_secs, "failed to save score");
                    }
                }
                None => debug!(elapsed_secs, "no score sink, result dropped"),
            },
            SessionEvent::TransitionRequested(target) => {
                if let Some(nav) = self.navigator.as_mut() {
                    nav.request_transition(target);
                }
            }
            SessionEvent::Lost => {}
            SessionEvent::PauseChanged(paused) => debug!(paused, "pause changed"),
        }
    }
}

type WorkerResult = (GameSession, Collaborators);

struct Worker {
    session: GameSession,
    collab: Collaborators,
    shared: Arc<Shared>,
    pointer: SharedPointer,
    layout: ButtonLayout,
    slot: FrameSlot,
    tick: Duration,
    origin: Instant,
}

impl Worker {
    fn run(mut self) -> WorkerResult {
        let mut controller = InputController::synced(self.pointer.load());
        let mut snapshot = WorldSnapshot::default();
        let mut last = Instant::now();
        let mut next = last;
        debug!(tick_ms = self.tick.as_millis() as u64, "game loop thread started");

        loop {
            next += self.tick;
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            } else {
                next = now;
            }

            let events = {
                let mut gate = self.shared.gate();
                let phase = *gate;
                match phase {
                    Gate::Closed => break,
                    Gate::Parked => {
                        drop(gate);
                        let input = controller.poll(self.pointer.load(), &self.layout);
                        if let Some(event) = self.session.terminal_input(&input) {
                            self.collab.dispatch(event);
                        }
                        continue;
                    }
                    Gate::Ticking => {}
                }

                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f64();
                last = now;
                let now_ms = now.duration_since(self.origin).as_millis() as u64;

                let input = controller.poll(self.pointer.load(), &self.layout);
                let events = self.session.update(dt, now_ms, &input);
                self.shared.ticks.fetch_add(1, Ordering::AcqRel);
                self.shared
                    .state
                    .store(state_code(self.session.state()), Ordering::Release);
                self.session.snapshot_into(&mut snapshot);
                self.slot.publish(&mut snapshot);

                if self.session.state() == SessionState::GameOver {
                    *gate = Gate::Parked;
                    info!(tick = self.session.tick(), "game over, loop stopping");
                }
                events
            };

            for event in events {
                self.collab.dispatch(event);
            }
        }

        debug!(tick = self.session.tick(), "game loop thread exiting");
        (self.session, self.collab)
    }
}

/// Runs a [`GameSession`] on a dedicated thread.
pub struct GameLoop {
    config: LoopConfig,
    pointer: SharedPointer,
    layout: ButtonLayout,
    slot: FrameSlot,
    shared: Arc<Shared>,
    origin: Instant,
    session: Option<GameSession>,
    collab: Option<Collaborators>,
    handle: Option<JoinHandle<WorkerResult>>,
}

impl GameLoop {
    /// Wrap `session` and publish its initial frame into `slot`.
    pub fn new(
        session: GameSession,
        pointer: SharedPointer,
        layout: ButtonLayout,
        slot: FrameSlot,
        config: LoopConfig,
    ) -> Self {
        let mut snapshot = session.snapshot();
        slot.publish(&mut snapshot);

        let shared = Arc::new(Shared {
            gate: Mutex::new(Gate::Closed),
            ticks: AtomicU64::new(0),
            state: AtomicU8::new(state_code(session.state())),
        });

        Self {
            config,
            pointer,
            layout,
            slot,
            shared,
            origin: Instant::now(),
            session: Some(session),
            collab: Some(Collaborators::default()),
            handle: None,
        }
    }

    pub fn with_score_sink(mut self, sink: impl ScoreSink + 'static) -> Self {
        if let Some(collab) = self.collab.as_mut() {
            collab.score = Some(Box::new(sink));
        }
        self
    }

    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        if let Some(collab) = self.collab.as_mut() {
            collab.navigator = Some(Box::new(navigator));
        }
        self
    }

    pub fn start(&mut self) -> Result<(), LoopError> {
        if self.handle.is_some() {
            if self.is_running() {
                return Err(LoopError::AlreadyRunning);
            }
            // Parked after a loss; reclaim the session first.
            self.stop()?;
        }

        let session = self.session.take().ok_or(LoopError::NoSession)?;
        let collab = self.collab.take().unwrap_or_default();
        *self.shared.gate() = Gate::Ticking;

        let worker = Worker {
            session,
            collab,
            shared: Arc::clone(&self.shared),
            pointer: self.pointer.clone(),
            layout: self.layout,
            slot: self.slot.clone(),
            tick: self.config.tick,
            origin: self.origin,
        };

        match thread::Builder::new()
            .name("game-loop".into())
            .spawn(move || worker.run())
        {
            Ok(handle) => {
                self.handle = Some(handle);
                info!(tick_ms = self.config.tick.as_millis() as u64, "game loop started");
                Ok(())
            }
            Err(e) => {
                *self.shared.gate() = Gate::Closed;
                warn!(error = %e, "failed to spawn game loop thread");
                Err(LoopError::Spawn(e))
            }
        }
    }

    /// Stop ticking and wait (bounded) for the loop thread.
    ///
    /// When this returns, no update is running and none will run, even if the
    /// result is an error.
    pub fn stop(&mut self) -> Result<(), LoopError> {
        *self.shared.gate() = Gate::Closed;

        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        let deadline = Instant::now() + self.config.join_timeout;
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                warn!(
                    timeout_ms = self.config.join_timeout.as_millis() as u64,
                    "game loop thread did not stop in time, detaching"
                );
                return Err(LoopError::JoinTimeout(self.config.join_timeout));
            }
            thread::sleep(Duration::from_millis(1));
        }

        match handle.join() {
            Ok((session, collab)) => {
                info!(ticks = self.tick_count(), state = session.state().as_str(), "game loop stopped");
                self.session = Some(session);
                self.collab = Some(collab);
                Ok(())
            }
            Err(_) => {
                warn!("game loop thread panicked");
                Err(LoopError::Panicked)
            }
        }
    }

    /// True while ticks are being run. Turns false as soon as `stop` is called
    /// or the session is lost.
    pub fn is_running(&self) -> bool {
        *self.shared.gate() == Gate::Ticking
    }

    pub fn loop_state(&self) -> LoopState {
        if self.is_running() {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }

    /// Number of ticks run so far, over all starts.
    pub fn tick_count(&self) -> u64 {
        self.shared.ticks.load(Ordering::Acquire)
    }

    /// Session state as of the last tick.
    pub fn state(&self) -> SessionState {
        state_from_code(self.shared.state.load(Ordering::Acquire))
    }

    /// The session, while the loop thread does not hold it.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn into_session(mut self) -> Option<GameSession> {
        let _ = self.stop();
        self.session.take()
    }

    pub fn slot(&self) -> &FrameSlot {
        &self.slot
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ChannelNavigator;
    use flummi_core::types::{AssetId, Button, DisplayMetrics, Screen};
    use flummi_core::{AnimatedSprite, Entity, World};

    const METRICS: DisplayMetrics = DisplayMetrics::new(2400, 1200, 0);

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<f64>>>);

    impl ScoreSink for Recorder {
        fn save_score(&mut self, elapsed_secs: f64) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(elapsed_secs);
            Ok(())
        }
    }

    /// Player standing on a wide platform, goal far away.
    fn standing() -> GameSession {
        let mut world = World::new(
            1,
            METRICS,
            Entity::new(AssetId::Player, 600.0, 500.0, 100, 120),
            Entity::new(AssetId::Goal, 90_000.0, 0.0, 150, 200),
        );
        world.add_platform(Entity::new(AssetId::Platform, 0.0, 600.0, 2000, 60));
        GameSession::new(world)
    }

    fn fast() -> LoopConfig {
        LoopConfig {
            tick: Duration::from_millis(1),
            join_timeout: Duration::from_secs(2),
        }
    }

    fn layout() -> ButtonLayout {
        ButtonLayout::new(METRICS, [(200, 120); Button::COUNT])
    }

    fn new_loop(session: GameSession) -> GameLoop {
        GameLoop::new(session, SharedPointer::new(), layout(), FrameSlot::new(), fast())
    }

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        cond()
    }

    #[test]
    fn no_ticks_after_stop() {
        let mut lp = new_loop(standing());
        assert_eq!(lp.loop_state(), LoopState::Stopped);
        lp.start().unwrap();
        assert!(lp.is_running());
        assert!(wait_until(|| lp.tick_count() >= 5));

        lp.stop().unwrap();
        let after = lp.tick_count();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(lp.tick_count(), after);
        assert!(!lp.is_running());
        assert_eq!(lp.session().unwrap().tick(), after);
    }

    #[test]
    fn start_twice_is_rejected_and_restart_resumes() {
        let mut lp = new_loop(standing());
        lp.start().unwrap();
        assert!(matches!(lp.start(), Err(LoopError::AlreadyRunning)));
        lp.stop().unwrap();
        let first = lp.tick_count();

        lp.start().unwrap();
        assert!(wait_until(|| lp.tick_count() > first));
        lp.stop().unwrap();
        assert_eq!(lp.session().unwrap().tick(), lp.tick_count());
    }

    #[test]
    fn stop_without_start_is_ok() {
        let mut lp = new_loop(standing());
        lp.stop().unwrap();
        lp.stop().unwrap();
        assert!(lp.session().is_some());
    }

    #[test]
    fn loss_stops_the_loop() {
        let mut session = standing();
        session.world_mut().player_mut().set_position(600.0, 1300.0);
        let mut lp = new_loop(session);
        lp.start().unwrap();

        assert!(wait_until(|| !lp.is_running()));
        assert_eq!(lp.state(), SessionState::GameOver);
        assert_eq!(lp.tick_count(), 1);
        lp.stop().unwrap();
        assert_eq!(lp.session().unwrap().state(), SessionState::GameOver);
    }

    #[test]
    fn win_keeps_running_and_saves_once() {
        let mut session = standing();
        session.world_mut().goal_mut().set_position(600.0, 450.0);
        let scores = Recorder::default();
        let (nav, rx) = ChannelNavigator::channel();
        let pointer = SharedPointer::new();
        let mut lp = GameLoop::new(session, pointer.clone(), layout(), FrameSlot::new(), fast())
            .with_score_sink(scores.clone())
            .with_navigator(nav);
        lp.start().unwrap();

        assert!(wait_until(|| lp.state() == SessionState::GameWon));
        let at_win = lp.tick_count();
        assert!(wait_until(|| lp.tick_count() > at_win + 5));
        assert!(lp.is_running());

        pointer.press(10.0, 10.0);
        assert!(wait_until(|| rx.try_recv().is_ok_and(|s| s == Screen::AfterGame)));

        lp.stop().unwrap();
        assert_eq!(scores.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn publishes_initial_and_per_tick_frames() {
        let slot = FrameSlot::new();
        let mut lp = GameLoop::new(standing(), SharedPointer::new(), layout(), slot.clone(), fast());
        assert_eq!(slot.frame_id(), 1);

        lp.start().unwrap();
        assert!(wait_until(|| slot.frame_id() > 3));
        lp.stop().unwrap();

        let mut seen = 0;
        let mut snap = WorldSnapshot::default();
        assert!(slot.take_latest(&mut seen, &mut snap));
        assert_eq!(snap.tick, lp.tick_count());
    }

    #[test]
    fn lost_loop_still_forwards_presses_to_navigator() {
        let mut session = standing();
        session.world_mut().player_mut().set_position(600.0, 1300.0);
        let (nav, rx) = ChannelNavigator::channel();
        let pointer = SharedPointer::new();
        let mut lp = GameLoop::new(session, pointer.clone(), layout(), FrameSlot::new(), fast())
            .with_navigator(nav);
        lp.start().unwrap();

        assert!(wait_until(|| lp.state() == SessionState::GameOver && !lp.is_running()));
        assert!(rx.try_recv().is_err());

        pointer.press(10.0, 10.0);
        assert!(wait_until(|| rx.try_recv().is_ok_and(|s| s == Screen::AfterGame)));
        assert_eq!(lp.tick_count(), 1);

        lp.stop().unwrap();
        assert_eq!(lp.session().unwrap().tick(), 1);
    }

    #[test]
    fn clock_keeps_running_across_restart() {
        let mut session = standing();
        session.world_mut().add_scenery(AnimatedSprite::new(
            Entity::new(AssetId::Fire, 100.0, 100.0, 100, 120),
            4,
            0,
        ));
        let sprite = |lp: &GameLoop| {
            let s = lp.session().unwrap().world().scenery().iter().next().copied();
            s.unwrap()
        };
        let mut lp = new_loop(session);

        lp.start().unwrap();
        thread::sleep(Duration::from_millis(300));
        lp.stop().unwrap();
        let first_elapsed = lp.session().unwrap().elapsed_secs();
        let first_advance = sprite(&lp).last_advance_ms();
        assert!(first_elapsed > 0.0);

        lp.start().unwrap();
        thread::sleep(Duration::from_millis(300));
        lp.stop().unwrap();
        let second_elapsed = lp.session().unwrap().elapsed_secs();
        assert!(
            second_elapsed > first_elapsed,
            "elapsed went backwards: {first_elapsed} -> {second_elapsed}"
        );
        assert!(sprite(&lp).last_advance_ms() > first_advance);
    }
}
