//! Terminal platformer runner (default binary).
//!
//! The simulation runs on the game-loop thread; this thread polls terminal
//! events into the shared pointer and draws whatever frame the loop published
//! last.

use std::fs::File;
use std::sync::mpsc::Receiver;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use flummi::core::{build_world, GameSession, LevelCatalog, WorldSnapshot};
use flummi::engine::{ChannelNavigator, GameConfig, GameLoop, JsonScoreStore};
use flummi::input::{apply_mouse_event, should_quit, CellScale, KeyboardPointer, SharedPointer};
use flummi::term::{
    fingerprint, BuiltinAssets, FrameBuffer, GameView, RenderThrottle, TerminalRenderer,
};
use flummi::types::{Screen, SessionState};

const FRAME_MS: u64 = 16;
const STATIC_REDRAW_MS: u64 = 250;

enum Outcome {
    Quit,
    Finished {
        state: SessionState,
        elapsed_secs: f64,
    },
}

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let assets = BuiltinAssets::new();
    let scale = CellScale::default();
    let (cols, rows) = crossterm::terminal::size().unwrap_or((120, 30));
    let metrics = scale.metrics(cols, rows);

    // Everything that can fail on bad data happens before the terminal is
    // switched into raw mode.
    let catalog = match &config.level_dir {
        Some(dir) => LevelCatalog::with_dir(dir),
        None => LevelCatalog::builtin(),
    };
    let level = catalog
        .load(config.level)
        .with_context(|| format!("loading level {}", config.level))?;
    let world = build_world(&level, metrics, &assets, 0)?;
    let view = GameView::new(&assets, metrics)?;

    let store = JsonScoreStore::new(&config.score_path);
    let pointer = SharedPointer::new();
    let (navigator, nav_rx) = ChannelNavigator::channel();
    let mut game_loop = GameLoop::new(
        GameSession::new(world),
        pointer.clone(),
        *view.layout(),
        Default::default(),
        config.loop_config(),
    )
    .with_score_sink(store.clone())
    .with_navigator(navigator);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game_loop, &view, &pointer, &nav_rx, scale);

    if let Err(e) = game_loop.stop() {
        warn!(error = %e, "game loop did not shut down cleanly");
    }
    // Always try to restore terminal state.
    let _ = term.exit();

    match result? {
        Outcome::Quit => Ok(()),
        Outcome::Finished {
            state,
            elapsed_secs,
        } => after_game(state, elapsed_secs, &store),
    }
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game_loop: &mut GameLoop,
    view: &GameView,
    pointer: &SharedPointer,
    nav_rx: &Receiver<Screen>,
    scale: CellScale,
) -> Result<Outcome> {
    let slot = game_loop.slot().clone();
    let mut keys = KeyboardPointer::new();
    if term.key_releases() {
        // Releases are reported, so the timeout only guards against lost ones.
        keys = keys.with_key_release_timeout_ms(5_000);
    }
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut snap = WorldSnapshot::default();
    let mut seen = 0;
    let (cols, rows) = crossterm::terminal::size().unwrap_or((120, 30));
    let mut fb = FrameBuffer::new(cols, rows);
    let started = Instant::now();

    game_loop.start()?;
    info!("game started");

    loop {
        slot.take_latest(&mut seen, &mut snap);

        if let Ok(Screen::AfterGame) = nav_rx.try_recv() {
            info!("leaving finished game");
            return Ok(finished(&snap));
        }

        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint(&snap), snap.paused || snap.is_terminal()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((fb.width(), fb.height()));
            fb.resize(w, h);
            view.render_into(&snap, &mut fb, scale);
            term.draw_swap(&mut fb)?;
        }

        keys.update(pointer);
        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if should_quit(key) {
                        return Ok(Outcome::Quit);
                    }
                    keys.handle_key_press(key.code, view.layout(), pointer);
                }
                KeyEventKind::Release => keys.handle_key_release(key.code, pointer),
            },
            Event::Mouse(mouse) => {
                apply_mouse_event(&mouse, scale, pointer);
            }
            Event::Resize(..) => {
                term.invalidate();
                throttle.reset();
            }
            _ => {}
        }
    }
}

fn finished(snap: &WorldSnapshot) -> Outcome {
    Outcome::Finished {
        state: snap.state,
        elapsed_secs: snap.elapsed_secs,
    }
}

fn after_game(state: SessionState, elapsed_secs: f64, store: &JsonScoreStore) -> Result<()> {
    match state {
        SessionState::GameWon => println!("YOU WIN!  time {elapsed_secs:.1}s"),
        _ => println!("GAME OVER  time {elapsed_secs:.1}s"),
    }

    let best = match store.best(5) {
        Ok(best) => best,
        Err(e) => {
            warn!(error = %e, "could not read scores");
            return Ok(());
        }
    };
    if best.is_empty() {
        return Ok(());
    }
    println!();
    println!("Best times");
    for (rank, score) in best.iter().enumerate() {
        println!("{:>3}. {:>7.1}s  (run #{})", rank + 1, score.elapsed_time, score.id);
    }
    Ok(())
}
