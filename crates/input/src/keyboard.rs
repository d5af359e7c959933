//! Keyboard fallback: keys act as presses on the on-screen buttons.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::layout::ButtonLayout;
use crate::pointer::SharedPointer;
use crate::types::Button;

// Long enough to bridge the typical auto-repeat delay, so holding a key does
// not turn into a stream of separate presses on terminals without releases.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 600;

pub fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => {
            Some(Button::Jump)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Button::Pause),
        _ => None,
    }
}

/// Drives a [`SharedPointer`] from key presses by pressing at button centres.
#[derive(Debug, Clone)]
pub struct KeyboardPointer {
    held: Option<Button>,
    last_key_time: Instant,
    key_release_timeout: Duration,
}

impl Default for KeyboardPointer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardPointer {
    pub fn new() -> Self {
        Self {
            held: None,
            last_key_time: Instant::now(),
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn held(&self) -> Option<Button> {
        self.held
    }

    /// Returns the button the key maps to, if any. Repeats of the held key
    /// only refresh the release timer.
    pub fn handle_key_press(
        &mut self,
        code: KeyCode,
        layout: &ButtonLayout,
        pointer: &SharedPointer,
    ) -> Option<Button> {
        self.handle_key_press_at(code, layout, pointer, Instant::now())
    }

    pub fn handle_key_press_at(
        &mut self,
        code: KeyCode,
        layout: &ButtonLayout,
        pointer: &SharedPointer,
        now: Instant,
    ) -> Option<Button> {
        let button = button_for_key(code)?;
        self.last_key_time = now;
        if self.held != Some(button) {
            let (x, y) = layout.center(button);
            pointer.press(x, y);
            self.held = Some(button);
        }
        Some(button)
    }

    pub fn handle_key_release(&mut self, code: KeyCode, pointer: &SharedPointer) {
        if self.held.is_some() && button_for_key(code) == self.held {
            self.held = None;
            pointer.release();
        }
    }

    /// Auto-release when the terminal does not emit release events.
    pub fn update(&mut self, pointer: &SharedPointer) {
        self.update_at(pointer, Instant::now());
    }

    pub fn update_at(&mut self, pointer: &SharedPointer, now: Instant) {
        if self.held.is_some()
            && now.saturating_duration_since(self.last_key_time) > self.key_release_timeout
        {
            self.held = None;
            pointer.release();
        }
    }
}
