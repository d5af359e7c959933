//! Per-tick conversion of the shared pointer record into an [`InputFrame`].

use crate::layout::ButtonLayout;
use crate::pointer::PointerState;
use crate::types::{Button, InputFrame};

/// Edge detector over successive [`PointerState`] reads.
///
/// A press is detected from the press counter, not from the `down` flag, so a
/// tap that starts and ends between two ticks still produces a press. Its
/// release is reported one tick later so the press gets at least one tick of
/// effect.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    last_presses: u32,
    was_down: bool,
    pending_release: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `state` without reporting anything that already happened.
    pub fn synced(state: PointerState) -> Self {
        Self {
            last_presses: state.presses,
            was_down: state.down,
            pending_release: false,
        }
    }

    pub fn poll(&mut self, state: PointerState, layout: &ButtonLayout) -> InputFrame {
        let mut frame = InputFrame::default();
        let (x, y) = state.position();

        if std::mem::take(&mut self.pending_release) {
            frame.release = true;
        }

        if state.presses != self.last_presses {
            self.last_presses = state.presses;
            frame.press = true;
            frame.pressed_button = layout.hit_test(x, y);
            if !state.down {
                self.pending_release = true;
            }
        } else if self.was_down && !state.down {
            frame.release = true;
        }

        if state.down {
            match layout.hit_test(x, y) {
                Some(Button::Left) => frame.left_held = true,
                Some(Button::Right) => frame.right_held = true,
                _ => {}
            }
        }

        self.was_down = state.down;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::SharedPointer;
    use crate::types::DisplayMetrics;

    fn layout() -> ButtonLayout {
        ButtonLayout::new(DisplayMetrics::new(2400, 1200, 0), [(200, 120); Button::COUNT])
    }

    #[test]
    fn press_is_an_edge_and_held_is_a_level() {
        let l = layout();
        let p = SharedPointer::new();
        let mut c = InputController::new();
        let (x, y) = l.center(Button::Right);

        p.press(x, y);
        let f = c.poll(p.load(), &l);
        assert!(f.press);
        assert_eq!(f.pressed_button, Some(Button::Right));
        assert!(f.right_held);

        let f = c.poll(p.load(), &l);
        assert!(!f.press);
        assert!(f.right_held);

        p.release();
        let f = c.poll(p.load(), &l);
        assert!(f.release);
        assert!(!f.right_held);

        let f = c.poll(p.load(), &l);
        assert_eq!(f, InputFrame::default());
    }

    #[test]
    fn tap_between_ticks_defers_release() {
        let l = layout();
        let p = SharedPointer::new();
        let mut c = InputController::new();
        let (x, y) = l.center(Button::Jump);

        p.press(x, y);
        p.release();

        let f = c.poll(p.load(), &l);
        assert!(f.press);
        assert!(!f.release);
        assert_eq!(f.pressed_button, Some(Button::Jump));

        let f = c.poll(p.load(), &l);
        assert!(f.release);
        assert!(!f.press);
    }

    #[test]
    fn dragging_off_a_button_stops_holding() {
        let l = layout();
        let p = SharedPointer::new();
        let mut c = InputController::new();
        let (x, y) = l.center(Button::Left);

        p.press(x, y);
        assert!(c.poll(p.load(), &l).left_held);

        p.move_to(10.0, 10.0);
        let f = c.poll(p.load(), &l);
        assert!(!f.left_held);
        assert!(!f.release);
    }

    #[test]
    fn synced_ignores_earlier_presses() {
        let l = layout();
        let p = SharedPointer::new();
        p.press(1.0, 1.0);
        p.release();

        let mut c = InputController::synced(p.load());
        assert_eq!(c.poll(p.load(), &l), InputFrame::default());
    }
}
