//! Mapping from terminal events to pointer updates.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::pointer::SharedPointer;
use crate::types::DisplayMetrics;

/// Size of one terminal cell in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub px_per_col: u32,
    pub px_per_row: u32,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            px_per_col: 20,
            px_per_row: 40,
        }
    }
}

impl CellScale {
    /// Centre of the cell at `(col, row)` in pixels.
    pub fn cell_to_px(&self, col: u16, row: u16) -> (f64, f64) {
        (
            col as f64 * self.px_per_col as f64 + self.px_per_col as f64 / 2.0,
            row as f64 * self.px_per_row as f64 + self.px_per_row as f64 / 2.0,
        )
    }

    /// Cell containing pixel `(x, y)`; may be negative or off-screen.
    pub fn px_to_cell(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.px_per_col as f64).floor() as i32,
            (y / self.px_per_row as f64).floor() as i32,
        )
    }

    /// Display metrics for a terminal of `cols` x `rows` cells.
    pub fn metrics(&self, cols: u16, rows: u16) -> DisplayMetrics {
        DisplayMetrics::new(
            cols as u32 * self.px_per_col,
            rows as u32 * self.px_per_row,
            0,
        )
    }
}

/// Feed a crossterm mouse event into the pointer. Only the left button counts.
/// Returns whether the event changed anything.
pub fn apply_mouse_event(event: &MouseEvent, scale: CellScale, pointer: &SharedPointer) -> bool {
    let (x, y) = scale.cell_to_px(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            pointer.press(x, y);
            true
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            pointer.move_to(x, y);
            true
        }
        MouseEventKind::Up(MouseButton::Left) => {
            pointer.release();
            true
        }
        _ => false,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('p'))));
    }

    #[test]
    fn mouse_down_drag_up() {
        let p = SharedPointer::new();
        let s = CellScale::default();

        assert!(apply_mouse_event(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 2), s, &p));
        let st = p.load();
        assert_eq!((st.x, st.y, st.down), (70, 100, true));

        apply_mouse_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 4, 2), s, &p);
        assert_eq!(p.load().x, 90);
        assert!(p.load().down);

        apply_mouse_event(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 2), s, &p);
        assert!(!p.load().down);
        assert_eq!(p.load().presses, 1);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let p = SharedPointer::new();
        let s = CellScale::default();
        assert!(!apply_mouse_event(&mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), s, &p));
        assert!(!apply_mouse_event(&mouse(MouseEventKind::Moved, 1, 1), s, &p));
        assert_eq!(p.load(), Default::default());
    }

    #[test]
    fn metrics_scale_with_cells() {
        let m = CellScale::default().metrics(120, 30);
        assert_eq!((m.width, m.height), (2400, 1200));
        assert_eq!(CellScale::default().px_to_cell(45.0, -1.0), (2, -1));
    }
}
