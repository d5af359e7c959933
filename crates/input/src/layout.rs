//! On-screen button geometry.
//!
//! Buttons are stored in a fixed array indexed by [`Button`], so there is no
//! name lookup that could miss. The same rectangles are used for hit-testing
//! and for drawing.

use crate::types::{BoundingBox, Button, DisplayMetrics, BUTTON_OFFSET, JUMP_BUTTON_X};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonLayout {
    rects: [BoundingBox; Button::COUNT],
}

impl ButtonLayout {
    /// Place the buttons for `metrics`; `sizes` is indexed by [`Button::index`].
    ///
    /// - left: `(width - 2 * offset, height - offset)`
    /// - right: `(width - offset, height - offset)`
    /// - jump: `(JUMP_BUTTON_X, height - offset)`
    /// - pause: `(width - offset, padding)`
    pub fn new(metrics: DisplayMetrics, sizes: [(u32, u32); Button::COUNT]) -> Self {
        let w = metrics.width as f64;
        let h = metrics.height as f64;
        let origin = |b: Button| match b {
            Button::Left => (w - 2.0 * BUTTON_OFFSET, h - BUTTON_OFFSET),
            Button::Right => (w - BUTTON_OFFSET, h - BUTTON_OFFSET),
            Button::Jump => (JUMP_BUTTON_X, h - BUTTON_OFFSET),
            Button::Pause => (w - BUTTON_OFFSET, metrics.padding()),
        };

        let rects = Button::ALL.map(|b| {
            let (x, y) = origin(b);
            let (bw, bh) = sizes[b.index()];
            BoundingBox::from_origin(x, y, bw as f64, bh as f64)
        });
        Self { rects }
    }

    pub fn rect(&self, button: Button) -> BoundingBox {
        self.rects[button.index()]
    }

    pub fn center(&self, button: Button) -> (f64, f64) {
        self.rect(button).center()
    }

    /// First button whose `[x, x + w) x [y, y + h)` region contains the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Button> {
        Button::ALL
            .into_iter()
            .find(|b| self.rects[b.index()].contains(x, y))
    }
}
