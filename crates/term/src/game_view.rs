//! GameView: draws a [`WorldSnapshot`] onto a [`Canvas`].
//!
//! This module is pure (no I/O). Draw order, back to front:
//!
//! 1. background
//! 2. platforms
//! 3. player, enemies, goal
//! 4. scenery sprites (animated, drawn over the actors)
//! 5. buttons (play instead of pause while paused) and the timer
//! 6. result or pause banner

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use flummi_core::assets::{require, require_ui};
use flummi_core::{AssetError, AssetProvider, DrawItem, WorldSnapshot};
use flummi_input::{ButtonLayout, CellScale};

use crate::canvas::{Canvas, TermCanvas};
use crate::fb::{Cell, FrameBuffer};
use crate::types::{AssetId, Bitmap, BoundingBox, Button, DisplayMetrics, SessionState};

#[derive(Debug, Clone)]
pub struct GameView {
    layout: ButtonLayout,
    game_over: Bitmap,
    you_win: Bitmap,
    paused: Bitmap,
}

fn button_image(button: Button, paused: bool) -> AssetId {
    match button {
        Button::Left => AssetId::ButtonLeft,
        Button::Right => AssetId::ButtonRight,
        Button::Jump => AssetId::ButtonUp,
        Button::Pause if paused => AssetId::ButtonPlay,
        Button::Pause => AssetId::ButtonPause,
    }
}

impl GameView {
    /// Resolve button and banner sizes for a display of `metrics`.
    pub fn new(assets: &dyn AssetProvider, metrics: DisplayMetrics) -> Result<Self, AssetError> {
        require_ui(assets)?;
        let mut sizes = [(0, 0); Button::COUNT];
        for b in Button::ALL {
            let bitmap = require(assets, button_image(b, false))?;
            sizes[b.index()] = (bitmap.width, bitmap.height);
        }

        Ok(Self {
            layout: ButtonLayout::new(metrics, sizes),
            game_over: require(assets, AssetId::GameOver)?,
            you_win: require(assets, AssetId::YouWin)?,
            paused: require(assets, AssetId::Paused)?,
        })
    }

    /// Button geometry shared with input hit-testing.
    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    pub fn draw(&self, snap: &WorldSnapshot, canvas: &mut dyn Canvas) {
        let m = snap.metrics;
        canvas.draw(
            AssetId::Background,
            BoundingBox::from_origin(0.0, 0.0, m.width as f64, m.height as f64),
        );

        for p in &snap.platforms {
            draw_item(canvas, p);
        }
        draw_item(canvas, &snap.player);
        for e in &snap.enemies {
            draw_item(canvas, e);
        }
        draw_item(canvas, &snap.goal);
        for s in &snap.scenery {
            canvas.draw_frame(s.sprite, s.frame, s.bounding_box());
        }

        for b in Button::ALL {
            canvas.draw(button_image(b, snap.paused), self.layout.rect(b));
        }
        let pad = m.padding();
        canvas.draw_text(&format!("TIME {:.1}", snap.elapsed_secs), pad, pad);

        let banner = match snap.state {
            SessionState::GameOver => Some(self.game_over),
            SessionState::GameWon => Some(self.you_win),
            _ if snap.paused => Some(self.paused),
            _ => None,
        };
        if let Some(b) = banner {
            let x = (m.width as f64 - b.width as f64) / 2.0;
            let y = (m.height as f64 - b.height as f64) / 2.0;
            canvas.draw(b.id, BoundingBox::from_origin(x, y, b.width as f64, b.height as f64));
        }
    }

    /// Clear `fb` and draw `snap` into it.
    pub fn render_into(&self, snap: &WorldSnapshot, fb: &mut FrameBuffer, scale: CellScale) {
        fb.clear(Cell::default());
        let mut canvas = TermCanvas::new(fb, scale);
        self.draw(snap, &mut canvas);
    }
}

fn draw_item(canvas: &mut dyn Canvas, item: &DrawItem) {
    canvas.draw(item.sprite, item.bounding_box());
}

/// Hash of everything visible in `snap`, for skipping identical redraws.
pub fn fingerprint(snap: &WorldSnapshot) -> u64 {
    let mut h = DefaultHasher::new();
    snap.state.hash(&mut h);
    snap.paused.hash(&mut h);
    ((snap.elapsed_secs * 10.0) as u64).hash(&mut h);
    snap.scroll_offset.to_bits().hash(&mut h);
    snap.player.x.to_bits().hash(&mut h);
    snap.player.y.to_bits().hash(&mut h);
    for s in &snap.scenery {
        s.frame.hash(&mut h);
    }
    h.finish()
}
