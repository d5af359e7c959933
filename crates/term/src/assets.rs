//! Built-in images: sizes for layout and glyph art for the terminal.

use flummi_core::types::{AssetId, Bitmap};
use flummi_core::{AssetError, AssetProvider};

use crate::fb::{Cell, CellStyle, Rgb};

/// Pixel size of every built-in image.
pub fn builtin_bitmap(id: AssetId) -> Bitmap {
    match id {
        AssetId::Background => Bitmap::new(id, 2400, 1200),
        AssetId::Player => Bitmap::new(id, 100, 120),
        AssetId::Enemy => Bitmap::new(id, 100, 100),
        AssetId::Goal => Bitmap::new(id, 150, 200),
        AssetId::Platform => Bitmap::new(id, 600, 60),
        AssetId::Fire => Bitmap::sheet(id, 400, 120, 4),
        AssetId::ButtonLeft
        | AssetId::ButtonRight
        | AssetId::ButtonUp
        | AssetId::ButtonPause
        | AssetId::ButtonPlay => Bitmap::new(id, 200, 120),
        AssetId::GameOver | AssetId::YouWin | AssetId::Paused => Bitmap::new(id, 800, 200),
    }
}

/// Asset provider backed by the built-in table.
///
/// Individual images can be withheld to exercise missing-asset handling.
#[derive(Debug, Clone, Default)]
pub struct BuiltinAssets {
    withheld: Vec<AssetId>,
}

impl BuiltinAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without(mut self, id: AssetId) -> Self {
        self.withheld.push(id);
        self
    }
}

impl AssetProvider for BuiltinAssets {
    fn load_image(&self, id: AssetId) -> Result<Bitmap, AssetError> {
        if self.withheld.contains(&id) {
            return Err(AssetError::Missing(id));
        }
        Ok(builtin_bitmap(id))
    }
}

/// How an image is rendered in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Look {
    Fill(Cell),
    /// Filled background with a centred label.
    Label(&'static str, CellStyle),
}

const SKY: Rgb = Rgb::new(20, 24, 48);
const FIRE_FRAMES: [char; 4] = ['^', '*', '\'', '*'];

fn fill(ch: char, fg: Rgb) -> Look {
    Look::Fill(CellStyle::new(fg, SKY).cell(ch))
}

fn button(label: &'static str) -> Look {
    Look::Label(label, CellStyle::new(Rgb::new(240, 240, 240), Rgb::new(70, 70, 100)).bold())
}

fn banner(label: &'static str, bg: Rgb) -> Look {
    Look::Label(label, CellStyle::new(Rgb::new(255, 255, 255), bg).bold())
}

pub fn look(id: AssetId, frame: u32) -> Look {
    match id {
        AssetId::Background => fill(' ', SKY),
        AssetId::Player => fill('█', Rgb::new(250, 200, 60)),
        AssetId::Enemy => fill('▓', Rgb::new(220, 60, 60)),
        AssetId::Goal => fill('▒', Rgb::new(80, 220, 120)),
        AssetId::Platform => fill('▀', Rgb::new(150, 105, 60)),
        AssetId::Fire => fill(
            FIRE_FRAMES[frame as usize % FIRE_FRAMES.len()],
            Rgb::new(255, 140, 0),
        ),
        AssetId::ButtonLeft => button("<"),
        AssetId::ButtonRight => button(">"),
        AssetId::ButtonUp => button("JUMP"),
        AssetId::ButtonPause => button("||"),
        AssetId::ButtonPlay => button("|>"),
        AssetId::GameOver => banner("GAME OVER", Rgb::new(120, 20, 20)),
        AssetId::YouWin => banner("YOU WIN!", Rgb::new(20, 110, 40)),
        AssetId::Paused => banner("PAUSED", Rgb::new(60, 60, 60)),
    }
}
