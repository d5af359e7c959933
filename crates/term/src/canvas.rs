//! Drawing surface used by [`GameView`](crate::GameView).

use flummi_input::CellScale;

use crate::assets::{look, Look};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{AssetId, BoundingBox};

/// Something images can be drawn on. Coordinates are display pixels.
pub trait Canvas {
    /// Draw a whole image scaled into `rect`.
    fn draw(&mut self, image: AssetId, rect: BoundingBox);

    /// Draw one frame of a sprite sheet into `rect`.
    fn draw_frame(&mut self, image: AssetId, frame: u32, rect: BoundingBox);

    /// Draw a line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64);
}

const TEXT_STYLE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(20, 24, 48)).bold();

/// Rasterises pixel rectangles into terminal cells.
pub struct TermCanvas<'a> {
    fb: &'a mut FrameBuffer,
    scale: CellScale,
}

impl<'a> TermCanvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer, scale: CellScale) -> Self {
        Self { fb, scale }
    }

    /// Cell rectangle covered by `rect`; non-empty rects cover at least one cell.
    fn cells(&self, rect: BoundingBox) -> (i32, i32, i32, i32) {
        let cw = self.scale.px_per_col as f64;
        let ch = self.scale.px_per_row as f64;
        let x0 = (rect.left / cw).round() as i32;
        let y0 = (rect.top / ch).round() as i32;
        let x1 = ((rect.right / cw).round() as i32).max(x0 + 1);
        let y1 = ((rect.bottom / ch).round() as i32).max(y0 + 1);
        (x0, y0, x1 - x0, y1 - y0)
    }

    fn paint(&mut self, image: AssetId, frame: u32, rect: BoundingBox) {
        if rect.is_empty() {
            return;
        }
        let (x, y, w, h) = self.cells(rect);
        match look(image, frame) {
            Look::Fill(cell) => self.fb.fill_rect(x, y, w, h, cell),
            Look::Label(label, style) => {
                self.fb.fill_rect(x, y, w, h, style.cell(' '));
                let len = label.chars().count() as i32;
                self.fb.put_str(x + (w - len) / 2, y + h / 2, label, style);
            }
        }
    }
}

impl Canvas for TermCanvas<'_> {
    fn draw(&mut self, image: AssetId, rect: BoundingBox) {
        self.paint(image, 0, rect);
    }

    fn draw_frame(&mut self, image: AssetId, frame: u32, rect: BoundingBox) {
        self.paint(image, frame, rect);
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        let (col, row) = self.scale.px_to_cell(x, y);
        self.fb.put_str(col, row, text, TEXT_STYLE);
    }
}
