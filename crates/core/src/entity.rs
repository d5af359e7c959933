//! Placed objects.
//!
//! An entity is a sprite id, a floating-point top-left position and an integer
//! pixel size. The bounding box is always derived from position and size, so
//! there is no cached box that could fall out of sync.

use crate::types::{AssetId, BoundingBox};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub sprite: AssetId,
    x: f64,
    y: f64,
    width: u32,
    height: u32,
}

impl Entity {
    pub fn new(sprite: AssetId, x: f64, y: f64, width: u32, height: u32) -> Self {
        Self {
            sprite,
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Translate by `(dx, dy)`. No clamping; callers own the bounds.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// `[x, y, x + width, y + height]`.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_origin(self.x, self.y, self.width as f64, self.height as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_follows_position() {
        let mut e = Entity::new(AssetId::Player, 10.0, 20.0, 5, 7);
        assert_eq!(e.bounding_box(), BoundingBox::new(10.0, 20.0, 15.0, 27.0));

        e.move_by(-3.5, 1.0);
        assert_eq!(e.bounding_box(), BoundingBox::new(6.5, 21.0, 11.5, 28.0));

        e.set_position(0.0, 0.0);
        assert_eq!(e.bounding_box(), BoundingBox::new(0.0, 0.0, 5.0, 7.0));
    }

    #[test]
    fn move_by_does_not_clamp() {
        let mut e = Entity::new(AssetId::Enemy, 0.0, 0.0, 1, 1);
        e.move_by(-1000.0, 1e6);
        assert_eq!(e.position(), (-1000.0, 1e6));
    }
}
