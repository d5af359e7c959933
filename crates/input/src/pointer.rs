//! Last known pointer state, shared between the event source and the loop.
//!
//! Only the latest value matters, so the whole record is packed into one
//! `AtomicU64` and replaced atomically; there is no queue and no lock.
//!
//! Layout (low to high bits): `x: i16`, `y: i16`, `down: 1 bit`,
//! `presses: 31 bits`. `presses` counts pointer-down transitions (wrapping)
//! so the reader can detect a press that was already released again before
//! it looked.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const PRESS_MASK: u32 = (1 << 31) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    pub x: i16,
    pub y: i16,
    pub down: bool,
    pub presses: u32,
}

impl PointerState {
    pub fn position(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }

    fn pack(&self) -> u64 {
        (self.x as u16 as u64)
            | ((self.y as u16 as u64) << 16)
            | ((self.down as u64) << 32)
            | (((self.presses & PRESS_MASK) as u64) << 33)
    }

    fn unpack(bits: u64) -> Self {
        Self {
            x: (bits & 0xffff) as u16 as i16,
            y: ((bits >> 16) & 0xffff) as u16 as i16,
            down: (bits >> 32) & 1 == 1,
            presses: ((bits >> 33) as u32) & PRESS_MASK,
        }
    }
}

fn coord(v: f64) -> i16 {
    v.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

#[derive(Debug, Clone, Default)]
pub struct SharedPointer {
    bits: Arc<AtomicU64>,
}

impl SharedPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> PointerState {
        PointerState::unpack(self.bits.load(Ordering::Acquire))
    }

    /// Pointer went down at `(x, y)`.
    pub fn press(&self, x: f64, y: f64) {
        self.modify(|s| {
            s.x = coord(x);
            s.y = coord(y);
            s.down = true;
            s.presses = s.presses.wrapping_add(1) & PRESS_MASK;
        });
    }

    /// Pointer moved while down (or hovered); keeps the pressed flag.
    pub fn move_to(&self, x: f64, y: f64) {
        self.modify(|s| {
            s.x = coord(x);
            s.y = coord(y);
        });
    }

    pub fn release(&self) {
        self.modify(|s| s.down = false);
    }

    fn modify(&self, f: impl Fn(&mut PointerState)) {
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                let mut s = PointerState::unpack(bits);
                f(&mut s);
                Some(s.pack())
            });
    }
}
