//! Latest-frame handoff between the loop thread and the renderer.
//!
//! The slot holds one [`WorldSnapshot`]. Publishing and taking both swap
//! buffers with the caller, so after warm-up no frame allocates. Frames the
//! reader never picked up are simply overwritten.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use flummi_core::WorldSnapshot;

#[derive(Debug, Default)]
struct Latest {
    snapshot: WorldSnapshot,
    frame_id: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FrameSlot {
    inner: Arc<Mutex<Latest>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Latest> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `snapshot` as the latest frame. `snapshot` receives the previous
    /// buffer for reuse. Returns the new frame id.
    pub fn publish(&self, snapshot: &mut WorldSnapshot) -> u64 {
        let mut latest = self.lock();
        std::mem::swap(&mut latest.snapshot, snapshot);
        latest.frame_id += 1;
        latest.frame_id
    }

    /// Swap the latest frame into `out` if it is newer than `seen`, updating
    /// `seen`. Returns `false` when there is nothing new.
    pub fn take_latest(&self, seen: &mut u64, out: &mut WorldSnapshot) -> bool {
        let mut latest = self.lock();
        if latest.frame_id == *seen {
            return false;
        }
        std::mem::swap(&mut latest.snapshot, out);
        *seen = latest.frame_id;
        true
    }

    pub fn frame_id(&self) -> u64 {
        self.lock().frame_id
    }
}
