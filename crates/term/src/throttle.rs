//! Redraw throttling for frames that are not changing.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: Option<u64>,
    last_fingerprint: u64,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: None,
            last_fingerprint: 0,
        }
    }

    /// Decide whether to draw a frame.
    ///
    /// - moving frames (`is_static = false`) always draw
    /// - static frames (paused or finished) draw on a visible change, otherwise
    ///   at most once per `min_static_interval_ms`
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let render = match self.last_render_ms {
            None => true,
            Some(_) if !is_static => true,
            Some(_) if fingerprint != self.last_fingerprint => true,
            Some(last) => now_ms.saturating_sub(last) >= self.min_static_interval_ms,
        };
        if render {
            self.last_render_ms = Some(now_ms);
            self.last_fingerprint = fingerprint;
        }
        render
    }

    /// Force the next call to draw.
    pub fn reset(&mut self) {
        self.last_render_ms = None;
    }
}
