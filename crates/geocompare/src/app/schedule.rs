//! Frame coalescing: many mutations, at most one redraw per tick.

/// Dirty flag plus a "callback already requested" latch.
///
/// The host asks for a frame callback only when `invalidate` returns true and
/// renders only when `begin_frame` returns true.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameScheduler {
    dirty: bool,
    requested: bool,
}

impl FrameScheduler {
    /// Mark the scene stale. True only for the first call since the last frame.
    pub fn invalidate(&mut self) -> bool {
        self.dirty = true;
        !std::mem::replace(&mut self.requested, true)
    }

    /// Frame callback entry point; consumes the dirty flag.
    pub fn begin_frame(&mut self) -> bool {
        self.requested = false;
        std::mem::take(&mut self.dirty)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
