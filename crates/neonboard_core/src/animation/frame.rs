//! Fixed-step frame cadence.

/// Frames replayed at most per `frames_until` call; older frames are dropped
/// the way a browser skips animation frames for a backgrounded tab.
pub const MAX_CATCH_UP_FRAMES: usize = 240;

/// Produces frame timestamps at a fixed period between clock readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLoop {
    frame_ms: u64,
    last_frame_ms: Option<u64>,
    frames: u64,
}

impl FrameLoop {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            frame_ms: frame_ms.max(1),
            last_frame_ms: None,
            frames: 0,
        }
    }

    /// Frame timestamps due up to `now_ms`, oldest first.
    ///
    /// The first call yields a single frame at `now_ms`.
    pub fn frames_until(&mut self, now_ms: u64) -> Vec<u64> {
        let Some(last) = self.last_frame_ms else {
            self.last_frame_ms = Some(now_ms);
            self.frames += 1;
            return vec![now_ms];
        };
        if now_ms < last.saturating_add(self.frame_ms) {
            return Vec::new();
        }

        let pending = (now_ms - last) / self.frame_ms;
        let skipped = pending.saturating_sub(MAX_CATCH_UP_FRAMES as u64);
        let first = last + (skipped + 1) * self.frame_ms;
        let frames: Vec<u64> = (0..pending - skipped)
            .map(|index| first + index * self.frame_ms)
            .collect();
        if let Some(&latest) = frames.last() {
            self.last_frame_ms = Some(latest);
        }
        self.frames += frames.len() as u64;
        frames
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    /// Frames produced so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
