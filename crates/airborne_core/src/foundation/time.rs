//! Frame time management

use std::time::Instant;

/// High-precision timer for frame timing
///
/// One [`Timer::update`] per display refresh. After the simulation has been
/// paused, call [`Timer::resume`] so the first frame back reports a delta of
/// exactly zero instead of the whole pause gap.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    resume_pending: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            resume_pending: false,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = if self.resume_pending {
            self.resume_pending = false;
            0.0
        } else {
            now.duration_since(self.last_frame).as_secs_f32()
        };
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Re-base the clock after a pause; the next delta reads as zero
    pub fn resume(&mut self) {
        self.last_frame = Instant::now();
        self.resume_pending = true;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time accumulated over updates
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}
