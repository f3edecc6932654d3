use std::collections::VecDeque;
use std::time::Duration;

/// Per-frame delta time from a monotonically increasing host clock.
///
/// The first frame measures from time 0, matching a host clock that starts
/// at 0 when the window opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    last_frame: f64,
    delta: f32,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `time` (seconds) and return the delta since the previous frame.
    ///
    /// A clock that steps backwards yields a zero delta instead of a negative one.
    pub fn tick(&mut self, time: f64) -> f32 {
        let delta = (time - self.last_frame) as f32;
        if delta < 0.0 {
            tracing::warn!(time, last = self.last_frame, "frame clock went backwards");
        }
        self.delta = delta.max(0.0);
        self.last_frame = time;
        self.frame += 1;
        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Number of ticks so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_frame_time(&self) -> f64 {
        self.last_frame
    }
}

/// Rolling window of recent frame durations for instrumentation.
///
/// Arithmetic saturates, so a stalled frame of any length is recorded as a
/// long frame rather than overflowing.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    window: VecDeque<Duration>,
    capacity: usize,
}

impl FrameTimer {
    /// Keep the last `capacity` frames (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a frame duration, evicting the oldest once the window is full.
    pub fn record(&mut self, dt: Duration) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(dt);
    }

    /// Record a delta in seconds. Negative or NaN values count as zero;
    /// values too large for a `Duration` saturate at `Duration::MAX`.
    pub fn record_secs(&mut self, dt: f32) {
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        self.record(Duration::try_from_secs_f32(dt).unwrap_or(Duration::MAX));
    }

    pub fn count(&self) -> usize {
        self.window.len()
    }

    pub fn average(&self) -> Duration {
        let count = self.window.len() as u32;
        if count == 0 {
            return Duration::ZERO;
        }
        let total = self
            .window
            .iter()
            .fold(Duration::ZERO, |acc, dt| acc.saturating_add(*dt));
        total / count
    }

    pub fn max(&self) -> Duration {
        self.window.iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.window.iter().copied().min().unwrap_or_default()
    }

    /// Frames per second over the window, 0 when nothing was recorded.
    pub fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_measures_first_frame_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(0.5), 0.5);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn clock_deltas_between_frames() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        let dt = clock.tick(1.25);
        assert!((dt - 0.25).abs() < 1e-6);
        assert_eq!(clock.delta(), dt);
        assert_eq!(clock.last_frame_time(), 1.25);
    }

    #[test]
    fn clock_never_goes_negative() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        assert_eq!(clock.tick(1.0), 0.0);
        assert_eq!(clock.last_frame_time(), 1.0);
    }

    #[test]
    fn timer_summarizes_window() {
        let mut timer = FrameTimer::new(4);
        for ms in [16, 17, 15, 16] {
            timer.record(Duration::from_millis(ms));
        }
        assert_eq!(timer.count(), 4);
        assert_eq!(timer.average(), Duration::from_millis(16));
        assert_eq!(timer.min(), Duration::from_millis(15));
        assert_eq!(timer.max(), Duration::from_millis(17));
        assert!((timer.fps() - 62.5).abs() < 1e-3);
    }

    #[test]
    fn timer_evicts_oldest_frame() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::from_millis(100));
        timer.record(Duration::from_millis(20));
        timer.record(Duration::from_millis(40));
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.max(), Duration::from_millis(40));
        assert_eq!(timer.average(), Duration::from_millis(30));
    }

    #[test]
    fn stalled_frames_saturate() {
        let mut timer = FrameTimer::new(8);
        timer.record_secs(1.0e20);
        timer.record_secs(f32::INFINITY);
        timer.record_secs(1.0e19);
        assert_eq!(timer.max(), Duration::MAX);
        assert!(timer.average() > Duration::from_secs(u64::MAX / 4));
        assert!(timer.fps() >= 0.0);
    }

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new(0);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn record_secs_ignores_garbage() {
        let mut timer = FrameTimer::new(4);
        timer.record_secs(f32::NAN);
        timer.record_secs(-1.0);
        assert_eq!(timer.max(), Duration::ZERO);
    }
}
