//! Atomic: time calculation utilities for transitions
//!
//! Pure functions over elapsed durations; callers own the clock.

use std::time::Duration;

/// Calculate transition progress (0.0 to 1.0) from elapsed time and duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]; a zero duration is already complete
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Elapsed time after subtracting a start delay, saturating at zero
#[inline]
pub fn after_delay(elapsed: Duration, delay: Duration) -> Duration {
    elapsed.saturating_sub(delay)
}

/// Linear interpolation between two values
///
/// Weighted form so `t = 0` and `t = 1` return the endpoints exactly.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

/// Shortest frame interval handed out; timers reject a zero period
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Frame interval for a target frame rate, falling back to ~60fps
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_secs_f64(1.0 / fps as f64).max(MIN_FRAME_INTERVAL)
    }
}
