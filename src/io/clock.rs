use std::time::Instant;

/// A free-running millisecond counter that wraps at `u32::MAX`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Signed distance from `earlier` to `now`, correct across counter wrap.
///
/// Differences are taken modulo 2^32 and reinterpreted as signed, so any
/// two readings less than ~24.8 days apart compare correctly.
#[inline]
pub fn ticks_diff(now: u32, earlier: u32) -> i32 {
    now.wrapping_sub(earlier) as i32
}

/// Millisecond counter backed by [`Instant`].
pub struct MonotonicClock {
    start: Instant,
    offset: u32,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Start the counter at `offset` instead of zero (useful for exercising
    /// wraparound without waiting 49 days).
    pub fn with_offset(offset: u32) -> Self {
        Self {
            start: Instant::now(),
            offset,
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u32 {
        let elapsed = self.start.elapsed().as_millis() as u64;
        // Truncation is the wrap
        self.offset.wrapping_add(elapsed as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_without_wrap() {
        assert_eq!(ticks_diff(1500, 1000), 500);
        assert_eq!(ticks_diff(1000, 1500), -500);
    }

    #[test]
    fn diff_across_wrap() {
        let before = u32::MAX - 99;
        let after = 200u32;
        assert_eq!(ticks_diff(after, before), 300);
        assert_eq!(ticks_diff(before, after), -300);
    }

    #[test]
    fn clock_offset_wraps() {
        let clock = MonotonicClock::with_offset(u32::MAX);
        let now = clock.now_ms();
        // Either still at MAX or already wrapped to a small value
        assert!(now == u32::MAX || now < 1_000);
        assert!(ticks_diff(now, u32::MAX) >= 0);
    }
}
