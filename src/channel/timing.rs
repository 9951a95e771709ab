use crate::{dsp::lfo::period_ms_from_frequency, io::ticks_diff};

/// Where a channel is inside its current segment after a clock advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    /// Normalized position in the segment, 0.0..=1.0
    pub t: f32,
    /// A new segment started on this tick
    pub rolled_over: bool,
}

/// Segment timing against a wrapping millisecond counter.
///
/// Segment length is recomputed from the rate on every tick, so turning
/// the rate knob stretches or shrinks the segment in flight.
#[derive(Debug, Clone, Copy)]
pub struct SegmentClock {
    segment_start: u32,
}

impl SegmentClock {
    pub fn new(now_ms: u32) -> Self {
        Self {
            segment_start: now_ms,
        }
    }

    /// Advance to `now_ms` at `frequency_hz` (must be > 0).
    ///
    /// When the elapsed time reaches the segment length the segment rolls
    /// over: the start moves to `now_ms` and the phase for this tick is 0.0.
    pub fn advance(&mut self, now_ms: u32, frequency_hz: f32) -> Phase {
        let duration_ms = period_ms_from_frequency(frequency_hz);
        let elapsed_ms = ticks_diff(now_ms, self.segment_start) as f32;

        if elapsed_ms >= duration_ms {
            log::trace!("segment rollover at {now_ms} ms after {elapsed_ms} ms");
            self.segment_start = now_ms;
            return Phase {
                t: 0.0,
                rolled_over: true,
            };
        }

        Phase {
            t: (elapsed_ms / duration_ms).clamp(0.0, 1.0),
            rolled_over: false,
        }
    }

    pub fn segment_start(&self) -> u32 {
        self.segment_start
    }
}
