use std::collections::VecDeque;

use crate::{io::ticks_diff, DISPLAY_HEIGHT};

/// Rows of display a full-scale sample spans.
pub const HISTORY_ROWS: usize = DISPLAY_HEIGHT / 3;

/// Capped FIFO of quantized output samples for the display.
///
/// Capacity is fixed at construction; pushing into a full history evicts
/// the oldest sample. The buffer never reallocates after `new`.
///
/// With a non-zero interval, [`record`](Self::record) down-samples: at most
/// one sample is kept per `interval_ms`, so a narrow display can still show
/// whole segments of a slow curve.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<i32>,
    width: usize,
    interval_ms: u32,
    last_record: Option<u32>,
}

impl History {
    /// Keep one sample per tick.
    pub fn new(width: usize) -> Self {
        Self::with_interval(width, 0)
    }

    /// Keep at most one sample per `interval_ms`.
    pub fn with_interval(width: usize, interval_ms: u32) -> Self {
        let width = width.max(1);
        Self {
            samples: VecDeque::with_capacity(width),
            width,
            interval_ms,
            last_record: None,
        }
    }

    pub fn push(&mut self, sample: i32) {
        if self.samples.len() == self.width {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Quantize `volts` against `[min, max]` and push it, unless a sample
    /// was already taken less than `interval_ms` before `now_ms`.
    pub fn record(&mut self, now_ms: u32, volts: f32, min: f32, max: f32) {
        if let Some(last) = self.last_record {
            if ticks_diff(now_ms, last) < self.interval_ms as i32 {
                return;
            }
        }
        self.last_record = Some(now_ms);
        self.push(quantize(volts, min, max));
    }

    /// Samples, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i32> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_record = None;
    }
}

/// Display row for a voltage: 0 at `min`, [`HISTORY_ROWS`] at `max`.
/// Truncates toward zero; values outside the window land outside
/// `0..=HISTORY_ROWS` and are left for the display to clip.
#[inline]
pub fn quantize(volts: f32, min: f32, max: f32) -> i32 {
    let span = max - min;
    if span <= 0.0 {
        return 0;
    }
    ((volts - min) / span * HISTORY_ROWS as f32) as i32
}
