//! Random step (sample & hold) channel.
//!
//! Holds a voltage for one segment, then jumps to a new uniformly random
//! voltage in the module's window. Shares the segment timing of the curve
//! channel; the first jump happens one full segment after start.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    channel::{history::History, timing::SegmentClock},
    config::ModuleConfig,
    dsp::lfo::frequency_from_percent,
    io::{ContinuousInput, NullSink, VoltageSink},
    DISPLAY_WIDTH,
};

pub struct StepChannel<O = NullSink, R = StdRng> {
    clock: SegmentClock,
    config: ModuleConfig,
    frequency: f32,
    held: f32,
    history: History,
    output: O,
    rng: R,
}

impl<O: VoltageSink> StepChannel<O, StdRng> {
    pub fn new(config: ModuleConfig, output: O, now_ms: u32) -> Self {
        Self::with_rng(config, output, StdRng::from_entropy(), now_ms)
    }
}

impl<O: VoltageSink, R: Rng> StepChannel<O, R> {
    pub fn with_rng(config: ModuleConfig, output: O, rng: R, now_ms: u32) -> Self {
        let config = config.clamped();
        Self {
            clock: SegmentClock::new(now_ms),
            config,
            frequency: config.min_frequency,
            held: config.min_voltage,
            history: History::new(DISPLAY_WIDTH),
            output,
            rng,
        }
    }

    pub fn with_history_width(mut self, width: usize) -> Self {
        self.history = History::with_interval(width, self.history.interval_ms());
        self
    }

    /// Record at most one display sample per `interval_ms`.
    pub fn with_history_interval(mut self, interval_ms: u32) -> Self {
        self.history = History::with_interval(self.history.width(), interval_ms);
        self
    }

    pub fn update<F>(&mut self, now_ms: u32, frequency_in: &mut F) -> f32
    where
        F: ContinuousInput + ?Sized,
    {
        let frequency = frequency_from_percent(
            frequency_in.read_percent(),
            self.config.min_frequency,
            self.config.max_frequency,
        );
        self.tick(now_ms, frequency)
    }

    pub fn tick(&mut self, now_ms: u32, frequency_hz: f32) -> f32 {
        self.frequency = frequency_hz;
        if self.clock.advance(now_ms, frequency_hz).rolled_over {
            self.held = self
                .rng
                .gen_range(self.config.min_voltage..=self.config.max_voltage);
        }
        self.output.write_voltage(self.held);
        self.history
            .record(now_ms, self.held, self.config.min_voltage, self.config.max_voltage);
        self.held
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn last_output(&self) -> f32 {
        self.held
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
