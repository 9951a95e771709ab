use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    channel::{history::History, timing::SegmentClock},
    config::ModuleConfig,
    dsp::{
        lfo::{frequency_from_percent, scale_to_window, unipolar_to_bipolar},
        BezierCurve, ClipMode,
    },
    io::{ContinuousInput, NullSink, VoltageSink},
    DISPLAY_WIDTH,
};

/*
Curve Channel
=============

One output jack's worth of random CV. Every tick:

    now_ms ──→ SegmentClock ──→ phase t ──┐
                   │                      ▼
              rolled over?          BezierCurve.evaluate(t, k)
                   │                      │
                   ▼                      ▼
          draw new target           scale into [min_v, max_v]
                                          │
                                          ▼
                                   ClipMode.apply ──→ sink, history

The frequency and shape knobs are read fresh each tick and are not owned
here; smoothing (if any) belongs to whatever implements ContinuousInput.

Targets are drawn uniformly from [target_low, target_high] of the module
config. The default range (-0.1..1.1) overshoots the voltage window a
little, so the clip mode has something to act on.
*/

/// A randomly wandering, shape-controlled CV output.
pub struct CurveChannel<O = NullSink, R = StdRng> {
    curve: BezierCurve,
    clock: SegmentClock,
    config: ModuleConfig,
    clip_mode: ClipMode,
    frequency: f32,
    curve_k: f32,
    last_output: f32,
    history: History,
    output: O,
    rng: R,
}

impl<O: VoltageSink> CurveChannel<O, StdRng> {
    /// Channel seeded from OS entropy.
    pub fn new(config: ModuleConfig, output: O, now_ms: u32) -> Self {
        Self::with_rng(config, output, StdRng::from_entropy(), now_ms)
    }
}

impl<O: VoltageSink, R: Rng> CurveChannel<O, R> {
    /// Channel with an explicit random source (seeded RNGs make runs
    /// reproducible).
    pub fn with_rng(config: ModuleConfig, output: O, rng: R, now_ms: u32) -> Self {
        let config = config.clamped();
        let mut channel = Self {
            curve: BezierCurve::new(),
            clock: SegmentClock::new(now_ms),
            config,
            clip_mode: ClipMode::default(),
            frequency: config.min_frequency,
            curve_k: 0.0,
            last_output: config.min_voltage,
            history: History::new(DISPLAY_WIDTH),
            output,
            rng,
        };
        channel.change_target();
        channel
    }

    /// Display history of `width` samples.
    pub fn with_history_width(mut self, width: usize) -> Self {
        self.history = History::with_interval(width, self.history.interval_ms());
        self
    }

    /// Record at most one display sample per `interval_ms`.
    pub fn with_history_interval(mut self, interval_ms: u32) -> Self {
        self.history = History::with_interval(self.history.width(), interval_ms);
        self
    }

    /// Read both knobs and advance one tick. Returns the output voltage.
    pub fn update<F, K>(&mut self, now_ms: u32, frequency_in: &mut F, curve_in: &mut K) -> f32
    where
        F: ContinuousInput + ?Sized,
        K: ContinuousInput + ?Sized,
    {
        let frequency = frequency_from_percent(
            frequency_in.read_percent(),
            self.config.min_frequency,
            self.config.max_frequency,
        );
        let k = unipolar_to_bipolar(curve_in.read_percent());
        self.tick(now_ms, frequency, k)
    }

    /// Advance one tick at an explicit rate (Hz, > 0) and shape (-1..=1).
    pub fn tick(&mut self, now_ms: u32, frequency_hz: f32, k: f32) -> f32 {
        self.frequency = frequency_hz;
        self.curve_k = k;

        let phase = self.clock.advance(now_ms, frequency_hz);
        if phase.rolled_over {
            self.change_target();
        }

        let level = self.curve.evaluate(phase.t, k);
        let ModuleConfig {
            min_voltage,
            max_voltage,
            ..
        } = self.config;
        let volts = self
            .clip_mode
            .apply(scale_to_window(level, min_voltage, max_voltage), min_voltage, max_voltage);

        self.last_output = volts;
        self.output.write_voltage(volts);
        self.history.record(now_ms, volts, min_voltage, max_voltage);
        volts
    }

    fn change_target(&mut self) {
        let target = self
            .rng
            .gen_range(self.config.target_low..=self.config.target_high);
        self.curve.set_next_target(target);
    }

    /// Takes effect on the next tick.
    pub fn set_clip_mode(&mut self, mode: ClipMode) {
        self.clip_mode = mode;
    }

    pub fn clip_mode(&self) -> ClipMode {
        self.clip_mode
    }

    /// Rate used on the last tick, Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Shape used on the last tick.
    pub fn curve_k(&self) -> f32 {
        self.curve_k
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn curve(&self) -> &BezierCurve {
        &self.curve
    }

    pub fn segment_start(&self) -> u32 {
        self.clock.segment_start()
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
