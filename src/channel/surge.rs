//! Ocean-surge wave channel.
//!
//! A buoy bobbing on a single travelling wave: a cosine whose amplitude is
//! set by `agitation`, whose wavelength is set by `swell`, and whose phase
//! offset depends on where the buoy sits (`spread`). Strong agitation drives
//! the wave past ±1, where it flattens against the clip.
//!
//! The phase moves a fixed `rate * PHASE_STEP` per tick rather than per
//! millisecond, so the wave speed follows the loop's tick interval.

use std::f32::consts::TAU;

use crate::{
    channel::history::History,
    config::ModuleConfig,
    dsp::lfo::{bipolar_to_unipolar, frequency_from_percent, scale_to_window},
    io::{ContinuousInput, NullSink, VoltageSink},
    DISPLAY_WIDTH,
};

/// Phase advance per tick at 1 Hz.
pub const PHASE_STEP: f32 = 0.01;

const MIN_RADIUS: f32 = 0.01;
const MAX_RADIUS: f32 = 2.0;
const MIN_WAVELENGTH: f32 = 1.0;
const MAX_WAVELENGTH: f32 = 20.0;
const MAX_BUOY_SPREAD: f32 = 10.0;

/// Sea state for one surge output. Every field is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurgeParams {
    pub swell: f32,
    pub agitation: f32,
    pub spread: f32,
}

impl SurgeParams {
    /// Calm sea: small amplitude, short waves.
    pub const LOW: Self = Self {
        swell: 0.2,
        agitation: 0.2,
        spread: 0.5,
    };
    /// Rough sea: amplitude past the clip, long waves.
    pub const HIGH: Self = Self {
        swell: 0.8,
        agitation: 0.8,
        spread: 0.5,
    };

    pub fn radius(&self) -> f32 {
        rescale(self.agitation, MIN_RADIUS, MAX_RADIUS)
    }

    pub fn wavelength(&self) -> f32 {
        rescale(self.swell, MIN_WAVELENGTH, MAX_WAVELENGTH)
    }

    /// Phase lag of the buoy relative to the wave origin, radians.
    pub fn buoy_offset(&self) -> f32 {
        TAU * MAX_BUOY_SPREAD * self.spread / self.wavelength()
    }
}

#[inline]
fn rescale(x: f32, lo: f32, hi: f32) -> f32 {
    x * (hi - lo) + lo
}

/// Wave height at `phase`, clipped to `-1.0..=1.0`.
#[inline]
pub fn wave_level(params: &SurgeParams, phase: f32) -> f32 {
    (params.radius() * (phase - params.buoy_offset()).cos()).clamp(-1.0, 1.0)
}

pub struct OceanSurge<O = NullSink> {
    params: SurgeParams,
    config: ModuleConfig,
    phase: f32,
    frequency: f32,
    last_output: f32,
    history: History,
    output: O,
}

impl<O: VoltageSink> OceanSurge<O> {
    pub fn new(config: ModuleConfig, params: SurgeParams, output: O) -> Self {
        let config = config.clamped();
        Self {
            params,
            config,
            phase: 0.0,
            frequency: config.min_frequency,
            last_output: config.min_voltage,
            history: History::new(DISPLAY_WIDTH),
            output,
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

    pub fn update<F>(&mut self, now_ms: u32, rate_in: &mut F) -> f32
    where
        F: ContinuousInput + ?Sized,
    {
        let rate = frequency_from_percent(
            rate_in.read_percent(),
            self.config.min_frequency,
            self.config.max_frequency,
        );
        self.tick(now_ms, rate)
    }

    /// Advance the wave one step at `rate` and write the buoy height.
    pub fn tick(&mut self, now_ms: u32, rate: f32) -> f32 {
        self.frequency = rate;
        self.phase += rate * PHASE_STEP;
        if self.phase > TAU {
            self.phase = self.phase.rem_euclid(TAU);
        }

        let ModuleConfig {
            min_voltage,
            max_voltage,
            ..
        } = self.config;
        let level = bipolar_to_unipolar(wave_level(&self.params, self.phase));
        let volts = scale_to_window(level, min_voltage, max_voltage);

        self.last_output = volts;
        self.output.write_voltage(volts);
        self.history.record(now_ms, volts, min_voltage, max_voltage);
        volts
    }

    pub fn params(&self) -> &SurgeParams {
        &self.params
    }

    /// Wave phase, radians in `0.0..=TAU`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Recorder;

    fn surge(params: SurgeParams) -> OceanSurge<Recorder> {
        OceanSurge::new(ModuleConfig::multi(), params, Recorder::default())
    }

    fn swing(ch: &mut OceanSurge<Recorder>, rate: f32) -> (f32, f32) {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        // Several full turns of the wave
        for now in 0..5_000u32 {
            let v = ch.tick(now, rate);
            lo = lo.min(v);
            hi = hi.max(v);
        }
        (lo, hi)
    }

    #[test]
    fn sea_states_rescale_into_wave_geometry() {
        let low = SurgeParams::LOW;
        assert!((low.radius() - 0.408).abs() < 1e-5);
        assert!((low.wavelength() - 4.8).abs() < 1e-5);

        let high = SurgeParams::HIGH;
        assert!((high.radius() - 1.602).abs() < 1e-5);
        assert!((high.wavelength() - 16.2).abs() < 1e-4);
    }

    #[test]
    fn phase_wraps_at_full_turn() {
        let mut ch = surge(SurgeParams::LOW);
        for now in 0..20_000u32 {
            ch.tick(now, 10.0);
            assert!((0.0..=TAU).contains(&ch.phase()), "phase {}", ch.phase());
        }
    }

    #[test]
    fn phase_advances_by_rate_per_tick() {
        let mut ch = surge(SurgeParams::LOW);
        ch.tick(0, 2.0);
        ch.tick(5, 2.0);
        assert!((ch.phase() - 0.04).abs() < 1e-6);
    }

    #[test]
    fn output_stays_in_voltage_window() {
        for params in [SurgeParams::LOW, SurgeParams::HIGH] {
            let mut ch = surge(params);
            let (lo, hi) = swing(&mut ch, 7.0);
            assert!(lo >= 0.0 && hi <= 10.0, "{params:?}: {lo}..{hi}");
        }
    }

    #[test]
    fn calm_sea_swings_less_than_rough_sea() {
        let (calm_lo, calm_hi) = swing(&mut surge(SurgeParams::LOW), 5.0);
        // 0.408 amplitude around mid-scale
        assert!(calm_lo > 2.9 && calm_hi < 7.1, "calm {calm_lo}..{calm_hi}");

        let (rough_lo, rough_hi) = swing(&mut surge(SurgeParams::HIGH), 5.0);
        // Past the clip on both sides
        assert!(rough_lo < 0.01 && rough_hi > 9.99, "rough {rough_lo}..{rough_hi}");
    }

    #[test]
    fn starting_level_depends_on_buoy_position() {
        let near = SurgeParams {
            spread: 0.0,
            ..SurgeParams::HIGH
        };
        assert_eq!(wave_level(&near, 0.0), 1.0);
        assert!(wave_level(&SurgeParams::HIGH, 0.0) < 1.0);
    }
}
