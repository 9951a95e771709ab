//! Module settings: voltage/frequency bounds and the persisted clip mode.
//!
//! Bounds are read once at startup. Anything out of its domain is pulled
//! back in (and logged) instead of rejected, so a module with a broken or
//! missing config file still runs on safe defaults.

mod error;
mod store;

use serde::{Deserialize, Serialize};

use crate::{dsp::ClipMode, MAX_FREQUENCY_HZ, MAX_OUTPUT_VOLTAGE, MIN_FREQUENCY_HZ};

pub use error::{ConfigError, Result};
pub use store::JsonStore;

/// Smallest and largest curve level a target draw may produce.
const TARGET_DOMAIN: (f32, f32) = (-1.0, 2.0);

/// Output and rate bounds for one module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ModuleConfig {
    /// Output voltage at curve level 0.0
    pub min_voltage: f32,
    /// Output voltage at curve level 1.0
    pub max_voltage: f32,
    /// Rate with the frequency knob fully counter-clockwise
    pub min_frequency: f32,
    /// Rate with the frequency knob fully clockwise
    pub max_frequency: f32,
    /// Lower bound for random targets (curve level)
    pub target_low: f32,
    /// Upper bound for random targets (curve level)
    pub target_high: f32,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            min_voltage: 0.0,
            max_voltage: MAX_OUTPUT_VOLTAGE,
            min_frequency: 0.01,
            max_frequency: 1.0,
            target_low: -0.1,
            target_high: 1.1,
        }
    }
}

impl ModuleConfig {
    /// Defaults for the multi-output layout: faster top rate, targets that
    /// stay inside the window.
    pub fn multi() -> Self {
        Self {
            max_frequency: MAX_FREQUENCY_HZ,
            target_low: 0.0,
            target_high: 1.0,
            ..Self::default()
        }
    }

    /// Pull every field into its valid domain.
    ///
    /// - voltages: `0..=MAX_OUTPUT_VOLTAGE`; an empty or inverted window
    ///   falls back to the default window
    /// - frequencies: `MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ`
    /// - targets: finite, `low <= high` (swapped if inverted)
    pub fn clamped(self) -> Self {
        let defaults = Self::default();

        let mut min_voltage = clamp_field(
            "MIN_VOLTAGE",
            self.min_voltage,
            (0.0, MAX_OUTPUT_VOLTAGE),
            defaults.min_voltage,
        );
        let mut max_voltage = clamp_field(
            "MAX_VOLTAGE",
            self.max_voltage,
            (0.0, MAX_OUTPUT_VOLTAGE),
            defaults.max_voltage,
        );
        if min_voltage >= max_voltage {
            log::warn!(
                "voltage window {min_voltage}..{max_voltage} is empty, using {}..{}",
                defaults.min_voltage,
                defaults.max_voltage
            );
            min_voltage = defaults.min_voltage;
            max_voltage = defaults.max_voltage;
        }

        let min_frequency = clamp_field(
            "MIN_FREQUENCY",
            self.min_frequency,
            (MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ),
            defaults.min_frequency,
        );
        let max_frequency = clamp_field(
            "MAX_FREQUENCY",
            self.max_frequency,
            (MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ),
            defaults.max_frequency,
        );

        let mut target_low =
            clamp_field("TARGET_LOW", self.target_low, TARGET_DOMAIN, defaults.target_low);
        let mut target_high =
            clamp_field("TARGET_HIGH", self.target_high, TARGET_DOMAIN, defaults.target_high);
        if target_low > target_high {
            std::mem::swap(&mut target_low, &mut target_high);
        }

        Self {
            min_voltage,
            max_voltage,
            min_frequency,
            max_frequency,
            target_low,
            target_high,
        }
    }

    /// Width of the voltage window. Positive after [`clamped`](Self::clamped).
    pub fn voltage_span(&self) -> f32 {
        self.max_voltage - self.min_voltage
    }
}

fn clamp_field(name: &str, value: f32, (lo, hi): (f32, f32), default: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("{name} is not a number, using {default}");
        return default;
    }
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        log::warn!("{name}={value} outside {lo}..={hi}, using {clamped}");
    }
    clamped
}

/// Settings the module writes back while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleState {
    pub clip_mode: ClipMode,
}
