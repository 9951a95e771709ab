pub mod channel; // Per-output drivers: timing, targets, history
pub mod config;
pub mod dsp;
pub mod io;
pub mod module; // Owners wiring channels to inputs, buttons and the store

pub use channel::{CurveChannel, History, OceanSurge, StepChannel};
pub use config::{ConfigError, JsonStore, ModuleConfig, ModuleState};
pub use dsp::{clip::ClipMode, curve::BezierCurve};
pub use io::{ContinuousInput, VoltageSink};

/// Width of the display history in samples (one pixel column per sample).
pub const DISPLAY_WIDTH: usize = 128;
/// Height of the display in pixels.
pub const DISPLAY_HEIGHT: usize = 32;
/// Largest voltage the output stage can produce.
pub const MAX_OUTPUT_VOLTAGE: f32 = 10.0;
/// Lower bound of the configurable frequency domain, keeps segment durations finite.
pub const MIN_FREQUENCY_HZ: f32 = 0.001;
/// Upper bound of the configurable frequency domain.
pub const MAX_FREQUENCY_HZ: f32 = 10.0;
