//! Stateful per-output drivers.
//!
//! A channel owns everything one output jack needs between ticks: segment
//! timing, the current curve endpoints, a random source, the clip mode and
//! the display history. Knob inputs are borrowed per tick, never owned.

/// Shape-controlled random curve output.
pub mod curve;
/// Capped display history.
pub mod history;
/// Random step (sample & hold) output.
pub mod step;
/// Ocean-surge wave output.
pub mod surge;
/// Segment clock over a wrapping millisecond counter.
pub mod timing;

pub use curve::CurveChannel;
pub use history::History;
pub use step::StepChannel;
pub use surge::{OceanSurge, SurgeParams};
pub use timing::{Phase, SegmentClock};
