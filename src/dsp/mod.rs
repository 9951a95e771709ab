//! Low-level curve primitives used by the channel drivers.
//!
//! Everything here is allocation-free and stateless apart from the two
//! endpoints held by [`curve::BezierCurve`], so a channel can evaluate a
//! segment every tick within a fixed time budget.

/// Bezier control points, de Casteljau evaluation and the direct cubic fit.
pub mod bezier;
/// Limit / Fold / Thru range handling.
pub mod clip;
/// Two-endpoint curve segment.
pub mod curve;
/// Knob scaling, rates and periods.
pub mod lfo;
/// Fixed-size linear solve.
pub mod solve;

pub use clip::ClipMode;
pub use curve::BezierCurve;
