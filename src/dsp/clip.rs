//! Output range handling
//!
//! A shaped curve can overshoot the voltage window (targets are drawn from a
//! slightly wider range than 0..1, and eased shapes bulge). The clip mode
//! decides what happens to the overshoot:
//!
//!   Limit: pin to the nearest bound
//!     f(v) = min            if v < min
//!     f(v) = max            if v > max
//!
//!   Fold: mirror back inside
//!     f(v) = min - v        if v < min
//!     f(v) = max + (max - v) if v > max
//!
//!   Thru: wrap around to the opposite bound
//!     f(v) = max - (min - v) if v < min
//!     f(v) = min - (max - v) if v > max
//!
//! Each formula is applied exactly once. A value far enough out to land
//! outside the window again after folding/wrapping is passed on as is.

use serde::{Deserialize, Serialize};

/// How out-of-range output is brought back into `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClipMode {
    #[default]
    Limit,
    Fold,
    Thru,
}

impl ClipMode {
    pub const ALL: [ClipMode; 3] = [ClipMode::Limit, ClipMode::Fold, ClipMode::Thru];

    /// Apply this mode to `v` for the window `[min, max]`.
    #[inline]
    pub fn apply(self, v: f32, min: f32, max: f32) -> f32 {
        match self {
            ClipMode::Limit => limit(v, min, max),
            ClipMode::Fold => fold(v, min, max),
            ClipMode::Thru => thru(v, min, max),
        }
    }

    /// Next mode in button order: Limit, Fold, Thru, Limit...
    pub fn next(self) -> Self {
        match self {
            ClipMode::Limit => ClipMode::Fold,
            ClipMode::Fold => ClipMode::Thru,
            ClipMode::Thru => ClipMode::Limit,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClipMode::Limit => "Limit",
            ClipMode::Fold => "Fold",
            ClipMode::Thru => "Thru",
        }
    }

    pub fn index(self) -> u8 {
        match self {
            ClipMode::Limit => 0,
            ClipMode::Fold => 1,
            ClipMode::Thru => 2,
        }
    }
}

impl TryFrom<u8> for ClipMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ClipMode::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("unknown clip mode index {value}"))
    }
}

impl From<ClipMode> for u8 {
    fn from(mode: ClipMode) -> Self {
        mode.index()
    }
}

#[inline]
pub fn limit(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

#[inline]
pub fn fold(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min - v
    } else if v > max {
        max + (max - v)
    } else {
        v
    }
}

#[inline]
pub fn thru(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        max - (min - v)
    } else if v > max {
        min - (max - v)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_pins_to_bounds() {
        assert_eq!(ClipMode::Limit.apply(-2.0, 0.0, 10.0), 0.0);
        assert_eq!(ClipMode::Limit.apply(12.0, 0.0, 10.0), 10.0);
        assert_eq!(ClipMode::Limit.apply(4.5, 0.0, 10.0), 4.5);
    }

    #[test]
    fn fold_mirrors_back() {
        assert_eq!(ClipMode::Fold.apply(-2.0, 0.0, 10.0), 2.0);
        assert_eq!(ClipMode::Fold.apply(12.0, 0.0, 10.0), 8.0);
        assert_eq!(ClipMode::Fold.apply(7.0, 0.0, 10.0), 7.0);
    }

    #[test]
    fn thru_wraps_to_opposite_bound() {
        assert_eq!(ClipMode::Thru.apply(-2.0, 0.0, 10.0), 8.0);
        assert_eq!(ClipMode::Thru.apply(12.0, 0.0, 10.0), 2.0);
        assert_eq!(ClipMode::Thru.apply(3.0, 0.0, 10.0), 3.0);
    }

    #[test]
    fn fold_below_min_uses_min_minus_v() {
        // Non-zero floor: the formula is min - v, not a reflection about min
        assert_eq!(fold(0.5, 1.0, 5.0), 0.5);
        assert_eq!(fold(-1.0, 1.0, 5.0), 2.0);
    }

    #[test]
    fn doubly_out_of_range_is_not_reclipped() {
        assert_eq!(ClipMode::Fold.apply(25.0, 0.0, 10.0), -5.0);
        assert_eq!(ClipMode::Thru.apply(-15.0, 0.0, 10.0), -5.0);
    }

    #[test]
    fn bounds_are_inside() {
        for mode in ClipMode::ALL {
            assert_eq!(mode.apply(0.0, 0.0, 10.0), 0.0);
            assert_eq!(mode.apply(10.0, 0.0, 10.0), 10.0);
        }
    }

    #[test]
    fn button_cycles_through_all_modes() {
        let mut mode = ClipMode::Limit;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mode.name());
            mode = mode.next();
        }
        assert_eq!(seen, ["Limit", "Fold", "Thru"]);
        assert_eq!(mode, ClipMode::Limit);
    }

    #[test]
    fn index_roundtrip() {
        for mode in ClipMode::ALL {
            assert_eq!(ClipMode::try_from(mode.index()), Ok(mode));
        }
        assert!(ClipMode::try_from(3).is_err());
    }
}
