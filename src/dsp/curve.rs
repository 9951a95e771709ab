use crate::dsp::bezier;

/// One segment's worth of curve state: where the CV is coming from and
/// where it is going.
///
/// Successive segments share an endpoint: [`set_next_target`] moves the old
/// target into `origin`, so the curve is continuous across rollovers.
///
/// [`set_next_target`]: BezierCurve::set_next_target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve {
    origin: f32,
    target: f32,
}

impl BezierCurve {
    /// A flat segment at 0.0. Callers draw a first target right away.
    pub fn new() -> Self {
        Self {
            origin: 0.0,
            target: 0.0,
        }
    }

    pub fn with_endpoints(origin: f32, target: f32) -> Self {
        Self { origin, target }
    }

    /// Start a new segment toward `value`. Call once per rollover.
    pub fn set_next_target(&mut self, value: f32) {
        self.origin = self.target;
        self.target = value;
    }

    /// Curve level at phase `t` (0.0 to 1.0) with shape `k` (-1.0 to +1.0).
    #[inline]
    pub fn evaluate(&self, t: f32, k: f32) -> f32 {
        bezier::value_at(self.origin, self.target, t, k)
    }

    pub fn origin(&self) -> f32 {
        self.origin
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_target_shifts_endpoints() {
        let mut curve = BezierCurve::new();
        curve.set_next_target(0.8);
        assert_eq!(curve.origin(), 0.0);
        assert_eq!(curve.target(), 0.8);

        curve.set_next_target(0.3);
        assert_eq!(curve.origin(), 0.8);
        assert_eq!(curve.target(), 0.3);
    }

    #[test]
    fn segments_join_without_discontinuity() {
        let mut curve = BezierCurve::with_endpoints(0.1, 0.9);
        let shapes = [-1.0, -0.3, 0.0, 0.4, 1.0];

        for &ka in &shapes {
            let end_of_a = curve.evaluate(1.0, ka);
            let mut next = curve;
            next.set_next_target(0.25);
            for &kb in &shapes {
                let start_of_b = next.evaluate(0.0, kb);
                assert!(
                    (end_of_a - start_of_b).abs() < 1e-4,
                    "ka={ka}, kb={kb}: {end_of_a} vs {start_of_b}"
                );
            }
        }
    }

    #[test]
    fn flat_segment_stays_flat() {
        let curve = BezierCurve::with_endpoints(0.5, 0.5);
        for i in 0..=10 {
            let v = curve.evaluate(i as f32 / 10.0, 0.7);
            assert!((v - 0.5).abs() < 1e-4);
        }
    }
}
