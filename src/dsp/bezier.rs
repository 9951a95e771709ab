use crate::dsp::solve::{solve4, Augmented4};

/*
Bezier Segment Evaluation
=========================

A CV segment moves from an `origin` level to a `target` level over one
normalized unit of time. The shape parameter `k` (-1.0 to +1.0) bends the
transition without ever moving the endpoints.

Vocabulary
----------

  phase       Normalized time inside the segment, 0.0 at the start and 1.0
              at the end. Called `t` by callers.

  s           The Bezier curve's own parameter. NOT the same as phase: when
              the control points are skewed in time, s = 0.5 does not land
              at phase 0.5.

  control     The four points P0..P3 that define a cubic Bezier. P0 and P3
  points      are the endpoints, P1 and P2 pull the curve around.


The Control Points
------------------

P0 = (0, origin) and P3 = (1, target) never change. P1/P2 depend on k:

  k <= 0  Time skew. P1/P2 keep the endpoint levels but slide along the
          time axis:

              P1 = (-k/3,     origin)
              P2 = (1 + k/3,  target)

          k = 0 leaves them stacked on the endpoints, where level follows
          phase linearly; k = -1 spreads them to 1/3 and 2/3.

  k > 0   Amplitude skew. P1/P2 keep the endpoint times but move in level
          toward each other by dy * k / 2, where dy = |origin - target|:

              rising:   P1.y = origin + dy*k/2,   P2.y = target - dy*k/2
              falling:  P1.y = origin - dy*k/2,   P2.y = target + dy*k/2

          At k = 1 both meet at the midpoint: an S-curve.


Why Not Just Evaluate the Bezier?
---------------------------------

A parametric Bezier gives (x(s), y(s)). We want y at a given phase x = t.
Inverting x(s) = t needs an iterative root finder, and the iteration count
varies from tick to tick. Instead:

  1. Evaluate the Bezier at s = 0, 1/3, 2/3, 1 (de Casteljau).
  2. Fit the unique cubic y = a*x^3 + b*x^2 + c*x + d through those four
     (x, y) samples with one fixed-size 4x4 solve.
  3. Evaluate the cubic at x = t.

That is O(1) with a fixed operation count. The fit is exact at the four
samples and in particular at x = 0 and x = 1, so a segment always starts
at `origin` and ends at `target`. In between it is an approximation of the
true Bezier, which is fine for a control signal.

For k in [-1, 1] the four sampled x values are always distinct and
increasing. Outside that range (or with a non-finite k) they can bunch up
and the solve goes singular; the fit then falls back to the k = 0 shape.
*/

/// A point on the time/level plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    fn lerp(self, other: Point2D, s: f32) -> Point2D {
        Point2D::new(
            linear_interpolate(self.x, other.x, s),
            linear_interpolate(self.y, other.y, s),
        )
    }
}

/// Blend `a` toward `b`. Exact at `s = 0` and `s = 1`.
#[inline]
pub fn linear_interpolate(a: f32, b: f32, s: f32) -> f32 {
    a * (1.0 - s) + b * s
}

/// Parametric positions the fit samples the Bezier at.
const FIT_POSITIONS: [f32; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];

/// Build the four control points for a segment.
pub fn control_points(origin: f32, target: f32, k: f32) -> [Point2D; 4] {
    let p0 = Point2D::new(0.0, origin);
    let p3 = Point2D::new(1.0, target);

    let (p1, p2) = if k <= 0.0 {
        (
            Point2D::new(p0.x - k / 3.0, p0.y),
            Point2D::new(p3.x + k / 3.0, p3.y),
        )
    } else {
        // Offsets are measured from each point's own endpoint, not from 0
        let offset = (origin - target).abs() * k / 2.0;
        if origin < target {
            (
                Point2D::new(p0.x, origin + offset),
                Point2D::new(p3.x, target - offset),
            )
        } else {
            (
                Point2D::new(p0.x, origin - offset),
                Point2D::new(p3.x, target + offset),
            )
        }
    };

    [p0, p1, p2, p3]
}

/// Evaluate a cubic Bezier at parameter `s` by repeated interpolation.
pub fn de_casteljau(points: &[Point2D; 4], s: f32) -> Point2D {
    let [p0, p1, p2, p3] = *points;

    let q0 = p0.lerp(p1, s);
    let q1 = p1.lerp(p2, s);
    let q2 = p2.lerp(p3, s);

    let r0 = q0.lerp(q1, s);
    let r1 = q1.lerp(q2, s);

    r0.lerp(r1, s)
}

/// Explicit cubic `y = a*x^3 + b*x^2 + c*x + d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Cubic {
    /// Horner evaluation.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }

    /// Fit the cubic through four samples. `None` if the samples do not
    /// determine a unique cubic.
    pub fn through(samples: &[Point2D; 4]) -> Option<Self> {
        let mut m: Augmented4 = [[0.0; 5]; 4];
        for (row, p) in m.iter_mut().zip(samples) {
            let x = p.x;
            *row = [x * x * x, x * x, x, 1.0, p.y];
        }
        let [a, b, c, d] = solve4(m)?;
        Some(Self { a, b, c, d })
    }
}

/// Fit the direct cubic for a segment at shape `k`, without fallback.
pub fn fit(origin: f32, target: f32, k: f32) -> Option<Cubic> {
    if !k.is_finite() {
        return None;
    }
    let points = control_points(origin, target, k);
    let samples = FIT_POSITIONS.map(|s| de_casteljau(&points, s));
    Cubic::through(&samples)
}

/// Fit the cubic for `k`, substituting the neutral shape if the system is
/// near-singular. The neutral fit only fails for non-finite endpoints, in
/// which case a straight line is used.
pub fn fit_or_neutral(origin: f32, target: f32, k: f32) -> Cubic {
    if let Some(cubic) = fit(origin, target, k) {
        return cubic;
    }
    log::debug!("curve fit singular at k={k}, using neutral shape");
    fit(origin, target, 0.0).unwrap_or(Cubic {
        a: 0.0,
        b: 0.0,
        c: target - origin,
        d: origin,
    })
}

/// Value of the segment `origin -> target` at phase `t` with shape `k`.
#[inline]
pub fn value_at(origin: f32, target: f32, t: f32, k: f32) -> f32 {
    fit_or_neutral(origin, target, k).eval(t)
}
