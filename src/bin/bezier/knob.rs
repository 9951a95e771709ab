//! Keyboard stand-in for a front-panel potentiometer

use bezier_cv::ContinuousInput;

/// Fraction of full travel moved per key press.
pub const KNOB_STEP: f32 = 0.02;

#[derive(Debug, Clone, Copy)]
pub struct Knob {
    position: f32,
}

impl Knob {
    pub fn new(position: f32) -> Self {
        Self {
            position: position.clamp(0.0, 1.0),
        }
    }

    /// Turn by `delta` of full travel; stops at either end.
    pub fn nudge(&mut self, delta: f32) {
        self.position = (self.position + delta).clamp(0.0, 1.0);
    }

    pub fn position(&self) -> f32 {
        self.position
    }
}

impl ContinuousInput for Knob {
    fn read_normalized(&mut self) -> f32 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_stops_at_the_ends() {
        let mut knob = Knob::new(0.99);
        knob.nudge(KNOB_STEP);
        assert_eq!(knob.position(), 1.0);
        for _ in 0..100 {
            knob.nudge(-KNOB_STEP);
        }
        assert_eq!(knob.position(), 0.0);
    }
}
