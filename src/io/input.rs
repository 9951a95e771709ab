//! Stock continuous inputs.

use super::ContinuousInput;

/// Samples averaged by [`MovingAverage`].
pub const FILTER_WINDOW: usize = 5;

/// A control that never moves, e.g. a channel with a fixed curve shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed(pub f32);

impl Fixed {
    /// Fixed input that maps to shape `k` under the bipolar knob scaling.
    pub fn shape(k: f32) -> Self {
        Self(crate::dsp::lfo::bipolar_to_unipolar(k))
    }
}

impl ContinuousInput for Fixed {
    fn read_normalized(&mut self) -> f32 {
        self.0
    }
}

/// Moving average over the last [`FILTER_WINDOW`] readings of an input.
///
/// Potentiometers jitter by a few LSBs; averaging keeps the segment length
/// from wobbling. The window is filled with the first reading so the output
/// starts at the knob position instead of ramping up from zero.
pub struct MovingAverage<I> {
    inner: I,
    window: [f32; FILTER_WINDOW],
    pos: usize,
    primed: bool,
}

impl<I: ContinuousInput> MovingAverage<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            window: [0.0; FILTER_WINDOW],
            pos: 0,
            primed: false,
        }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.inner
    }
}

impl<I: ContinuousInput> ContinuousInput for MovingAverage<I> {
    fn read_normalized(&mut self) -> f32 {
        let reading = self.inner.read_normalized();
        if !self.primed {
            self.window = [reading; FILTER_WINDOW];
            self.primed = true;
        }
        self.window[self.pos] = reading;
        self.pos = (self.pos + 1) % FILTER_WINDOW;
        self.window.iter().sum::<f32>() / FILTER_WINDOW as f32
    }
}
