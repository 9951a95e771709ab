// Purpose - collaborator interfaces: knobs in, voltages out, the tick clock

pub mod clock;
pub mod input;
pub mod output;

pub use clock::{ticks_diff, Clock, MonotonicClock};
pub use input::{Fixed, MovingAverage};
pub use output::{NullSink, Recorder};

/// A continuous control (knob, CV input) read as a value in `0.0..=1.0`.
///
/// `&mut self` so smoothing inputs can update their window on each read.
pub trait ContinuousInput {
    fn read_normalized(&mut self) -> f32;

    /// Reading forced into `0.0..=1.0`; NaN reads as 0.0.
    fn read_percent(&mut self) -> f32 {
        let v = self.read_normalized();
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    }
}

impl<T: ContinuousInput + ?Sized> ContinuousInput for &mut T {
    fn read_normalized(&mut self) -> f32 {
        (**self).read_normalized()
    }
}

impl ContinuousInput for Box<dyn ContinuousInput> {
    fn read_normalized(&mut self) -> f32 {
        (**self).read_normalized()
    }
}

/// Where a channel's voltage goes. Must not block.
pub trait VoltageSink {
    fn write_voltage(&mut self, volts: f32);
}

impl<T: VoltageSink + ?Sized> VoltageSink for &mut T {
    fn write_voltage(&mut self, volts: f32) {
        (**self).write_voltage(volts)
    }
}

impl VoltageSink for Box<dyn VoltageSink> {
    fn write_voltage(&mut self, volts: f32) {
        (**self).write_voltage(volts)
    }
}
