#[cfg(feature = "rtrb")]
use rtrb::Producer;

use super::VoltageSink;

/// Discards everything. For channels with no physical output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl VoltageSink for NullSink {
    fn write_voltage(&mut self, _volts: f32) {}
}

/// Keeps every written voltage, oldest first.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub voltages: Vec<f32>,
}

impl Recorder {
    pub fn last(&self) -> Option<f32> {
        self.voltages.last().copied()
    }
}

impl VoltageSink for Recorder {
    fn write_voltage(&mut self, volts: f32) {
        self.voltages.push(volts);
    }
}

/// Hand voltages to another thread (e.g. an audio callback). A full ring
/// drops the value rather than blocking the control loop.
#[cfg(feature = "rtrb")]
impl VoltageSink for Producer<f32> {
    fn write_voltage(&mut self, volts: f32) {
        let _ = self.push(volts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_order() {
        let mut rec = Recorder::default();
        rec.write_voltage(1.0);
        rec.write_voltage(2.5);
        assert_eq!(rec.voltages, vec![1.0, 2.5]);
        assert_eq!(rec.last(), Some(2.5));
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn ring_sink_drops_when_full() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<f32>::new(2);
        tx.write_voltage(1.0);
        tx.write_voltage(2.0);
        tx.write_voltage(3.0);
        assert_eq!(rx.pop().ok(), Some(1.0));
        assert_eq!(rx.pop().ok(), Some(2.0));
        assert!(rx.pop().is_err());
    }
}
