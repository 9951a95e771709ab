use rand::{rngs::StdRng, SeedableRng};

use super::{ChannelView, Module};
use crate::{
    channel::{CurveChannel, OceanSurge, StepChannel, SurgeParams},
    config::{JsonStore, ModuleConfig},
    io::{ContinuousInput, Fixed, MovingAverage, VoltageSink},
};

/// Store name used for this module's settings files.
pub const STORE_NAME: &str = "BezierMulti";

/// Shape of the curve output in bank A (sharp timing).
pub const BANK_A_SHAPE: f32 = -1.0;
/// Shape of the curve output in bank B (eased S-curve).
pub const BANK_B_SHAPE: f32 = 1.0;
/// Sea state of the surge output in bank A.
pub const BANK_A_SURGE: SurgeParams = SurgeParams::LOW;
/// Sea state of the surge output in bank B.
pub const BANK_B_SURGE: SurgeParams = SurgeParams::HIGH;

/// One rate knob (smoothed) driving a step output, a fixed-shape curve and
/// a surge wave.
struct Bank<I, O> {
    knob: MovingAverage<I>,
    shape: Fixed,
    step: StepChannel<O, StdRng>,
    curve: CurveChannel<O, StdRng>,
    surge: OceanSurge<O>,
}

impl<I: ContinuousInput, O: VoltageSink> Bank<I, O> {
    fn tick(&mut self, now_ms: u32) {
        // One smoothed reading per tick, shared by all three outputs
        let mut rate = Fixed(self.knob.read_percent());
        self.step.update(now_ms, &mut rate);
        self.curve.update(now_ms, &mut rate, &mut self.shape);
        self.surge.update(now_ms, &mut rate);
    }
}

/// Six outputs from two knobs.
///
/// Outputs, in the order passed to [`new`](Self::new):
///   0  bank A random step
///   1  bank A curve, k = -1
///   2  bank A surge, calm sea
///   3  bank B random step
///   4  bank B curve, k = +1
///   5  bank B surge, rough sea
///
/// Curve outputs use Limit clipping; the surge clips its own wave.
pub struct MultiModule<I, O> {
    banks: [Bank<I, O>; 2],
}

impl<I: ContinuousInput, O: VoltageSink> MultiModule<I, O> {
    pub fn new(store: Option<&JsonStore>, knobs: [I; 2], outputs: [O; 6], now_ms: u32) -> Self {
        Self::build(store, knobs, outputs, StdRng::from_entropy, now_ms)
    }

    pub fn with_seed(
        store: Option<&JsonStore>,
        knobs: [I; 2],
        outputs: [O; 6],
        seed: u64,
        now_ms: u32,
    ) -> Self {
        let mut next = seed;
        Self::build(
            store,
            knobs,
            outputs,
            || {
                next = next.wrapping_add(1);
                StdRng::seed_from_u64(next)
            },
            now_ms,
        )
    }

    fn build(
        store: Option<&JsonStore>,
        knobs: [I; 2],
        outputs: [O; 6],
        mut rng: impl FnMut() -> StdRng,
        now_ms: u32,
    ) -> Self {
        let config = match store {
            Some(store) => store.load_config(ModuleConfig::multi()),
            None => ModuleConfig::multi(),
        };
        let [knob_a, knob_b] = knobs;
        let [step_a, curve_a, surge_a, step_b, curve_b, surge_b] = outputs;

        let mut bank = |knob, shape, sea, [step_out, curve_out, surge_out]: [O; 3]| Bank {
            knob: MovingAverage::new(knob),
            shape: Fixed::shape(shape),
            step: StepChannel::with_rng(config, step_out, rng(), now_ms),
            curve: CurveChannel::with_rng(config, curve_out, rng(), now_ms),
            surge: OceanSurge::new(config, sea, surge_out),
        };

        Self {
            banks: [
                bank(knob_a, BANK_A_SHAPE, BANK_A_SURGE, [step_a, curve_a, surge_a]),
                bank(knob_b, BANK_B_SHAPE, BANK_B_SURGE, [step_b, curve_b, surge_b]),
            ],
        }
    }

    /// Down-sample every output's display history to one sample per
    /// `interval_ms`.
    pub fn with_history_interval(self, interval_ms: u32) -> Self {
        Self {
            banks: self.banks.map(|bank| Bank {
                step: bank.step.with_history_interval(interval_ms),
                curve: bank.curve.with_history_interval(interval_ms),
                surge: bank.surge.with_history_interval(interval_ms),
                ..bank
            }),
        }
    }

    pub fn step(&self, bank: usize) -> Option<&StepChannel<O, StdRng>> {
        self.banks.get(bank).map(|b| &b.step)
    }

    pub fn curve(&self, bank: usize) -> Option<&CurveChannel<O, StdRng>> {
        self.banks.get(bank).map(|b| &b.curve)
    }

    pub fn surge(&self, bank: usize) -> Option<&OceanSurge<O>> {
        self.banks.get(bank).map(|b| &b.surge)
    }
}

impl<I: ContinuousInput, O: VoltageSink> Module for MultiModule<I, O> {
    type Knob = I;

    fn tick(&mut self, now_ms: u32) {
        for bank in &mut self.banks {
            bank.tick(now_ms);
        }
    }

    fn knob_count(&self) -> usize {
        2
    }

    fn knob_mut(&mut self, index: usize) -> Option<&mut I> {
        self.banks.get_mut(index).map(|b| b.knob.inner_mut())
    }

    fn views(&self) -> Vec<ChannelView<'_>> {
        const LABELS: [[&str; 3]; 2] = [
            ["CV1 step", "CV2 sharp", "CV3 calm"],
            ["CV4 step", "CV5 eased", "CV6 rough"],
        ];

        let mut views = Vec::with_capacity(6);
        for (bank, [step_label, curve_label, surge_label]) in self.banks.iter().zip(LABELS) {
            let config = bank.curve.config();
            views.push(ChannelView {
                label: step_label,
                frequency: bank.step.frequency(),
                curve_k: None,
                clip_mode: None,
                last_output: bank.step.last_output(),
                min_voltage: config.min_voltage,
                max_voltage: config.max_voltage,
                history: bank.step.history(),
            });
            views.push(ChannelView {
                label: curve_label,
                frequency: bank.curve.frequency(),
                curve_k: Some(bank.curve.curve_k()),
                clip_mode: None,
                last_output: bank.curve.last_output(),
                min_voltage: config.min_voltage,
                max_voltage: config.max_voltage,
                history: bank.curve.history(),
            });
            views.push(ChannelView {
                label: surge_label,
                frequency: bank.surge.frequency(),
                curve_k: None,
                clip_mode: None,
                last_output: bank.surge.last_output(),
                min_voltage: config.min_voltage,
                max_voltage: config.max_voltage,
                history: bank.surge.history(),
            });
        }
        views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsp::ClipMode, io::Recorder};

    fn module() -> MultiModule<Fixed, Recorder> {
        MultiModule::with_seed(
            None,
            [Fixed(0.0), Fixed(1.0)],
            Default::default(),
            5,
            0,
        )
    }

    #[test]
    fn banks_use_fixed_shapes() {
        let mut m = module();
        m.tick(10);
        let a = m.curve(0).expect("bank a");
        let b = m.curve(1).expect("bank b");
        assert!((a.curve_k() - BANK_A_SHAPE).abs() < 1e-6);
        assert!((b.curve_k() - BANK_B_SHAPE).abs() < 1e-6);
        assert_eq!(a.clip_mode(), ClipMode::Limit);
    }

    #[test]
    fn knobs_span_the_multi_rate_range() {
        let mut m = module();
        m.tick(10);
        assert!((m.step(0).expect("bank a").frequency() - 0.01).abs() < 1e-6);
        assert!((m.step(1).expect("bank b").frequency() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn every_output_is_written_each_tick() {
        let mut m = module();
        for now in 0..20 {
            m.tick(now);
        }
        for bank in 0..2 {
            assert_eq!(m.step(bank).expect("bank").output().voltages.len(), 20);
            assert_eq!(m.curve(bank).expect("bank").output().voltages.len(), 20);
            assert_eq!(m.surge(bank).expect("bank").output().voltages.len(), 20);
        }
    }

    #[test]
    fn banks_use_calm_and_rough_seas() {
        let m = module();
        assert_eq!(*m.surge(0).expect("bank a").params(), SurgeParams::LOW);
        assert_eq!(*m.surge(1).expect("bank b").params(), SurgeParams::HIGH);
    }

    #[test]
    fn surge_follows_the_bank_rate() {
        let mut m = module();
        m.tick(1);
        m.tick(2);
        // Bank A knob fully down (0.01 Hz), bank B fully up (10 Hz)
        let a = m.surge(0).expect("bank a");
        let b = m.surge(1).expect("bank b");
        assert!((a.phase() - 2.0 * 0.01 * 0.01).abs() < 1e-6);
        assert!((b.phase() - 2.0 * 10.0 * 0.01).abs() < 1e-4);
    }

    #[test]
    fn curve_targets_stay_in_window() {
        let mut m = module();
        for now in (0..30_000).step_by(13) {
            m.tick(now);
        }
        let curve = m.curve(1).expect("bank b");
        assert!((0.0..=1.0).contains(&curve.curve().origin()));
        assert!((0.0..=1.0).contains(&curve.curve().target()));
    }

    #[test]
    fn views_list_six_outputs() {
        let mut m = module();
        m.tick(1);
        let views = m.views();
        assert_eq!(views.len(), 6);
        assert!(views[0].curve_k.is_none());
        assert!(views[1].curve_k.is_some());
        assert_eq!(views[2].label, "CV3 calm");
        assert_eq!(views[5].label, "CV6 rough");
    }
}
