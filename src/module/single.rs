use rand::{rngs::StdRng, SeedableRng};

use super::{ChannelView, Module};
use crate::{
    channel::CurveChannel,
    config::{self, JsonStore, ModuleConfig, ModuleState},
    dsp::ClipMode,
    io::{ContinuousInput, VoltageSink},
};

/// Store name used for this module's settings files.
pub const STORE_NAME: &str = "BezierSingle";

/// One curve output. Knob 0 sets the rate, knob 1 the shape; the button
/// cycles Limit → Fold → Thru and the choice is written back to the store.
pub struct SingleModule<I, O> {
    frequency_in: I,
    curve_in: I,
    channel: CurveChannel<O, StdRng>,
    store: Option<JsonStore>,
    state: ModuleState,
    settings_dirty: bool,
}

impl<I: ContinuousInput, O: VoltageSink> SingleModule<I, O> {
    /// Load bounds and clip mode from `store` (defaults without one).
    pub fn new(
        store: Option<JsonStore>,
        frequency_in: I,
        curve_in: I,
        output: O,
        now_ms: u32,
    ) -> Self {
        Self::build(store, frequency_in, curve_in, output, StdRng::from_entropy(), now_ms)
    }

    /// Like [`new`](Self::new) with a reproducible random source.
    pub fn with_seed(
        store: Option<JsonStore>,
        frequency_in: I,
        curve_in: I,
        output: O,
        seed: u64,
        now_ms: u32,
    ) -> Self {
        Self::build(store, frequency_in, curve_in, output, StdRng::seed_from_u64(seed), now_ms)
    }

    fn build(
        store: Option<JsonStore>,
        frequency_in: I,
        curve_in: I,
        output: O,
        rng: StdRng,
        now_ms: u32,
    ) -> Self {
        let (config, state) = match &store {
            Some(store) => (store.load_config(ModuleConfig::default()), store.load_state()),
            None => (ModuleConfig::default(), ModuleState::default()),
        };
        let mut channel = CurveChannel::with_rng(config, output, rng, now_ms);
        channel.set_clip_mode(state.clip_mode);

        Self {
            frequency_in,
            curve_in,
            channel,
            store,
            state,
            settings_dirty: false,
        }
    }

    /// Down-sample the display history to one sample per `interval_ms`.
    pub fn with_history_interval(mut self, interval_ms: u32) -> Self {
        self.channel = self.channel.with_history_interval(interval_ms);
        self
    }

    pub fn channel(&self) -> &CurveChannel<O, StdRng> {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut CurveChannel<O, StdRng> {
        &mut self.channel
    }

    pub fn clip_mode(&self) -> ClipMode {
        self.state.clip_mode
    }

    pub fn settings_dirty(&self) -> bool {
        self.settings_dirty
    }
}

impl<I: ContinuousInput, O: VoltageSink> Module for SingleModule<I, O> {
    type Knob = I;

    fn tick(&mut self, now_ms: u32) {
        self.channel
            .update(now_ms, &mut self.frequency_in, &mut self.curve_in);
    }

    fn press_button(&mut self) {
        self.state.clip_mode = self.state.clip_mode.next();
        self.channel.set_clip_mode(self.state.clip_mode);
        self.settings_dirty = true;
    }

    fn knob_count(&self) -> usize {
        2
    }

    fn knob_mut(&mut self, index: usize) -> Option<&mut I> {
        match index {
            0 => Some(&mut self.frequency_in),
            1 => Some(&mut self.curve_in),
            _ => None,
        }
    }

    fn views(&self) -> Vec<ChannelView<'_>> {
        let config = self.channel.config();
        vec![ChannelView {
            label: "CV1",
            frequency: self.channel.frequency(),
            curve_k: Some(self.channel.curve_k()),
            clip_mode: Some(self.channel.clip_mode()),
            last_output: self.channel.last_output(),
            min_voltage: config.min_voltage,
            max_voltage: config.max_voltage,
            history: self.channel.history(),
        }]
    }

    fn save_if_dirty(&mut self) -> config::Result<()> {
        if !self.settings_dirty {
            return Ok(());
        }
        // Cleared before saving; a failed save is not retried
        self.settings_dirty = false;
        match &self.store {
            Some(store) => store.save_state(&self.state),
            None => Ok(()),
        }
    }
}
