//! Module owners: what sits between the front panel and the channels.
//!
//! A module owns its knobs (and any smoothing on them), its channels, the
//! clip-mode button and the settings store. The polling loop only has to
//! call [`Module::tick`] with the clock reading, forward button presses and
//! ask for [`ChannelView`]s to draw.

use crate::{channel::History, config, dsp::ClipMode, io::ContinuousInput};

/// Single knob-controlled curve output with a clip-mode button.
pub mod single;
/// Two knob banks driving step and fixed-shape curve outputs.
pub mod multi;

pub use multi::MultiModule;
pub use single::SingleModule;

/// Read-only snapshot of one channel for the display.
pub struct ChannelView<'a> {
    pub label: &'static str,
    pub frequency: f32,
    /// Curve shape, `None` for step channels
    pub curve_k: Option<f32>,
    /// Active clip mode, `None` where it is fixed
    pub clip_mode: Option<ClipMode>,
    pub last_output: f32,
    pub min_voltage: f32,
    pub max_voltage: f32,
    pub history: &'a History,
}

impl ChannelView<'_> {
    /// One-line readout: rate, then shape and clip mode where they apply.
    pub fn status(&self) -> String {
        let mut text = format!("F {:.2}Hz", self.frequency);
        if let Some(k) = self.curve_k {
            text.push_str(&format!("  K {k:+.2}"));
        }
        if let Some(mode) = self.clip_mode {
            text.push_str("  ");
            text.push_str(mode.name());
        }
        text
    }
}

pub trait Module {
    type Knob: ContinuousInput;

    /// Advance every channel by one tick.
    fn tick(&mut self, now_ms: u32);

    /// Front-panel button, edge-triggered. Default: no button.
    fn press_button(&mut self) {}

    /// Number of knobs this module reads.
    fn knob_count(&self) -> usize;

    fn knob_mut(&mut self, index: usize) -> Option<&mut Self::Knob>;

    fn views(&self) -> Vec<ChannelView<'_>>;

    /// Persist settings changed since the last call.
    fn save_if_dirty(&mut self) -> config::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(history: &History) -> ChannelView<'_> {
        ChannelView {
            label: "CV1",
            frequency: 0.75,
            curve_k: Some(-0.25),
            clip_mode: Some(ClipMode::Fold),
            last_output: 3.0,
            min_voltage: 0.0,
            max_voltage: 10.0,
            history,
        }
    }

    #[test]
    fn status_for_curve_channel() {
        let history = History::new(4);
        assert_eq!(view(&history).status(), "F 0.75Hz  K -0.25  Fold");
    }

    #[test]
    fn status_for_step_channel() {
        let history = History::new(4);
        let step = ChannelView {
            curve_k: None,
            clip_mode: None,
            frequency: 2.0,
            ..view(&history)
        };
        assert_eq!(step.status(), "F 2.00Hz");
    }
}
