//! DC-coupled output through the default audio device
//!
//! The control loop pushes each channel's voltage into its own ring; the
//! audio callback drains the rings and holds the newest level on device
//! channel i as `volts / MAX_OUTPUT_VOLTAGE`. Only DC-coupled interfaces
//! pass the result on as usable CV.

use bezier_cv::{VoltageSink, MAX_OUTPUT_VOLTAGE};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};

/// Per-channel ring capacity, in control ticks.
const RING_CAPACITY: usize = 256;

/// A channel's output: nowhere, or one ring into the audio callback.
pub enum CvOut {
    Silent,
    Ring(Producer<f32>),
}

impl VoltageSink for CvOut {
    fn write_voltage(&mut self, volts: f32) {
        if let CvOut::Ring(tx) = self {
            tx.write_voltage(volts);
        }
    }
}

/// Running output stream. Audio stops when this is dropped.
pub struct DcOutput {
    _stream: cpal::Stream,
}

impl DcOutput {
    /// Open the default device and return one producer per channel.
    pub fn start(channel_count: usize) -> EyreResult<(Self, Vec<Producer<f32>>)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        let device_channels = config.channels() as usize;
        check_channel_count(device_channels)?;

        if device_channels < channel_count {
            log::warn!(
                "device has {device_channels} channels, outputs past that are dropped ({channel_count} requested)"
            );
        }
        log::info!(
            "audio out: {} Hz, {device_channels} channels",
            config.sample_rate().0
        );

        let (producers, mut consumers): (Vec<_>, Vec<_>) = (0..channel_count)
            .map(|_| RingBuffer::<f32>::new(RING_CAPACITY))
            .unzip();
        let mut levels = vec![0.0f32; channel_count];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for (level, rx) in levels.iter_mut().zip(consumers.iter_mut()) {
                    while let Ok(volts) = rx.pop() {
                        *level = volts;
                    }
                }
                for frame in data.chunks_mut(device_channels) {
                    for (ch, sample) in frame.iter_mut().enumerate() {
                        *sample = levels.get(ch).map_or(0.0, |v| v / MAX_OUTPUT_VOLTAGE);
                    }
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        Ok((Self { _stream: stream }, producers))
    }
}

/// Reject devices with no output channels before building a stream.
fn check_channel_count(device_channels: usize) -> EyreResult<()> {
    if device_channels == 0 {
        return Err(eyre!("default output device reports no channels"));
    }
    Ok(())
}
