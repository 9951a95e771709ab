//! Control-rate helpers: knob scaling, rates and periods.

/*
Control-Rate Signals
====================

A random CV is an LFO without a fixed waveform. The same vocabulary applies.

Vocabulary
----------

  control-rate    Frequencies well below audio: ~0.001 Hz to ~10 Hz here.
                  The output moves parameters, it is never listened to.

  segment         One move from the current level to the next random level.
                  Its length is one period of the rate.

  period          Time for one segment. At 0.5 Hz: 1 / 0.5 = 2 s = 2000 ms.

  normalized      A knob or CV reading in 0.0..1.0 ("percent"). Inputs are
  input           always read in this form and scaled here.

  bipolar         -1.0..+1.0. The curve shape `k` is bipolar: a knob at
                  noon gives k = 0.


Knob Scaling
------------

Every continuous control is a straight-line map from 0..1:

    frequency = percent * (max_hz - min_hz) + min_hz
    k         = percent * 2 - 1

    percent   frequency (0.01..1 Hz)   k
    0.0       0.01 Hz                  -1.0
    0.5       0.505 Hz                  0.0
    1.0       1.0 Hz                   +1.0
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Convert unipolar signal (0.0 to 1.0) to bipolar (-1.0 to +1.0).
///
/// This is how a curve knob becomes a shape parameter.
#[inline]
pub fn unipolar_to_bipolar(unipolar: f32) -> f32 {
    (unipolar * 2.0) - 1.0
}

/// Scale a normalized reading into `[min_hz, max_hz]`.
///
/// # Example
/// ```
/// use bezier_cv::dsp::lfo::frequency_from_percent;
/// let hz = frequency_from_percent(0.5, 0.01, 1.0);
/// assert!((hz - 0.505).abs() < 1e-6);
/// ```
#[inline]
pub fn frequency_from_percent(percent: f32, min_hz: f32, max_hz: f32) -> f32 {
    percent * (max_hz - min_hz) + min_hz
}

/// Segment length in milliseconds for a rate in Hz.
///
/// # Example
/// ```
/// use bezier_cv::dsp::lfo::period_ms_from_frequency;
/// assert!((period_ms_from_frequency(0.5) - 2000.0).abs() < 1e-3);
/// ```
#[inline]
pub fn period_ms_from_frequency(frequency_hz: f32) -> f32 {
    1000.0 / frequency_hz
}

/// Map a unipolar curve level into a voltage window.
#[inline]
pub fn scale_to_window(level: f32, min_voltage: f32, max_voltage: f32) -> f32 {
    level * (max_voltage - min_voltage) + min_voltage
}
