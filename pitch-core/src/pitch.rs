//! # Dominant Frequency Module
//!
//! Reduces a frequency-domain spectrum to the single frequency of its
//! strongest component, or to an explicit "no pitch" result when the
//! window carries no dominant component.

use num_complex::Complex;

use crate::error::{Error, Result};

/// Finds the frequency of the strongest spectral component.
///
/// Only the lower half of the spectrum is scanned, since the upper half
/// is redundant for real-valued input. The scan is deterministic: on an
/// exact magnitude tie the first (lowest) bin wins.
///
/// A window with no dominant component leaves bin 0 as the winner —
/// either because every magnitude is zero (silence) or because the
/// buffer is dominated by its DC offset. Neither carries a pitch, so
/// both yield `Ok(None)` rather than a fabricated 0 Hz reading.
///
/// # Arguments
/// * `spectrum` - Complex frequency spectrum of the analyzed window
/// * `sample_rate` - Capture sample rate in Hz
/// * `window_size` - Transform length actually used; must equal `spectrum.len()`
///
/// # Returns
/// * `Ok(Some(frequency))` - Frequency of the dominant component in Hz
/// * `Ok(None)` - No dominant component detected
/// * `Err(Error::InvalidWindowSize)` - Zero or mismatched window size
/// * `Err(Error::InvalidSampleRate)` - Non-positive or non-finite sample rate
pub fn dominant_frequency(
    spectrum: &[Complex<f64>],
    sample_rate: f64,
    window_size: usize,
) -> Result<Option<f64>> {
    if window_size == 0 {
        return Err(Error::InvalidWindowSize {
            window_size,
            reason: "window size must be positive",
        });
    }
    if window_size != spectrum.len() {
        return Err(Error::InvalidWindowSize {
            window_size,
            reason: "window size must equal the transform length",
        });
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(Error::InvalidSampleRate { sample_rate });
    }

    let mut max_magnitude = 0.0;
    let mut max_index = 0;
    for (i, bin) in spectrum.iter().take(spectrum.len() / 2).enumerate() {
        let magnitude = bin.norm();
        // Strictly greater keeps the first bin on exact ties.
        if magnitude > max_magnitude {
            max_magnitude = magnitude;
            max_index = i;
        }
    }

    if max_index == 0 {
        return Ok(None);
    }
    Ok(Some(max_index as f64 * sample_rate / window_size as f64))
}
