//! # Spectral Transform Module
//!
//! This module converts a time-domain sample window into a frequency-domain
//! spectrum of equal length using a radix-2 decimation-in-time FFT.
//!
//! ## Features
//! - Recursive Cooley-Tukey transform for power-of-two windows
//! - Real-input convenience wrapper for capture-side sample buffers
//! - Lower-half magnitude extraction for spectrum display
//!
//! Bin `i` of the output represents the frequency `i * sample_rate / N`.
//! For real-valued input the upper half of the spectrum mirrors the lower
//! half (conjugate symmetry), so consumers only scan indices `0..N/2`.

use std::f64::consts::PI;

use num_complex::Complex;

use crate::error::{Error, Result};

/// Performs a forward FFT on a complex sample window.
///
/// The window length must be a power of two. The check happens once here
/// at the public boundary; on violation no partial work is performed.
///
/// # Arguments
/// * `samples` - Time-domain window of N complex samples, N a power of two
///
/// # Returns
/// * `Ok(spectrum)` - Complex frequency spectrum of length N
/// * `Err(Error::InvalidInputSize)` - N is zero or not a power of two
pub fn transform(samples: &[Complex<f64>]) -> Result<Vec<Complex<f64>>> {
    if !samples.len().is_power_of_two() {
        return Err(Error::InvalidInputSize { len: samples.len() });
    }
    Ok(transform_unchecked(samples))
}

/// Performs a forward FFT on a real sample window.
///
/// Capture layers deliver real-valued amplitudes; this widens them to
/// complex values with a zero imaginary part and transforms.
///
/// # Arguments
/// * `samples` - Time-domain window of N real samples, N a power of two
///
/// # Returns
/// * `Ok(spectrum)` - Complex frequency spectrum of length N
/// * `Err(Error::InvalidInputSize)` - N is zero or not a power of two
pub fn transform_real(samples: &[f64]) -> Result<Vec<Complex<f64>>> {
    let widened: Vec<Complex<f64>> = samples
        .iter()
        .map(|&sample| Complex::new(sample, 0.0))
        .collect();
    transform(&widened)
}

/// Recursive transform body. Length is already validated: every recursion
/// level halves a power of two, so only the public entry points check.
fn transform_unchecked(samples: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let n = samples.len();

    // End of recursion once we have only 1 sample.
    if n == 1 {
        return samples.to_vec();
    }

    let half = n / 2;

    // Split into the even-indexed and odd-indexed subsequences. The same
    // partition assignment is used in the combine step below.
    let mut even = Vec::with_capacity(half);
    let mut odd = Vec::with_capacity(half);
    for pair in samples.chunks_exact(2) {
        even.push(pair[0]);
        odd.push(pair[1]);
    }

    let even = transform_unchecked(&even);
    let odd = transform_unchecked(&odd);

    // Combine: out[k] = E[k] + w_k * O[k], out[k + n/2] = E[k] - w_k * O[k]
    // with w_k = exp(-2*pi*i*k/n). Adding pi to the angle flips the
    // twiddle's sign, so the upper half reuses the same product negated.
    let mut bins = vec![Complex::new(0.0, 0.0); n];
    for k in 0..half {
        let twiddle = Complex::from_polar(1.0, -2.0 * PI * k as f64 / n as f64) * odd[k];
        bins[k] = even[k] + twiddle;
        bins[k + half] = even[k] - twiddle;
    }
    bins
}

/// Calculates the magnitude vector of the lower half of a spectrum.
///
/// Due to conjugate symmetry only the first half of the spectrum is
/// physically meaningful for real-valued input, so that is all a host
/// needs for spectrum display.
///
/// # Arguments
/// * `spectrum` - Complex frequency spectrum from [`transform`]
///
/// # Returns
/// * `Vec<f64>` - Magnitudes of bins `0..N/2`
pub fn magnitudes(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum
        .iter()
        .take(spectrum.len() / 2)
        .map(|c| c.norm()) // .norm() is sqrt(re^2 + im^2)
        .collect()
}
