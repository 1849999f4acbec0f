//! # Analysis Pipeline Module
//!
//! Runs one full analysis cycle per captured sample window: spectral
//! transform, dominant-frequency extraction, and note mapping, packaged
//! as a single [`PitchReading`].
//!
//! The pipeline is invoked synchronously and to completion by the capture
//! collaborator's callback context. It holds no mutable state — only the
//! immutable configuration and note table it was constructed with — and
//! performs no threading or locking of its own.

use crate::error::{Error, Result};
use crate::tuning::NoteTable;
use crate::{PitchReading, fft, pitch};

/// Fixed analysis parameters, validated once at startup.
///
/// A broken configuration is unrecoverable, so the constructor rejects it
/// before any audio flows; the per-cycle path never re-discovers it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    sample_rate: f64,
    window_size: usize,
}

impl AnalyzerConfig {
    /// Validates and builds an analysis configuration.
    ///
    /// # Arguments
    /// * `sample_rate` - Capture sample rate in Hz; positive and finite
    /// * `window_size` - Samples per captured window; a power of two
    ///
    /// # Returns
    /// * `Ok(config)` - Validated configuration
    /// * `Err(Error::InvalidSampleRate)` - Non-positive or non-finite rate
    /// * `Err(Error::InvalidWindowSize)` - Zero or non-power-of-two window
    pub fn new(sample_rate: f64, window_size: usize) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidSampleRate { sample_rate });
        }
        if window_size == 0 {
            return Err(Error::InvalidWindowSize {
                window_size,
                reason: "window size must be positive",
            });
        }
        if !window_size.is_power_of_two() {
            return Err(Error::InvalidWindowSize {
                window_size,
                reason: "window size must be a power of two",
            });
        }
        Ok(Self {
            sample_rate,
            window_size,
        })
    }

    /// Capture sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Samples per captured window.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Duration of one window in seconds.
    ///
    /// One analysis cycle must complete within this duration to keep up
    /// with the capture callback; enforcing that is the caller's job.
    pub fn window_duration_secs(&self) -> f64 {
        self.window_size as f64 / self.sample_rate
    }
}

impl Default for AnalyzerConfig {
    /// 44.1 kHz capture with 2048-sample windows (~46 ms per window).
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            window_size: 2048,
        }
    }
}

/// The pitch pipeline: transforms, extracts, and maps one sample window
/// per call.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    table: NoteTable,
}

impl Analyzer {
    /// Builds an analyzer from an already-validated configuration and
    /// note table.
    pub fn new(config: AnalyzerConfig, table: NoteTable) -> Self {
        Self { config, table }
    }

    /// The configuration this analyzer was built with.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The note table this analyzer maps against.
    pub fn table(&self) -> &NoteTable {
        &self.table
    }

    /// Analyzes one captured sample window.
    ///
    /// Fails fast: an error from the transform or the extractor
    /// propagates unchanged and no partial reading is produced. A window
    /// with no dominant component yields [`PitchReading::silent`].
    ///
    /// # Arguments
    /// * `samples` - Real-valued window of exactly `window_size` samples
    ///
    /// # Returns
    /// * `Ok(reading)` - The reading for this cycle
    /// * `Err(Error::InvalidInputSize)` - Window length mismatch; skip the
    ///   buffer and retry on the next one
    pub fn analyze(&self, samples: &[f64]) -> Result<PitchReading> {
        if samples.len() != self.config.window_size {
            return Err(Error::InvalidInputSize {
                len: samples.len(),
            });
        }

        let spectrum = fft::transform_real(samples)?;
        let dominant =
            pitch::dominant_frequency(&spectrum, self.config.sample_rate, self.config.window_size)?;

        let reading = match dominant {
            Some(frequency) => {
                let mapping = self.table.map(frequency);
                PitchReading {
                    dominant_frequency: Some(frequency),
                    left_note: mapping.left,
                    center_note: Some(mapping.center),
                    right_note: mapping.right,
                    offset_index: mapping.offset_index,
                }
            }
            None => PitchReading::silent(),
        };
        Ok(reading)
    }
}
