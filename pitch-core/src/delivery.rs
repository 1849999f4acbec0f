//! # Reading Delivery Module
//!
//! Hand-off of analysis results to the presentation collaborator. The
//! pipeline produces at most one reading per cycle and stale readings
//! have no value, so delivery is a single slot: publishing replaces
//! whatever the consumer has not yet read. Memory stays bounded and the
//! consumer always observes the most recent reading.

use std::sync::Mutex;

use crossbeam_channel::{Receiver, select};

use crate::PitchReading;
use crate::analysis::Analyzer;

/// Single-slot cell holding the most recent reading.
///
/// Single-producer/single-consumer by convention, though nothing breaks
/// with more of either.
#[derive(Debug, Default)]
pub struct ReadingCell {
    slot: Mutex<Option<PitchReading>>,
}

impl ReadingCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a reading, replacing any value the consumer has not
    /// read yet.
    pub fn publish(&self, reading: PitchReading) {
        *self.lock() = Some(reading);
    }

    /// Removes and returns the most recent reading, if any.
    pub fn take(&self) -> Option<PitchReading> {
        self.lock().take()
    }

    /// Returns a copy of the most recent reading without consuming it.
    pub fn latest(&self) -> Option<PitchReading> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<PitchReading>> {
        // The slot holds plain data; recover it from a poisoned lock.
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Runs the analysis side of the capture hand-off until the frame channel
/// closes or a shutdown signal arrives.
///
/// Each received sample window is analyzed synchronously to completion
/// and the resulting reading published to `cell`. A window that fails
/// analysis is skipped and the stream continues with the next buffer.
/// The caller owns the thread this runs on; the core spawns nothing.
///
/// # Arguments
/// * `frames` - Sample windows from the capture collaborator
/// * `shutdown` - Any message (or disconnect) stops the loop
/// * `analyzer` - The configured pitch pipeline
/// * `cell` - Destination slot read by the presentation collaborator
pub fn run_analysis_loop(
    frames: Receiver<Vec<f64>>,
    shutdown: Receiver<()>,
    analyzer: &Analyzer,
    cell: &ReadingCell,
) {
    eprintln!("[ANALYSIS] Entering analysis loop...");
    loop {
        select! {
            recv(frames) -> msg => match msg {
                Ok(window) => match analyzer.analyze(&window) {
                    Ok(reading) => cell.publish(reading),
                    Err(e) => {
                        eprintln!("[ANALYSIS] Skipping window: {}", e);
                    }
                },
                Err(_) => {
                    eprintln!("[ANALYSIS] Frame channel closed");
                    break;
                }
            },
            recv(shutdown) -> _ => {
                eprintln!("[ANALYSIS] Received shutdown signal");
                break;
            }
        }
    }
    eprintln!("[ANALYSIS] Analysis loop finished");
}
