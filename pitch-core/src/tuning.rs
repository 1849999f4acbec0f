//! # Musical Tuning Module
//!
//! This module maps detected frequencies onto a fixed reference table of
//! musical notes. It handles nearest-note lookup, the discretized
//! tuning-offset readout, and equal temperament table generation.
//!
//! ## Features
//! - Validated, immutable note tables (strictly ascending by frequency)
//! - Nearest-note mapping with explicit left/right neighbor handling
//! - 9-slot discretized sharp/flat offset between neighboring notes
//! - Equal temperament generation and a cached concert-pitch default
//! - Cent deviation calculations for continuous tuning readouts

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of discrete slots in the tuning-offset readout.
pub const STEP_COUNT: usize = 9;

/// Represents a single musical note with its name and frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Note name (e.g., "A4", "C#3")
    pub name: String,
    /// Frequency in Hz
    pub frequency: f64,
}

/// Where a detected frequency sits relative to the reference table.
///
/// `left` and `right` are the neighbors of the matched note. At the
/// edges of the table the missing neighbor is `None` and the offset is
/// disabled, so an out-of-range slot can never be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteMapping {
    /// Name of the note below the match, if the table has one.
    pub left: Option<String>,
    /// Name of the matched note.
    pub center: String,
    /// Name of the note above the match, if the table has one.
    pub right: Option<String>,
    /// Slot in `0..STEP_COUNT` locating the frequency between the two
    /// neighbors; `None` when either neighbor is missing.
    pub offset_index: Option<usize>,
}

/// An ordered reference table of notes, loaded once at startup and shared
/// read-only for the process lifetime.
///
/// Construction validates the table, so every method can assume a
/// non-empty, strictly ascending sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTable {
    notes: Vec<Note>,
}

/// Concert-pitch table for a standard 88-key range (A0 to C8), built once
/// on first use.
static CONCERT_A440: Lazy<NoteTable> = Lazy::new(|| {
    NoteTable::equal_temperament(440.0, 88)
        .expect("88-key equal temperament table is non-empty and ascending")
});

impl NoteTable {
    /// Builds a table from an ordered list of notes.
    ///
    /// # Arguments
    /// * `notes` - Notes sorted strictly ascending by frequency
    ///
    /// # Returns
    /// * `Ok(table)` - Validated table
    /// * `Err(Error::EmptyNoteTable)` - `notes` has no entries
    /// * `Err(Error::UnsortedNoteTable)` - frequencies are not strictly ascending
    pub fn new(notes: Vec<Note>) -> Result<Self> {
        if notes.is_empty() {
            return Err(Error::EmptyNoteTable);
        }
        for (i, pair) in notes.windows(2).enumerate() {
            if pair[1].frequency <= pair[0].frequency {
                return Err(Error::UnsortedNoteTable { index: i + 1 });
            }
        }
        Ok(Self { notes })
    }

    /// Generates an equal temperament table of `key_count` keys starting
    /// at A0, tuned so that A4 (the 49th key) has frequency `a4_hz`.
    ///
    /// The frequency of key `n` is `a4_hz * 2^((n - 48) / 12)`. Note names
    /// cycle through the twelve semitones starting at A; the octave number
    /// increments at each C.
    pub fn equal_temperament(a4_hz: f64, key_count: usize) -> Result<Self> {
        const NOTE_NAMES: [&str; 12] = [
            "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
        ];
        let mut notes = Vec::with_capacity(key_count);

        for i in 0..key_count {
            // A4 is the 49th key, which is index 48 in a 0-indexed loop.
            let frequency = a4_hz * 2.0_f64.powf((i as f64 - 48.0) / 12.0);

            let note_index = i % 12;
            // The octave changes at C.
            let octave = (i + 9) / 12;
            let name = format!("{}{}", NOTE_NAMES[note_index], octave);

            notes.push(Note { name, frequency });
        }
        Self::new(notes)
    }

    /// The standard 88-key table in which A4 is 440 Hz.
    ///
    /// This is a cached default, not required state: every mapping API
    /// takes the table by reference, so hosts are free to construct and
    /// pass their own.
    pub fn concert_a440() -> &'static NoteTable {
        &CONCERT_A440
    }

    /// The notes of the table, in ascending frequency order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes in the table. Always at least 1.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// The note at `index`, if it exists.
    pub fn note_at(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    /// Finds the table index of a note by name via linear scan.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.name == name)
    }

    /// Finds the index of the note closest to `frequency`.
    ///
    /// Linear scan over the table (tables are tens of entries). On an
    /// exact distance tie the first (lowest-index) note wins.
    pub fn nearest_index(&self, frequency: f64) -> usize {
        let (index, _) = self
            .notes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let diff_a = (a.frequency - frequency).abs();
                let diff_b = (b.frequency - frequency).abs();
                diff_a
                    .partial_cmp(&diff_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap(); // Safe: the table is validated non-empty.
        index
    }

    /// Maps a detected frequency to its nearest note, the note's
    /// neighbors, and the discretized tuning offset.
    ///
    /// At the lowest or highest table entry the missing neighbor is
    /// reported as `None` and the offset computation is disabled; interior
    /// matches always produce all three names and an offset slot.
    pub fn map(&self, dominant_frequency: f64) -> NoteMapping {
        let center = self.nearest_index(dominant_frequency);
        let left = (center > 0).then(|| &self.notes[center - 1]);
        let right = self.notes.get(center + 1);

        let offset_index = match (left, right) {
            (Some(left), Some(right)) => Some(offset_index(
                dominant_frequency,
                left.frequency,
                self.notes[center].frequency,
                right.frequency,
            )),
            _ => None,
        };

        NoteMapping {
            left: left.map(|note| note.name.clone()),
            center: self.notes[center].name.clone(),
            right: right.map(|note| note.name.clone()),
            offset_index,
        }
    }
}

/// Discretizes where `frequency` falls between the neighbors of its
/// matched center note.
///
/// The span from the left neighbor's midpoint to the right neighbor's
/// midpoint is divided into [`STEP_COUNT`] slots; slot `STEP_COUNT / 2`
/// brackets the center note itself. Extreme inputs can push the raw slot
/// outside the readout, so the result is clamped to `0..STEP_COUNT`.
fn offset_index(frequency: f64, left: f64, center: f64, right: f64) -> usize {
    let midpoint_left = center - (center - left) / 2.0;
    let distance = frequency - midpoint_left;
    let total_span = right - left;
    let raw = (distance / (total_span / 2.0) * STEP_COUNT as f64).floor();
    raw.clamp(0.0, (STEP_COUNT - 1) as f64) as usize
}

/// Calculates the deviation of a frequency from a target in cents.
///
/// 100 cents is one semitone, 1200 cents one octave. Positive values
/// indicate sharpness, negative values flatness.
pub fn cents_deviation(frequency: f64, target_frequency: f64) -> f64 {
    1200.0 * (frequency / target_frequency).log2()
}
