/// Crate-level error type for the pitch analysis core.
///
/// The input-size kind is recoverable per cycle: the caller skips the
/// offending buffer and continues with the next one. The window-size,
/// sample-rate, and note-table kinds are configuration errors and are
/// rejected at startup construction, never discovered mid-stream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Sample window length is not usable for analysis (not a power of
    /// two, or not the configured window size).
    #[error("invalid input size: {len} samples")]
    InvalidInputSize { len: usize },

    /// Window size is zero, not a power of two, or does not match the
    /// spectrum it is applied to.
    #[error("invalid window size: {window_size} ({reason})")]
    InvalidWindowSize {
        window_size: usize,
        reason: &'static str,
    },

    /// Sample rate is zero, negative, or non-finite.
    #[error("invalid sample rate: {sample_rate} Hz")]
    InvalidSampleRate { sample_rate: f64 },

    /// The note table has no entries, so note mapping is impossible.
    #[error("note table is empty")]
    EmptyNoteTable,

    /// The note table is not sorted strictly ascending by frequency.
    #[error("note table is not strictly ascending at index {index}")]
    UnsortedNoteTable { index: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
