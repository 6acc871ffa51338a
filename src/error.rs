//! Error types for barcode encoding and document assembly.

use thiserror::Error;

/// Primary error type for label generation.
///
/// All failures are surfaced before any output byte is produced; generation
/// is all-or-nothing in memory.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    /// A character outside the Code 39 alphabet (case sensitive; the `*`
    /// sentinel is appended by the encoder and rejected as data).
    #[error("unsupported Code 39 character: {0:?}")]
    UnsupportedCharacter(char),

    /// Requested labels-per-page count that cannot form pages.
    #[error("invalid labels-per-page count: {0}")]
    InvalidLabelCount(usize),
}
