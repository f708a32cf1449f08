//! Error types for analysis requests.

use thiserror::Error;

use crate::base::{FileId, TextRange};

use super::UnitId;

/// Failures reported by the analysis collaborators.
///
/// The resolver distinguishes *fatal* errors (cancellation and I/O), which it
/// passes through to its caller untouched, from the rest, which only mean
/// "no result" for the request at hand.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The surrounding request was cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// IO error while reading sources.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not known to the snapshot.
    #[error("unknown file: {0}")]
    UnknownFile(FileId),

    /// The unit is not known to the snapshot.
    #[error("unknown unit: {0}")]
    UnknownUnit(UnitId),

    /// The unit could not be built.
    #[error("build of {unit} failed: {message}")]
    Build { unit: UnitId, message: String },

    /// A range does not fall inside the file it was mapped against.
    #[error("range {range:?} is outside {file}")]
    OffsetOutOfRange { file: FileId, range: TextRange },
}

impl AnalysisError {
    /// Whether the error must be propagated rather than treated as absence.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Io(_))
    }
}
