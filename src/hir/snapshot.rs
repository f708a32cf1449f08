//! The collaborator interface the resolver runs against.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::base::FileId;

use super::{AnalysisError, AnalyzedUnit, ParsedFile, UnitId, UnitMetadata};

/// A consistent, read-only view of the workspace.
///
/// Implementations own parsing, the unit index and full analysis; the
/// resolver only ever calls these methods. [`Analysis`](crate::ide::Analysis)
/// is the implementation shipped with this crate.
pub trait Snapshot {
    /// Parse one file, comments retained.
    fn parse_file(&self, file: FileId) -> Result<Arc<ParsedFile>, AnalysisError>;

    /// Units that include `file`, narrowest first.
    fn metadata_for_file(&self, file: FileId) -> Result<Vec<Arc<UnitMetadata>>, AnalysisError>;

    /// Metadata for a known unit.
    fn metadata(&self, id: &UnitId) -> Option<Arc<UnitMetadata>>;

    /// Fully analyze a unit. May yield several results (one per build
    /// variant) or none.
    ///
    /// Implementations should return [`AnalysisError::Cancelled`] once
    /// `cancel` fires.
    fn full_analysis(
        &self,
        id: &UnitId,
        cancel: &CancellationToken,
    ) -> Result<Vec<Arc<AnalyzedUnit>>, AnalysisError>;
}
