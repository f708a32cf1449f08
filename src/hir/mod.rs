//! High-level IR (HIR) - compilation units and the analysis interface.
//!
//! ## Key Types
//!
//! - [`Snapshot`] - The collaborator interface the resolver queries
//! - [`RootDatabase`] - Salsa database memoizing parses
//! - [`ParsedFile`] - A parsed file with its line index
//! - [`UnitMetadata`] - A unit's identity, files and direct dependencies
//! - [`AnalyzedUnit`] - The fully analyzed form of a unit
//! - [`AnalysisError`] - Failures reported by collaborators
//!
//! ## Query Layers
//!
//! ```text
//! FileText(file)            ← INPUT: raw source text and URI
//!     │
//!     ▼
//! parse_file(file)          ← ParsedFile (per-file, memoized)
//!     │
//!     ▼
//! full_analysis(unit)       ← AnalyzedUnit (all files of one unit)
//!     │
//!     ▼
//! map_range(file, range)    ← Location
//! ```

mod db;
mod error;
mod file;
mod ids;
mod snapshot;
mod unit;

pub use db::{FileText, RootDatabase, parse_file};
pub use error::AnalysisError;
pub use file::ParsedFile;
pub use ids::{UnitId, UnitPath};
pub use snapshot::Snapshot;
pub use unit::{AnalyzedUnit, Location, UnitDiagnostic, UnitMetadata};
