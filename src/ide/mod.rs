//! IDE features - High-level APIs for LSP handlers.
//!
//! This module provides the interface between the unit model (HIR)
//! and an LSP server. Each public function corresponds to an LSP request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at LSP boundary
//! 3. **Injected collaborators**: Everything goes through [`Snapshot`](crate::hir::Snapshot)
//!
//! ## Usage
//!
//! ```ignore
//! use linkscope::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("time/sleep.go", source);
//!
//! let analysis = host.analysis();
//! let result = analysis.goto_linkname(file, 12, 6)?;
//! ```

mod analysis;
mod goto;
pub mod linkname;
mod observer;

pub use analysis::{Analysis, AnalysisHost};
pub use goto::{GotoResult, GotoTarget, goto_linkname};
pub use linkname::{
    LINKNAME_DIRECTIVE, LinknameDirective, LinknameLocator, LinknameTarget, UNSAFE_IMPORT,
    extract_directive,
};
pub use observer::{NoopObserver, ResolveEvent, ResolveObserver, TracingObserver};
