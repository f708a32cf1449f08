//! # linkscope
//!
//! Cross-unit resolution of `//go:linkname` directives: from a body-less
//! function carrying the directive to the function that implements it in
//! another compilation unit.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Directive extraction, unit search, goto-linkname
//!   ↓
//! project   → Workspace loading into an AnalysisHost
//!   ↓
//! hir       → Units, parsed files and the Snapshot interface, Salsa queries
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (FileId, TextRange, LineCol)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → project → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, line/column conversion
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// High-level IR: units, parsed files and Salsa queries
pub mod hir;

/// IDE features: directive extraction and goto-linkname
pub mod ide;

/// Project management: workspace loading
pub mod project;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, LineRange, TextRange, TextSize};
