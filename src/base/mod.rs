//! Foundation types for the linkscope toolchain.
//!
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`LineRange`] - Line/column ranges handed back to editors
//!
//! This module has NO dependencies on other linkscope modules.

mod file_id;
mod position;
mod span;

pub use file_id::FileId;
pub use position::LineRange;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
