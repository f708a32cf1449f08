//! Go-to-definition for linknamed declarations.

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, LineCol};
use crate::hir::{AnalysisError, Location, Snapshot};

use super::linkname::{LinknameLocator, extract_directive};
use super::observer::ResolveObserver;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// The file containing the target.
    pub file: FileId,
    pub uri: SmolStr,
    /// Start line (0-indexed).
    pub start_line: u32,
    /// Start column (0-indexed).
    pub start_col: u32,
    /// End line (0-indexed).
    pub end_line: u32,
    /// End column (0-indexed).
    pub end_col: u32,
    /// The symbol name.
    pub name: SmolStr,
}

impl GotoTarget {
    pub fn new(location: Location, name: SmolStr) -> Self {
        Self {
            file: location.file,
            uri: location.uri,
            start_line: location.range.start.line,
            start_col: location.range.start.col,
            end_line: location.range.end.line,
            end_col: location.range.end.col,
            name,
        }
    }
}

/// Jump from a body-less, linknamed function to the function implementing it.
///
/// # Arguments
/// * `snapshot` - The workspace to search
/// * `file` - The file containing the cursor
/// * `line` - Cursor line (0-indexed)
/// * `col` - Cursor column (0-indexed)
///
/// # Returns
/// Zero or one target. Errors are only returned for cancellation and I/O
/// failures; everything else is an empty result.
pub fn goto_linkname<S: Snapshot + ?Sized>(
    snapshot: &S,
    file: FileId,
    line: u32,
    col: u32,
    cancel: &CancellationToken,
    observer: &dyn ResolveObserver,
) -> Result<GotoResult, AnalysisError> {
    let Some(parsed) = non_fatal(snapshot.parse_file(file))? else {
        return Ok(GotoResult::empty());
    };
    let Some(target) = extract_directive(&parsed, LineCol::new(line, col), observer) else {
        return Ok(GotoResult::empty());
    };

    // Search from the narrowest unit containing the file
    let Some(metas) = non_fatal(snapshot.metadata_for_file(file))? else {
        return Ok(GotoResult::empty());
    };
    let Some(origin) = metas.first() else {
        return Ok(GotoResult::empty());
    };

    let location = LinknameLocator::new(snapshot)
        .with_observer(observer)
        .with_cancellation(cancel.clone())
        .locate(origin, &target)?;

    Ok(location
        .map(|location| GotoResult::single(GotoTarget::new(location, target.name.clone())))
        .unwrap_or_else(GotoResult::empty))
}

fn non_fatal<T>(result: Result<T, AnalysisError>) -> Result<Option<T>, AnalysisError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_fatal() => Err(error),
        Err(_) => Ok(None),
    }
}
