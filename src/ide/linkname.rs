//! `//go:linkname` resolution.
//!
//! A body-less function such as
//!
//! ```text
//! import _ "unsafe"
//!
//! //go:linkname nanotime runtime.nanotime
//! func nanotime() int64
//! ```
//!
//! is implemented by another unit. Resolution runs in two steps:
//!
//! 1. [`extract_directive`] checks that the position is on the name of such a
//!    function and reads the directive naming it, yielding a
//!    [`LinknameTarget`] (`runtime`, `nanotime`).
//! 2. [`LinknameLocator::locate`] searches the dependency graph breadth-first
//!    for the target unit, analyzes it and finds the defining function.
//!
//! Every "nothing here" outcome is `None`. Only cancellation and I/O errors
//! from the [`Snapshot`] escape as `Err`.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, LineCol, TextSize};
use crate::hir::{
    AnalysisError, AnalyzedUnit, Location, ParsedFile, Snapshot, UnitId, UnitMetadata, UnitPath,
};
use crate::parser::{AstToken, FuncDecl, Item};

use super::observer::{NoopObserver, ResolveEvent, ResolveObserver};

/// Keyword opening a linkname directive.
pub const LINKNAME_DIRECTIVE: &str = "//go:linkname";

/// Import that makes linkname directives legal in a file.
pub const UNSAFE_IMPORT: &str = "unsafe";

/// The symbol a linkname directive points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinknameTarget {
    pub path: UnitPath,
    pub name: SmolStr,
}

impl LinknameTarget {
    /// Split a target reference such as `internal/poll.runtime_Semacquire`
    /// at its last `.`.
    ///
    /// Returns `None` if there is no `.` or either side is empty.
    pub fn parse(reference: &str) -> Option<Self> {
        let (path, name) = reference.rsplit_once('.')?;
        if path.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            path: UnitPath::new(path),
            name: SmolStr::new(name),
        })
    }
}

/// A `//go:linkname local target` comment, split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinknameDirective {
    pub local: SmolStr,
    pub reference: SmolStr,
}

impl LinknameDirective {
    /// Parse the text of a line comment.
    ///
    /// Exactly three whitespace-separated fields are required, the first being
    /// [`LINKNAME_DIRECTIVE`]. The two-field form only exports a symbol and
    /// carries no target, so it yields `None`.
    pub fn parse(comment: &str) -> Option<Self> {
        let mut fields = comment.split_whitespace();
        if fields.next()? != LINKNAME_DIRECTIVE {
            return None;
        }
        let local = fields.next()?;
        let reference = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            local: SmolStr::new(local),
            reference: SmolStr::new(reference),
        })
    }
}

// ============================================================================
// DIRECTIVE EXTRACTOR
// ============================================================================

/// Find the linkname target of the body-less function named at `position`.
///
/// `position` is 0-indexed. It counts as on the name from the first
/// character through the position just after the last one.
pub fn extract_directive(
    file: &ParsedFile,
    position: LineCol,
    observer: &dyn ResolveObserver,
) -> Option<LinknameTarget> {
    if !file.imports(UNSAFE_IMPORT) {
        observer.on_event(&ResolveEvent::MissingUnsafeImport { file: file.file() });
        return None;
    }

    let tree = file.tree();
    let local = file
        .line_index()
        .offset(position)
        .and_then(|offset| tree.items().find_map(|item| linkable_name_at(&item, offset)));
    let Some(local) = local else {
        observer.on_event(&ResolveEvent::NoDeclaration { position });
        return None;
    };
    observer.on_event(&ResolveEvent::Declaration { name: &local });

    let directive = tree
        .comments()
        .filter(|c| c.is_line())
        .filter_map(|c| LinknameDirective::parse(c.text()))
        .find(|d| d.local == local);
    let Some(directive) = directive else {
        observer.on_event(&ResolveEvent::NoDirective { local: &local });
        return None;
    };

    let Some(target) = LinknameTarget::parse(&directive.reference) else {
        observer.on_event(&ResolveEvent::MalformedTarget {
            reference: &directive.reference,
        });
        return None;
    };
    observer.on_event(&ResolveEvent::Directive {
        local: &local,
        target: &target,
    });
    Some(target)
}

/// Name of `item` if it can carry an outgoing directive and its name covers
/// `offset`.
fn linkable_name_at(item: &Item, offset: TextSize) -> Option<SmolStr> {
    match item {
        Item::Func(func) => {
            if func.body().is_some() || func.is_method() {
                return None;
            }
            let name = func.name()?;
            name.range().contains_inclusive(offset).then(|| name.text())
        }
        // Grouped declarations are not linkname sources.
        Item::Gen(_) | Item::Import(_) => None,
    }
}

// ============================================================================
// CROSS-UNIT LOCATOR
// ============================================================================

/// Finds the declaration a [`LinknameTarget`] refers to.
///
/// ```ignore
/// let location = LinknameLocator::new(&analysis)
///     .with_observer(&TracingObserver)
///     .with_cancellation(token)
///     .locate(&origin, &target)?;
/// ```
pub struct LinknameLocator<'a, S: Snapshot + ?Sized> {
    snapshot: &'a S,
    observer: &'a dyn ResolveObserver,
    cancel: CancellationToken,
}

impl<'a, S: Snapshot + ?Sized> LinknameLocator<'a, S> {
    pub fn new(snapshot: &'a S) -> Self {
        Self {
            snapshot,
            observer: &NoopObserver,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ResolveObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Locate the function `target` names, searching from `origin`.
    pub fn locate(
        &self,
        origin: &UnitMetadata,
        target: &LinknameTarget,
    ) -> Result<Option<Location>, AnalysisError> {
        let Some(id) = self.find_unit(origin, &target.path)? else {
            self.observer
                .on_event(&ResolveEvent::Unreachable { path: &target.path });
            return Ok(None);
        };

        self.check_cancelled()?;
        let units = match self.snapshot.full_analysis(&id, &self.cancel) {
            Ok(units) => units,
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                self.observer.on_event(&ResolveEvent::AnalysisFailed {
                    id: &id,
                    error: &error,
                });
                return Ok(None);
            }
        };
        let [unit] = units.as_slice() else {
            self.observer.on_event(&ResolveEvent::AnalysisAmbiguous {
                id: &id,
                results: units.len(),
            });
            return Ok(None);
        };

        let Some((file, func)) = find_function(unit, &target.name) else {
            self.observer.on_event(&ResolveEvent::NameNotFound {
                id: &id,
                name: &target.name,
            });
            return Ok(None);
        };

        match unit.map_range(file, func.focus_range()) {
            Ok(location) => Ok(Some(location)),
            Err(error) => {
                self.observer
                    .on_event(&ResolveEvent::MappingFailed { error: &error });
                Ok(None)
            }
        }
    }

    /// Breadth-first search of the dependency graph for the unit at `path`.
    ///
    /// Units are marked visited when enqueued, so each is fetched at most once.
    fn find_unit(
        &self,
        origin: &UnitMetadata,
        path: &UnitPath,
    ) -> Result<Option<UnitId>, AnalysisError> {
        let mut seen: FxHashSet<UnitId> = FxHashSet::default();
        seen.insert(origin.id.clone());
        let mut queue: VecDeque<Arc<UnitMetadata>> = VecDeque::new();
        queue.push_back(Arc::new(origin.clone()));

        while let Some(meta) = queue.pop_front() {
            self.check_cancelled()?;
            self.observer
                .on_event(&ResolveEvent::UnitVisited { id: &meta.id });

            if meta.path == *path {
                return Ok(Some(meta.id.clone()));
            }

            for dep in meta.deps.values() {
                if !seen.insert(dep.clone()) {
                    continue;
                }
                match self.snapshot.metadata(dep) {
                    Some(dep_meta) => queue.push_back(dep_meta),
                    None => self.observer.on_event(&ResolveEvent::UnitMissing { id: dep }),
                }
            }
        }

        Ok(None)
    }

    fn check_cancelled(&self) -> Result<(), AnalysisError> {
        if self.cancel.is_cancelled() {
            Err(AnalysisError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// First receiver-less function named `name`, in file then declaration order.
fn find_function(unit: &AnalyzedUnit, name: &str) -> Option<(FileId, FuncDecl)> {
    unit.declarations().find_map(|(file, item)| match item {
        Item::Func(func) if !func.is_method() && func.name().is_some_and(|n| n.text() == name) => {
            Some((file.file(), func))
        }
        Item::Func(_) | Item::Gen(_) | Item::Import(_) => None,
    })
}
