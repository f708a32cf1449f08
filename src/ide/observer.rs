//! Injectable tracing hook for linkname resolution.
//!
//! The resolver never logs on its own. Callers pass a [`ResolveObserver`]
//! and decide what to do with each step: drop it ([`NoopObserver`]),
//! forward it to `tracing` ([`TracingObserver`]) or record it in tests
//! (any `Fn(&ResolveEvent)` closure).

use crate::base::{FileId, LineCol};
use crate::hir::{AnalysisError, UnitId, UnitPath};

use super::linkname::LinknameTarget;

/// One step of a resolution request.
#[derive(Debug)]
pub enum ResolveEvent<'a> {
    /// The file does not import `unsafe`, so directives are ignored.
    MissingUnsafeImport { file: FileId },
    /// No body-less function name at the position.
    NoDeclaration { position: LineCol },
    /// The position names a body-less function.
    Declaration { name: &'a str },
    /// No directive names the declaration.
    NoDirective { local: &'a str },
    /// The directive's target reference has no `.`.
    MalformedTarget { reference: &'a str },
    /// A directive was found and parsed.
    Directive {
        local: &'a str,
        target: &'a LinknameTarget,
    },
    /// A unit was dequeued during the dependency search.
    UnitVisited { id: &'a UnitId },
    /// A dependency has no metadata and is skipped.
    UnitMissing { id: &'a UnitId },
    /// The target unit is not reachable from the origin.
    Unreachable { path: &'a UnitPath },
    /// Full analysis failed with a non-fatal error.
    AnalysisFailed {
        id: &'a UnitId,
        error: &'a AnalysisError,
    },
    /// Full analysis returned a number of results other than one.
    AnalysisAmbiguous { id: &'a UnitId, results: usize },
    /// The analyzed unit has no function with the target name.
    NameNotFound { id: &'a UnitId, name: &'a str },
    /// The match could not be mapped to a location.
    MappingFailed { error: &'a AnalysisError },
}

pub trait ResolveObserver {
    fn on_event(&self, event: &ResolveEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ResolveObserver for NoopObserver {
    fn on_event(&self, _event: &ResolveEvent<'_>) {}
}

/// Forwards every event to `tracing` at `trace` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolveObserver for TracingObserver {
    fn on_event(&self, event: &ResolveEvent<'_>) {
        tracing::trace!(?event, "[LINKNAME]");
    }
}

impl<F> ResolveObserver for F
where
    F: Fn(&ResolveEvent<'_>),
{
    fn on_event(&self, event: &ResolveEvent<'_>) {
        self(event)
    }
}
