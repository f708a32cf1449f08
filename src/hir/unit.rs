//! Compilation units: metadata, analysis results and locations.

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{FileId, LineRange, TextRange};
use crate::parser::Item;

use super::{AnalysisError, ParsedFile, UnitId, UnitPath};

/// Metadata describing one compilation unit and its direct dependencies.
///
/// Dependencies are kept in insertion order so graph traversals are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMetadata {
    pub id: UnitId,
    pub path: UnitPath,
    /// Package name declared by the unit's files
    pub name: SmolStr,
    pub files: Vec<FileId>,
    /// Direct dependencies, keyed by import path
    pub deps: IndexMap<UnitPath, UnitId>,
}

impl UnitMetadata {
    /// Metadata for a unit whose id equals its path.
    pub fn new(path: impl Into<SmolStr>) -> Self {
        let path: SmolStr = path.into();
        let name = path.rsplit('/').next().map(SmolStr::new).unwrap_or_default();
        Self {
            id: UnitId::new(path.clone()),
            path: UnitPath::new(path),
            name,
            files: Vec::new(),
            deps: IndexMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<SmolStr>) -> Self {
        self.id = UnitId::new(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_file(mut self, file: FileId) -> Self {
        self.files.push(file);
        self
    }

    /// Add a dependency whose id equals its path.
    pub fn with_dep(mut self, path: impl Into<SmolStr>) -> Self {
        let path: SmolStr = path.into();
        self.deps.insert(UnitPath::new(path.clone()), UnitId::new(path));
        self
    }

    pub fn with_dep_id(mut self, path: impl Into<SmolStr>, id: UnitId) -> Self {
        self.deps.insert(UnitPath::new(path), id);
        self
    }

    pub fn contains_file(&self, file: FileId) -> bool {
        self.files.contains(&file)
    }
}

/// An externally addressable source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    pub uri: SmolStr,
    pub range: LineRange,
}

/// A problem found while analyzing a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDiagnostic {
    pub file: FileId,
    pub range: TextRange,
    pub message: String,
}

/// The result of fully analyzing one compilation unit.
#[derive(Debug)]
pub struct AnalyzedUnit {
    metadata: Arc<UnitMetadata>,
    files: Vec<Arc<ParsedFile>>,
    diagnostics: Vec<UnitDiagnostic>,
}

impl AnalyzedUnit {
    /// Analyze the given files as one unit.
    ///
    /// Collects syntax errors and reports files whose package clause
    /// disagrees with the first file's.
    pub fn new(metadata: Arc<UnitMetadata>, files: Vec<Arc<ParsedFile>>) -> Self {
        let mut diagnostics = Vec::new();
        let mut expected: Option<SmolStr> = None;

        for file in &files {
            diagnostics.extend(file.errors().iter().map(|e| UnitDiagnostic {
                file: file.file(),
                range: e.range,
                message: e.message.clone(),
            }));

            let tree = file.tree();
            let Some(clause) = tree.package_clause() else {
                continue;
            };
            let Some(name) = clause.name() else {
                continue;
            };
            match &expected {
                None => expected = Some(name.text()),
                Some(first) if *first != name.text() => diagnostics.push(UnitDiagnostic {
                    file: file.file(),
                    range: name.range(),
                    message: format!(
                        "package {} conflicts with package {} of {}",
                        name.text(),
                        first,
                        metadata.path
                    ),
                }),
                Some(_) => {}
            }
        }

        Self {
            metadata,
            files,
            diagnostics,
        }
    }

    pub fn metadata(&self) -> &UnitMetadata {
        &self.metadata
    }

    pub fn id(&self) -> &UnitId {
        &self.metadata.id
    }

    pub fn files(&self) -> &[Arc<ParsedFile>] {
        &self.files
    }

    pub fn diagnostics(&self) -> &[UnitDiagnostic] {
        &self.diagnostics
    }

    pub fn file(&self, file: FileId) -> Option<&ParsedFile> {
        self.files
            .iter()
            .find(|f| f.file() == file)
            .map(|f| f.as_ref())
    }

    /// Top-level declarations of every file, in file then declaration order.
    pub fn declarations(&self) -> impl Iterator<Item = (&ParsedFile, Item)> + '_ {
        self.files
            .iter()
            .flat_map(|f| f.tree().items().map(move |item| (f.as_ref(), item)).collect::<Vec<_>>())
    }

    /// Convert a byte range in one of this unit's files into a [`Location`].
    pub fn map_range(&self, file: FileId, range: TextRange) -> Result<Location, AnalysisError> {
        let parsed = self
            .file(file)
            .ok_or(AnalysisError::UnknownFile(file))?;
        let line_range = parsed
            .map_range(range)
            .ok_or(AnalysisError::OffsetOutOfRange { file, range })?;
        Ok(Location {
            file,
            uri: SmolStr::new(parsed.uri()),
            range: line_range,
        })
    }
}
