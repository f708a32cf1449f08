//! AnalysisHost and Analysis - state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. This pattern ensures consistent reads across multiple queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! let file = host.set_file_content("p/p.go", content);
//! host.set_unit(UnitMetadata::new("p").with_file(file).with_dep("runtime"));
//!
//! let analysis = host.analysis();
//! let result = analysis.goto_linkname(file, line, col)?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use salsa::Setter;
use tokio_util::sync::CancellationToken;

use crate::base::FileId;
use crate::hir::{
    AnalysisError, AnalyzedUnit, FileText, ParsedFile, RootDatabase, Snapshot, UnitId,
    UnitMetadata, parse_file,
};

use super::goto::{GotoResult, goto_linkname};
use super::observer::TracingObserver;

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()`, `remove_file()` and `set_unit()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    db: RootDatabase,
    files: IndexMap<FileId, FileText>,
    /// Map from file path to FileId
    file_id_map: HashMap<String, FileId>,
    /// Reverse map from FileId to file path
    file_path_map: HashMap<FileId, String>,
    units: IndexMap<UnitId, Arc<UnitMetadata>>,
    /// Units analyzed since the last change
    analyzed: RwLock<FxHashMap<UnitId, Arc<AnalyzedUnit>>>,
    next_file_id: u32,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self {
            db: RootDatabase::new(),
            files: IndexMap::new(),
            file_id_map: HashMap::new(),
            file_path_map: HashMap::new(),
            units: IndexMap::new(),
            analyzed: RwLock::new(FxHashMap::default()),
            next_file_id: 0,
        }
    }

    /// Set the content of a file, returning its id.
    ///
    /// The file keeps its id across updates.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> FileId {
        self.analyzed.get_mut().clear();

        if let Some(&file) = self.file_id_map.get(path) {
            if let Some(&file_text) = self.files.get(&file) {
                file_text.set_text(&mut self.db).to(content.to_string());
            }
            return file;
        }

        let file = FileId::new(self.next_file_id);
        self.next_file_id += 1;

        let file_text = FileText::new(&self.db, file, path_to_uri(path), content.to_string());
        self.files.insert(file, file_text);
        self.file_id_map.insert(path.to_string(), file);
        self.file_path_map.insert(file, path.to_string());
        file
    }

    /// Remove a file. Units listing it fail to analyze until updated.
    pub fn remove_file(&mut self, path: &str) -> Option<FileId> {
        let file = self.file_id_map.remove(path)?;
        self.file_path_map.remove(&file);
        self.files.shift_remove(&file);
        self.analyzed.get_mut().clear();
        Some(file)
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.file_id_map.contains_key(path)
    }

    /// Register or replace a unit.
    pub fn set_unit(&mut self, metadata: UnitMetadata) {
        self.analyzed.get_mut().clear();
        self.units.insert(metadata.id.clone(), Arc::new(metadata));
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn units(&self) -> impl Iterator<Item = &Arc<UnitMetadata>> + '_ {
        self.units.values()
    }

    /// Get a read-only snapshot for queries.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis { host: self }
    }
}

/// A read-only view of an [`AnalysisHost`].
pub struct Analysis<'a> {
    host: &'a AnalysisHost,
}

impl<'a> Analysis<'a> {
    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.host.file_id_map.get(path).copied()
    }

    pub fn file_path(&self, file: FileId) -> Option<&'a str> {
        self.host.file_path_map.get(&file).map(String::as_str)
    }

    /// Go to the implementation of the linknamed function at a position,
    /// tracing each resolution step.
    pub fn goto_linkname(
        &self,
        file: FileId,
        line: u32,
        col: u32,
    ) -> Result<GotoResult, AnalysisError> {
        self.goto_linkname_cancellable(file, line, col, &CancellationToken::new())
    }

    pub fn goto_linkname_cancellable(
        &self,
        file: FileId,
        line: u32,
        col: u32,
        cancel: &CancellationToken,
    ) -> Result<GotoResult, AnalysisError> {
        goto_linkname(self, file, line, col, cancel, &TracingObserver)
    }
}

impl Snapshot for Analysis<'_> {
    fn parse_file(&self, file: FileId) -> Result<Arc<ParsedFile>, AnalysisError> {
        let file_text = self
            .host
            .files
            .get(&file)
            .ok_or(AnalysisError::UnknownFile(file))?;
        Ok(parse_file(&self.host.db, *file_text))
    }

    fn metadata_for_file(&self, file: FileId) -> Result<Vec<Arc<UnitMetadata>>, AnalysisError> {
        if !self.host.files.contains_key(&file) {
            return Err(AnalysisError::UnknownFile(file));
        }
        let mut units: Vec<_> = self
            .host
            .units
            .values()
            .filter(|unit| unit.contains_file(file))
            .cloned()
            .collect();
        units.sort_by_key(|unit| unit.files.len());
        Ok(units)
    }

    fn metadata(&self, id: &UnitId) -> Option<Arc<UnitMetadata>> {
        self.host.units.get(id).cloned()
    }

    fn full_analysis(
        &self,
        id: &UnitId,
        cancel: &CancellationToken,
    ) -> Result<Vec<Arc<AnalyzedUnit>>, AnalysisError> {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        let metadata = self
            .host
            .units
            .get(id)
            .ok_or_else(|| AnalysisError::UnknownUnit(id.clone()))?;
        if metadata.files.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(unit) = self.host.analyzed.read().get(id) {
            return Ok(vec![Arc::clone(unit)]);
        }

        let mut files = Vec::with_capacity(metadata.files.len());
        for &file in &metadata.files {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            files.push(self.parse_file(file)?);
        }

        let unit = Arc::new(AnalyzedUnit::new(Arc::clone(metadata), files));
        self.host
            .analyzed
            .write()
            .insert(id.clone(), Arc::clone(&unit));
        Ok(vec![unit])
    }
}

/// Turn a workspace path into a `file://` URI.
fn path_to_uri(path: &str) -> String {
    if path.starts_with("file://") {
        path.to_string()
    } else if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}
