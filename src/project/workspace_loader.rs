use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::hir::{Snapshot, UnitId, UnitMetadata};
use crate::ide::AnalysisHost;

use super::file_loader::{self, SourceDir};
use super::{LoadError, LoaderConfig};

/// Loads a directory tree into an [`AnalysisHost`].
///
/// Every directory holding source files becomes one unit. The unit path is
/// the directory's path relative to the root, `/`-separated; files directly
/// in the root form a unit named after the root directory. Imports naming
/// another loaded unit become dependency edges.
#[derive(Debug, Default)]
pub struct WorkspaceLoader {
    config: LoaderConfig,
}

struct PendingUnit {
    path: SmolStr,
    files: Vec<FileId>,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load all source files below `path` and register one unit per
    /// directory. Returns the ids of the registered units.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<Vec<UnitId>, LoadError> {
        let root = path.into();
        if !root.is_dir() {
            return Err(LoadError::NotADirectory(root));
        }

        let dirs = file_loader::collect_source_dirs(&root, &self.config)?;
        let mut pending = Vec::with_capacity(dirs.len());

        for SourceDir { dir, files } in dirs {
            let texts = file_loader::read_files(&files)?;
            let ids = files
                .iter()
                .zip(&texts)
                .map(|(file, text)| host.set_file_content(&file.to_string_lossy(), text))
                .collect();
            pending.push(PendingUnit {
                path: unit_path(&root, &dir),
                files: ids,
            });
        }

        let known: FxHashSet<&str> = pending.iter().map(|u| u.path.as_str()).collect();
        let analysis = host.analysis();
        let mut units = Vec::with_capacity(pending.len());

        for unit in &pending {
            let mut metadata = UnitMetadata::new(unit.path.clone());
            for &file in &unit.files {
                metadata = metadata.with_file(file);
                let parsed = analysis.parse_file(file)?;
                let tree = parsed.tree();
                if let Some(name) = tree.package_name() {
                    metadata = metadata.with_name(name);
                }
                for import in tree.imports().filter_map(|spec| spec.path()) {
                    if import != unit.path && known.contains(import.as_str()) {
                        metadata = metadata.with_dep(import);
                    }
                }
            }
            tracing::debug!(
                "Loaded unit {} ({} files, {} deps)",
                metadata.path,
                metadata.files.len(),
                metadata.deps.len()
            );
            units.push(metadata);
        }

        let ids = units.iter().map(|u| u.id.clone()).collect();
        for metadata in units {
            host.set_unit(metadata);
        }
        Ok(ids)
    }
}

fn unit_path(root: &Path, dir: &Path) -> SmolStr {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        root.file_name()
            .map(|n| SmolStr::new(n.to_string_lossy()))
            .unwrap_or_else(|| SmolStr::new("."))
    } else {
        SmolStr::new(segments.join("/"))
    }
}
