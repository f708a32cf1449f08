//! Project management: loading workspaces from disk.

mod file_loader;
mod workspace_loader;

use std::io;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use thiserror::Error;

use crate::hir::AnalysisError;

pub use file_loader::{SourceDir, collect_source_dirs};
pub use workspace_loader::WorkspaceLoader;

/// Which files and directories a workspace load picks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Source file extension, without the dot
    pub extension: SmolStr,
    /// Directory names that are never entered
    pub skip_dirs: Vec<SmolStr>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extension: SmolStr::new_static("go"),
            skip_dirs: vec![SmolStr::new_static("vendor"), SmolStr::new_static("testdata")],
        }
    }
}

impl LoaderConfig {
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension.as_str())
    }

    /// Hidden directories are always skipped.
    pub fn skips_dir(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        name.starts_with('.') || self.skip_dirs.iter().any(|skip| skip.as_str() == name)
    }
}

/// Errors from loading a workspace.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Directory not found: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl LoadError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
