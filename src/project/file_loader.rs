//! Discovering and reading source files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::{LoadError, LoaderConfig};

/// Source files of one directory, sorted by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Walk `root` and collect every directory holding at least one source file.
///
/// Hidden directories and the configured skip list are not entered.
pub fn collect_source_dirs(root: &Path, config: &LoaderConfig) -> Result<Vec<SourceDir>, LoadError> {
    let mut dirs = Vec::new();
    collect_recursive(root, config, &mut dirs)?;
    Ok(dirs)
}

fn collect_recursive(
    dir: &Path,
    config: &LoaderConfig,
    results: &mut Vec<SourceDir>,
) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::io(dir, source))?;

    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::io(dir, source))?;
        let path = entry.path();

        if path.is_dir() {
            if !config.skips_dir(&path) {
                subdirs.push(path);
            }
        } else if config.is_source_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    subdirs.sort();

    if !files.is_empty() {
        results.push(SourceDir {
            dir: dir.to_path_buf(),
            files,
        });
    }
    for subdir in subdirs {
        collect_recursive(&subdir, config, results)?;
    }
    Ok(())
}

/// Read all files in parallel, keeping input order.
pub fn read_files(paths: &[PathBuf]) -> Result<Vec<String>, LoadError> {
    paths
        .par_iter()
        .map(|path| fs::read_to_string(path).map_err(|source| LoadError::io(path, source)))
        .collect()
}
