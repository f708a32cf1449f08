//! Helpers for setting up analysis hosts with several units.

use linkscope::base::{FileId, LineCol};
use linkscope::hir::UnitMetadata;
use linkscope::ide::AnalysisHost;

/// A unit to register: its path, its files and its direct dependencies.
pub struct UnitFixture<'a> {
    pub path: &'a str,
    pub files: Vec<(&'a str, String)>,
    pub deps: Vec<&'a str>,
}

impl<'a> UnitFixture<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            files: Vec::new(),
            deps: Vec::new(),
        }
    }

    pub fn file(mut self, name: &'a str, source: impl Into<String>) -> Self {
        self.files.push((name, source.into()));
        self
    }

    pub fn dep(mut self, path: &'a str) -> Self {
        self.deps.push(path);
        self
    }
}

/// Creates an AnalysisHost holding the given units.
///
/// Files are registered as `<unit path>/<file name>`.
pub fn host_with_units(units: Vec<UnitFixture<'_>>) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for unit in units {
        let mut metadata = UnitMetadata::new(unit.path);
        for (name, source) in &unit.files {
            let file = host.set_file_content(&format!("{}/{}", unit.path, name), source);
            metadata = metadata.with_file(file);
        }
        for dep in unit.deps {
            metadata = metadata.with_dep(dep);
        }
        host.set_unit(metadata);
    }
    host
}

pub fn file_id(host: &AnalysisHost, path: &str) -> FileId {
    host.analysis()
        .file_id(path)
        .unwrap_or_else(|| panic!("file {path} not registered"))
}

/// 0-indexed position of the first occurrence of `needle` in `source`.
pub fn position_of(source: &str, needle: &str) -> LineCol {
    let at = source
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in source"));
    let before = &source[..at];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    LineCol::new(line, (at - line_start) as u32)
}

/// Position of the first character of `name` in `func name(`.
pub fn func_name_position(source: &str, name: &str) -> LineCol {
    let start = position_of(source, &format!("func {name}("));
    LineCol::new(start.line, start.col + 5)
}
