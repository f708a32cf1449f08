//! Unit analysis through the AnalysisHost snapshot.

use std::sync::Arc;

use linkscope::hir::{Snapshot, UnitId};
use tokio_util::sync::CancellationToken;

use crate::helpers::hir_helpers::{UnitFixture, file_id, host_with_units};
use crate::helpers::source_fixtures::{RUNTIME_NANOTIME, RUNTIME_WALLTIME};

#[test]
fn test_parse_is_memoized_across_snapshots() {
    let mut host = host_with_units(vec![
        UnitFixture::new("runtime").file("a.go", RUNTIME_WALLTIME),
        UnitFixture::new("other").file("o.go", "package other\n"),
    ]);
    let a = file_id(&host, "runtime/a.go");

    let first = host.analysis().parse_file(a).unwrap();
    let second = host.analysis().parse_file(a).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    host.set_file_content("other/o.go", "package other\n\nfunc g() {}\n");
    let third = host.analysis().parse_file(a).unwrap();
    assert!(Arc::ptr_eq(&first, &third));
}

#[test]
fn test_full_analysis_collects_files_in_order() {
    let host = host_with_units(vec![
        UnitFixture::new("runtime")
            .file("a.go", RUNTIME_WALLTIME)
            .file("b.go", RUNTIME_NANOTIME),
    ]);
    let units = host
        .analysis()
        .full_analysis(&UnitId::new("runtime"), &CancellationToken::new())
        .unwrap();

    assert_eq!(units.len(), 1);
    let unit = &units[0];
    let uris: Vec<_> = unit.files().iter().map(|f| f.uri().to_string()).collect();
    assert_eq!(uris, vec!["file:///runtime/a.go", "file:///runtime/b.go"]);
    assert!(unit.diagnostics().is_empty());
    // walltime, then m, the method and nanotime
    assert_eq!(unit.declarations().count(), 4);
}

#[test]
fn test_full_analysis_reports_package_mismatch() {
    let host = host_with_units(vec![
        UnitFixture::new("runtime")
            .file("a.go", RUNTIME_WALLTIME)
            .file("b.go", "package main\n\nfunc nanotime() int64 { return 0 }\n"),
    ]);
    let units = host
        .analysis()
        .full_analysis(&UnitId::new("runtime"), &CancellationToken::new())
        .unwrap();

    let diagnostics = units[0].diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, file_id(&host, "runtime/b.go"));
    assert!(diagnostics[0].message.contains("main"));
}

#[test]
fn test_metadata_for_file() {
    let host = host_with_units(vec![
        UnitFixture::new("time").file("stubs.go", "package time\n").dep("runtime"),
        UnitFixture::new("runtime").file("a.go", RUNTIME_WALLTIME),
    ]);
    let stubs = file_id(&host, "time/stubs.go");
    let analysis = host.analysis();

    let units = analysis.metadata_for_file(stubs).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].id, UnitId::new("time"));
    let deps: Vec<_> = units[0].deps.keys().map(|p| p.as_str()).collect();
    assert_eq!(deps, vec!["runtime"]);
    assert!(analysis.metadata(&UnitId::new("missing")).is_none());
}
