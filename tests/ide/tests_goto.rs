//! Goto-linkname through the AnalysisHost.

use linkscope::base::FileId;
use linkscope::hir::{AnalysisError, UnitMetadata};
use linkscope::ide::{AnalysisHost, GotoResult, NoopObserver, goto_linkname};
use tokio_util::sync::CancellationToken;

use crate::helpers::fake_snapshot::{FakeSnapshot, Failure};
use crate::helpers::hir_helpers::{UnitFixture, file_id, func_name_position, host_with_units};
use crate::helpers::source_fixtures::{RUNTIME_NANOTIME, RUNTIME_WALLTIME, TIME_STUBS};

fn workspace() -> AnalysisHost {
    host_with_units(vec![
        UnitFixture::new("time").file("stubs.go", TIME_STUBS).dep("runtime"),
        UnitFixture::new("runtime")
            .file("a.go", RUNTIME_WALLTIME)
            .file("b.go", RUNTIME_NANOTIME),
    ])
}

fn goto(host: &AnalysisHost, name: &str) -> GotoResult {
    let file = file_id(host, "time/stubs.go");
    let position = func_name_position(TIME_STUBS, name);
    host.analysis()
        .goto_linkname(file, position.line, position.col)
        .unwrap()
}

#[test]
fn test_goto_linkname_across_units() {
    let host = workspace();
    let result = goto(&host, "runtimeNano");

    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.file, file_id(&host, "runtime/b.go"));
    assert_eq!(target.uri, "file:///runtime/b.go");
    assert_eq!((target.start_line, target.start_col), (6, 5));
    assert_eq!((target.end_line, target.end_col), (6, 13));
    assert_eq!(target.name, "nanotime");
}

#[test]
fn test_goto_linkname_first_file() {
    let host = workspace();
    let result = goto(&host, "now");

    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].uri, "file:///runtime/a.go");
    assert_eq!(result.targets[0].name, "walltime");
}

#[test]
fn test_goto_linkname_without_directive() {
    let host = workspace();
    assert!(goto(&host, "Sleep").is_empty());
}

#[test]
fn test_goto_linkname_is_idempotent() {
    let host = workspace();
    assert_eq!(goto(&host, "runtimeNano"), goto(&host, "runtimeNano"));
}

#[test]
fn test_goto_linkname_follows_edits() {
    let mut host = workspace();
    let before = goto(&host, "runtimeNano");
    assert_eq!(before.targets[0].start_line, 6);

    host.set_file_content("runtime/b.go", "package runtime\n\nfunc nanotime() int64 { return 2 }\n");
    let after = goto(&host, "runtimeNano");
    assert_eq!(after.targets[0].start_line, 2);

    host.set_file_content("runtime/b.go", "package runtime\n");
    assert!(goto(&host, "runtimeNano").is_empty());
}

#[test]
fn test_goto_linkname_target_not_a_dependency() {
    let mut host = workspace();
    let stubs = file_id(&host, "time/stubs.go");
    host.set_unit(UnitMetadata::new("time").with_file(stubs));

    assert!(goto(&host, "runtimeNano").is_empty());
}

#[test]
fn test_goto_linkname_file_outside_units() {
    let mut host = workspace();
    let orphan = host.set_file_content("orphan/stubs.go", TIME_STUBS);
    let position = func_name_position(TIME_STUBS, "runtimeNano");

    let result = host
        .analysis()
        .goto_linkname(orphan, position.line, position.col)
        .unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_goto_linkname_unknown_file() {
    let host = workspace();
    let result = host.analysis().goto_linkname(FileId::new(999), 5, 5).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_goto_linkname_cancelled() {
    let host = workspace();
    let file = file_id(&host, "time/stubs.go");
    let position = func_name_position(TIME_STUBS, "runtimeNano");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = host
        .analysis()
        .goto_linkname_cancellable(file, position.line, position.col, &cancel);
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}

#[test]
fn test_goto_linkname_propagates_io_errors() {
    let snapshot = FakeSnapshot::new(workspace()).failing("runtime", Failure::Io);
    let file = file_id(snapshot.host(), "time/stubs.go");
    let position = func_name_position(TIME_STUBS, "runtimeNano");

    let result = goto_linkname(
        &snapshot,
        file,
        position.line,
        position.col,
        &CancellationToken::new(),
        &NoopObserver,
    );
    assert!(matches!(result, Err(AnalysisError::Io(_))));
}

#[test]
fn test_goto_linkname_build_failure_is_empty() {
    let snapshot = FakeSnapshot::new(workspace()).failing("runtime", Failure::Build);
    let file = file_id(snapshot.host(), "time/stubs.go");
    let position = func_name_position(TIME_STUBS, "runtimeNano");

    let result = goto_linkname(
        &snapshot,
        file,
        position.line,
        position.col,
        &CancellationToken::new(),
        &NoopObserver,
    )
    .unwrap();
    assert!(result.is_empty());
}
