//! Directive extraction: positions, the unsafe gate and malformed targets.

use linkscope::base::{FileId, LineCol};
use linkscope::hir::ParsedFile;
use linkscope::ide::{LinknameTarget, NoopObserver, extract_directive};
use rstest::rstest;

use crate::helpers::hir_helpers::func_name_position;
use crate::helpers::recording_observer::RecordingObserver;
use crate::helpers::source_fixtures::{BAR_NO_PATH, TIME_STUBS, TIME_STUBS_NO_UNSAFE};

fn parsed(source: &str) -> ParsedFile {
    ParsedFile::new(FileId::new(0), "file:///time/stubs.go", source)
}

fn extract_at(source: &str, position: LineCol) -> Option<LinknameTarget> {
    extract_directive(&parsed(source), position, &NoopObserver)
}

// =============================================================================
// NAME SPAN
// =============================================================================

#[rstest]
#[case::one_before(-1, false)]
#[case::first_char(0, true)]
#[case::middle(5, true)]
#[case::last_char(10, true)]
#[case::just_after(11, true)]
#[case::one_after(12, false)]
fn test_extract_name_span(#[case] delta: i32, #[case] found: bool) {
    // `runtimeNano` is 11 characters long
    let start = func_name_position(TIME_STUBS, "runtimeNano");
    let position = LineCol::new(start.line, (start.col as i32 + delta) as u32);

    let target = extract_at(TIME_STUBS, position);
    assert_eq!(target.is_some(), found, "at {position:?}");
    if let Some(target) = target {
        assert_eq!(target.path.as_str(), "runtime");
        assert_eq!(target.name, "nanotime");
    }
}

#[test]
fn test_extract_second_declaration() {
    let target = extract_at(TIME_STUBS, func_name_position(TIME_STUBS, "now")).unwrap();
    assert_eq!(target.path.as_str(), "runtime");
    assert_eq!(target.name, "walltime");
}

#[test]
fn test_extract_is_idempotent() {
    let file = parsed(TIME_STUBS);
    let position = func_name_position(TIME_STUBS, "now");
    let first = extract_directive(&file, position, &NoopObserver);
    let second = extract_directive(&file, position, &NoopObserver);
    assert!(first.is_some());
    assert_eq!(first, second);
}

// =============================================================================
// ABSENCE
// =============================================================================

#[test]
fn test_extract_requires_unsafe_import() {
    let observer = RecordingObserver::new();
    let position = func_name_position(TIME_STUBS_NO_UNSAFE, "runtimeNano");
    let target = extract_directive(&parsed(TIME_STUBS_NO_UNSAFE), position, &observer);

    assert!(target.is_none());
    assert_eq!(observer.events(), vec!["MissingUnsafeImport"]);
}

#[rstest]
#[case::aliased("package p\n\nimport u \"unsafe\"\n\n//go:linkname f a.g\nfunc f()\n")]
#[case::grouped("package p\n\nimport (\n\t\"fmt\"\n\t_ \"unsafe\"\n)\n\n//go:linkname f a.g\nfunc f()\n")]
#[case::commented("package p\n\n/* linkname needs unsafe */\nimport _ /* for linkname */ \"unsafe\"\n\n//go:linkname f a.g\nfunc f()\n")]
#[case::raw_string("package p\n\nimport _ `unsafe`\n\n//go:linkname f a.g\nfunc f()\n")]
fn test_extract_unsafe_import_forms(#[case] source: &str) {
    let target = extract_at(source, func_name_position(source, "f")).unwrap();
    assert_eq!(target.path.as_str(), "a");
    assert_eq!(target.name, "g");
}

#[test]
fn test_extract_target_without_path() {
    let observer = RecordingObserver::new();
    let position = func_name_position(BAR_NO_PATH, "bar");
    let target = extract_directive(&parsed(BAR_NO_PATH), position, &observer);

    assert!(target.is_none());
    assert_eq!(observer.events(), vec!["Declaration", "MalformedTarget"]);
}

#[test]
fn test_extract_prototype_without_directive() {
    let observer = RecordingObserver::new();
    let position = func_name_position(TIME_STUBS, "Sleep");
    let target = extract_directive(&parsed(TIME_STUBS), position, &observer);

    assert!(target.is_none());
    assert!(observer.saw("NoDirective"));
}

#[test]
fn test_extract_outside_declarations() {
    let observer = RecordingObserver::new();
    let file = parsed(TIME_STUBS);
    // On the package clause
    assert!(extract_directive(&file, LineCol::new(0, 9), &observer).is_none());
    // Past the end of a line and past the end of the file
    assert!(extract_directive(&file, LineCol::new(5, 80), &observer).is_none());
    assert!(extract_directive(&file, LineCol::new(400, 0), &observer).is_none());
    // Columns large enough to overflow a byte offset
    assert!(extract_directive(&file, LineCol::new(5, u32::MAX), &observer).is_none());
    assert!(extract_directive(&file, LineCol::new(5, u32::MAX - 40), &observer).is_none());
    assert_eq!(observer.events(), vec!["NoDeclaration"; 5]);
}

#[test]
fn test_extract_with_block_comment_in_unsafe_import() {
    let source = "package p\n\nimport _ /* for linkname */ \"unsafe\"\n\n//go:linkname f a.g\nfunc f()\n";
    let file = parsed(source);
    assert!(!file.has_errors(), "{:?}", file.errors());

    let target = extract_directive(&file, func_name_position(source, "f"), &NoopObserver).unwrap();
    assert_eq!(target.path.as_str(), "a");
    assert_eq!(target.name, "g");
}

#[test]
fn test_extract_ignores_directive_in_block_comment() {
    let source = "package p\n\nimport _ \"unsafe\"\n\n/*\n//go:linkname f a.g\n*/\nfunc f()\n";
    let file = parsed(source);
    assert!(!file.has_errors(), "{:?}", file.errors());
    assert!(extract_directive(&file, func_name_position(source, "f"), &NoopObserver).is_none());
}

#[test]
fn test_extract_directive_mentions_other_function() {
    let source = "package p\n\nimport _ \"unsafe\"\n\n//go:linkname g a.g\nfunc f()\n";
    assert!(extract_at(source, func_name_position(source, "f")).is_none());
}

#[test]
fn test_extract_body_on_same_line() {
    let source = "package p\n\nimport _ \"unsafe\"\n\n//go:linkname f a.g\nfunc f() {}\n";
    assert!(extract_at(source, func_name_position(source, "f")).is_none());
}
