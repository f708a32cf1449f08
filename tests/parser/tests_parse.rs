//! Parser tests over realistic source files.

use linkscope::parser::{AstNode, AstToken, Item, SyntaxKind, parse};

const SYNC: &str = r#"package sync

import (
	"sync/atomic"
	_ "unsafe"
)

// A Mutex is a mutual exclusion lock.
type Mutex struct {
	state int32
	sema  uint32
}

const (
	locked = 1 << iota
	woken
)

var errLocked = newError("locked")

//go:linkname runtime_Semacquire internal/poll.runtime_Semacquire
func runtime_Semacquire(s *uint32)

func (m *Mutex) Lock() {
	if atomic.CompareAndSwapInt32(&m.state, 0, locked) {
		return
	}
}

func Map[T any, U any](xs []T, f func(T) U) []U {
	return nil
}

func pair() (int, error)
"#;

#[test]
fn test_parse_realistic_file() {
    let parse = parse(SYNC);
    assert!(parse.ok(), "errors: {:?}", parse.errors);

    let tree = parse.tree();
    assert_eq!(tree.package_name().as_deref(), Some("sync"));

    let paths: Vec<_> = tree.imports().filter_map(|i| i.path()).collect();
    assert_eq!(paths, vec!["sync/atomic", "unsafe"]);

    let funcs: Vec<_> = tree
        .funcs()
        .map(|f| {
            (
                f.name().map(|n| n.text()).unwrap_or_default(),
                f.body().is_some(),
                f.is_method(),
            )
        })
        .collect();
    assert_eq!(
        funcs,
        vec![
            ("runtime_Semacquire".into(), false, false),
            ("Lock".into(), true, true),
            ("Map".into(), true, false),
            ("pair".into(), false, false),
        ]
    );
}

#[test]
fn test_parse_gen_decl_names() {
    let parse = parse(SYNC);
    let names: Vec<_> = parse
        .tree()
        .items()
        .filter_map(|item| match item {
            Item::Gen(gen_decl) => Some(gen_decl.names().collect::<Vec<_>>()),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(names, vec!["Mutex", "locked", "woken", "errLocked"]);
}

#[test]
fn test_parse_keeps_directives_as_line_comments() {
    let parse = parse(SYNC);
    let directives: Vec<_> = parse
        .tree()
        .comments()
        .filter(|c| c.is_line() && c.text().starts_with("//go:"))
        .map(|c| c.text().to_string())
        .collect();
    assert_eq!(
        directives,
        vec!["//go:linkname runtime_Semacquire internal/poll.runtime_Semacquire"]
    );
}

#[test]
fn test_parse_is_lossless() {
    let parse = parse(SYNC);
    assert_eq!(parse.syntax().to_string(), SYNC);
}

#[test]
fn test_parse_block_comments_are_trivia() {
    let source = "/* header */\npackage p /* name */\n\nimport /* one */ \"unsafe\"\n\n/*\n * doc\n */\nfunc f(/* none */) /* no body */\n";
    let parse = parse(source);
    assert!(parse.ok(), "errors: {:?}", parse.errors);

    let tree = parse.tree();
    assert_eq!(tree.package_name().as_deref(), Some("p"));
    let block_comments = tree.comments().filter(|c| !c.is_line()).count();
    assert_eq!(block_comments, 6);

    let func = tree.funcs().next().unwrap();
    assert_eq!(func.name().map(|n| n.text()).as_deref(), Some("f"));
    assert!(func.body().is_none());
}

#[test]
fn test_parse_recovers_from_garbage() {
    let source = "package p\n\n) ) )\n\nfunc f()\n";
    let parse = parse(source);
    assert!(!parse.ok());
    assert_eq!(parse.syntax().to_string(), source);

    let tree = parse.tree();
    let names: Vec<_> = tree.funcs().filter_map(|f| f.name()).map(|n| n.text()).collect();
    assert_eq!(names, vec!["f"]);
    assert!(
        tree.syntax()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::ERROR)
    );
}
