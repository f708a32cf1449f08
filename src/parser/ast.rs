//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Top-level declarations are exposed as the [`Item`] enum so callers match
//! declaration kinds exhaustively.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use rowan::TextRange;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

/// Trait for AST tokens that wrap a SyntaxToken
pub trait AstToken: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(token: SyntaxToken) -> Option<Self>;
    fn syntax(&self) -> &SyntaxToken;
    fn text(&self) -> &str {
        self.syntax().text()
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| pred(t.kind()))
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// Wrap a root node. The parser always produces a `SOURCE_FILE` root.
    pub(crate) fn new(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::SOURCE_FILE);
        Self(node)
    }

    pub fn package_clause(&self) -> Option<PackageClause> {
        self.0.children().find_map(PackageClause::cast)
    }

    /// Package name declared by the `package` clause
    pub fn package_name(&self) -> Option<SmolStr> {
        self.package_clause()?.name().map(|n| n.text())
    }

    /// Top-level declarations, in source order
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn funcs(&self) -> impl Iterator<Item = FuncDecl> + '_ {
        self.items().filter_map(|item| match item {
            Item::Func(func) => Some(func),
            _ => None,
        })
    }

    /// Every import spec of every import declaration
    pub fn imports(&self) -> impl Iterator<Item = ImportSpec> + '_ {
        self.items()
            .filter_map(|item| match item {
                Item::Import(import) => Some(import),
                _ => None,
            })
            .flat_map(|import| import.specs().collect::<Vec<_>>())
    }

    /// The comment stream: every comment token in the file, in source order
    pub fn comments(&self) -> impl Iterator<Item = Comment> + '_ {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter_map(Comment::cast)
    }
}

// ============================================================================
// Items
// ============================================================================

/// A top-level declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Import(ImportDecl),
    Func(FuncDecl),
    /// Grouped or single `var`, `const` and `type` declarations
    Gen(GenDecl),
}

impl AstNode for Item {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::IMPORT_DECL | SyntaxKind::FUNC_DECL | SyntaxKind::GEN_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IMPORT_DECL => Some(Self::Import(ImportDecl(node))),
            SyntaxKind::FUNC_DECL => Some(Self::Func(FuncDecl(node))),
            SyntaxKind::GEN_DECL => Some(Self::Gen(GenDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Import(n) => n.syntax(),
            Self::Func(n) => n.syntax(),
            Self::Gen(n) => n.syntax(),
        }
    }
}

// ============================================================================
// Package and imports
// ============================================================================

ast_node!(PackageClause, PACKAGE_CLAUSE);

impl PackageClause {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }
}

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    pub fn specs(&self) -> impl Iterator<Item = ImportSpec> + '_ {
        self.0.children().filter_map(ImportSpec::cast)
    }
}

ast_node!(ImportSpec, IMPORT_SPEC);

impl ImportSpec {
    /// Local alias (`_`, a name, or `None` when absent). Dot imports have no
    /// alias node.
    pub fn alias(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn path_token(&self) -> Option<SyntaxToken> {
        child_token(&self.0, |k| {
            matches!(k, SyntaxKind::STRING | SyntaxKind::RAW_STRING)
        })
    }

    /// The imported path with its quotes removed
    pub fn path(&self) -> Option<SmolStr> {
        let token = self.path_token()?;
        let text = token.text();
        let unquoted = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .or_else(|| text.strip_prefix('`').and_then(|t| t.strip_suffix('`')))?;
        Some(SmolStr::new(unquoted))
    }
}

// ============================================================================
// Functions
// ============================================================================

ast_node!(FuncDecl, FUNC_DECL);

impl FuncDecl {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn receiver(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::RECEIVER)
    }

    pub fn is_method(&self) -> bool {
        self.receiver().is_some()
    }

    pub fn param_list(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::PARAM_LIST)
    }

    pub fn result(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::RESULT)
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::BLOCK)
    }

    /// Range to highlight when navigating to this function: the name if
    /// present, otherwise the whole declaration.
    pub fn focus_range(&self) -> TextRange {
        self.name()
            .map(|n| n.range())
            .unwrap_or_else(|| self.0.text_range())
    }
}

// ============================================================================
// var / const / type
// ============================================================================

ast_node!(GenDecl, GEN_DECL);

impl GenDecl {
    pub fn specs(&self) -> impl Iterator<Item = GenSpec> + '_ {
        self.0.children().filter_map(GenSpec::cast)
    }

    /// Leading name of every spec
    pub fn names(&self) -> impl Iterator<Item = SmolStr> + '_ {
        self.specs().filter_map(|s| s.name()).map(|n| n.text())
    }
}

ast_node!(GenSpec, GEN_SPEC);

impl GenSpec {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }
}

// ============================================================================
// Names and comments
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        child_token(&self.0, |k| k == SyntaxKind::IDENT)
    }

    pub fn text(&self) -> SmolStr {
        self.ident()
            .map(|t| SmolStr::new(t.text()))
            .unwrap_or_default()
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment(SyntaxToken);

impl AstToken for Comment {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_comment()
    }

    fn cast(token: SyntaxToken) -> Option<Self> {
        if Self::can_cast(token.kind()) {
            Some(Self(token))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxToken {
        &self.0
    }
}

impl Comment {
    pub fn is_line(&self) -> bool {
        self.0.kind() == SyntaxKind::LINE_COMMENT
    }
}
