//! Recursive descent parser for the Go-style source language
//!
//! Builds a rowan GreenNode tree from tokens. Only the top-level structure
//! is parsed in detail; function bodies, parameter lists and type
//! expressions are kept as balanced token groups. Parsing never fails:
//! unexpected input is wrapped in `ERROR` nodes and reported in
//! [`Parse::errors`].

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root node
    pub fn tree(&self) -> super::SourceFile {
        super::SourceFile::new(self.syntax())
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_source_file();
    parser.finish()
}

struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    eof: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], eof: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().is_some_and(|t| t.kind.is_trivia()) {
            self.bump();
        }
    }

    /// Consume trivia up to (not including) the next line break.
    ///
    /// Returns `true` if the current line has ended: a line break or the end
    /// of input follows. Statements end at line breaks, so this is how
    /// declarations find their end.
    fn skip_trivia_same_line(&mut self) -> bool {
        loop {
            match self.current() {
                None => return true,
                Some(t) if t.kind.is_trivia() => {
                    if t.contains_newline() {
                        return true;
                    }
                    self.bump();
                }
                Some(_) => return false,
            }
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.eof));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.bump();
        self.finish_node();
    }

    /// Consume a bracketed group, including nested groups of the same kind.
    ///
    /// Expects to be positioned on `open`.
    fn balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
        self.error(format!("unclosed {:?}", open));
    }

    fn balanced_node(&mut self, node: SyntaxKind, open: SyntaxKind, close: SyntaxKind) {
        self.start_node(node);
        self.balanced(open, close);
        self.finish_node();
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }

            match self.current_kind() {
                SyntaxKind::PACKAGE_KW => self.package_clause(),
                SyntaxKind::IMPORT_KW => self.import_decl(),
                SyntaxKind::FUNC_KW => self.func_decl(),
                SyntaxKind::VAR_KW | SyntaxKind::CONST_KW | SyntaxKind::TYPE_KW => {
                    self.gen_decl()
                }
                SyntaxKind::SEMICOLON => self.bump(),
                _ => self.error_recover(
                    "expected top-level declaration",
                    &[
                        SyntaxKind::PACKAGE_KW,
                        SyntaxKind::IMPORT_KW,
                        SyntaxKind::FUNC_KW,
                        SyntaxKind::VAR_KW,
                        SyntaxKind::CONST_KW,
                        SyntaxKind::TYPE_KW,
                    ],
                ),
            }
        }

        self.finish_node();
    }

    /// `package name`
    fn package_clause(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_CLAUSE);
        self.bump();
        if !self.skip_trivia_same_line() && self.at(SyntaxKind::IDENT) {
            self.name();
        } else {
            self.error("expected package name");
        }
        self.finish_node();
    }

    /// `import "path"`, `import alias "path"` or `import ( ... )`
    fn import_decl(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump();

        if self.skip_trivia_same_line() {
            self.error("expected import path");
        } else if self.eat(SyntaxKind::L_PAREN) {
            loop {
                self.skip_trivia();
                if self.at_eof() {
                    self.error("unclosed import group");
                    break;
                }
                if self.eat(SyntaxKind::R_PAREN) {
                    break;
                }
                if self.eat(SyntaxKind::SEMICOLON) {
                    continue;
                }
                if self.at_import_spec_start() {
                    self.import_spec();
                } else {
                    self.error_recover(
                        "expected import path",
                        &[
                            SyntaxKind::R_PAREN,
                            SyntaxKind::STRING,
                            SyntaxKind::RAW_STRING,
                        ],
                    );
                }
            }
        } else if self.at_import_spec_start() {
            self.import_spec();
        } else {
            self.error("expected import path");
        }

        self.finish_node();
    }

    fn at_import_spec_start(&self) -> bool {
        self.at_any(&[
            SyntaxKind::STRING,
            SyntaxKind::RAW_STRING,
            SyntaxKind::IDENT,
            SyntaxKind::DOT,
        ])
    }

    fn import_spec(&mut self) {
        self.start_node(SyntaxKind::IMPORT_SPEC);
        if self.at(SyntaxKind::IDENT) {
            self.name();
            self.skip_trivia_same_line();
        } else if self.eat(SyntaxKind::DOT) {
            self.skip_trivia_same_line();
        }
        if !self.eat(SyntaxKind::STRING) && !self.eat(SyntaxKind::RAW_STRING) {
            self.error("expected import path");
        }
        self.finish_node();
    }

    /// `func (recv) Name[T any](params) result { body }`
    ///
    /// The body is optional. It must open on the line the signature ends on;
    /// a line break, `;` or end of input first means the declaration has no
    /// body.
    fn func_decl(&mut self) {
        self.start_node(SyntaxKind::FUNC_DECL);
        self.bump();

        let mut line_ended = self.skip_trivia_same_line();
        if !line_ended && self.at(SyntaxKind::L_PAREN) {
            self.balanced_node(SyntaxKind::RECEIVER, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
            line_ended = self.skip_trivia_same_line();
        }

        if !line_ended && self.at(SyntaxKind::IDENT) {
            self.name();
            line_ended = self.skip_trivia_same_line();
        } else {
            self.error("expected function name");
        }

        if !line_ended && self.at(SyntaxKind::L_BRACKET) {
            self.balanced_node(
                SyntaxKind::TYPE_PARAMS,
                SyntaxKind::L_BRACKET,
                SyntaxKind::R_BRACKET,
            );
            line_ended = self.skip_trivia_same_line();
        }

        if !line_ended && self.at(SyntaxKind::L_PAREN) {
            self.balanced_node(SyntaxKind::PARAM_LIST, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
            line_ended = self.skip_trivia_same_line();
        } else {
            self.error("expected parameter list");
        }

        if !line_ended && !self.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON]) {
            line_ended = self.func_result();
        }

        if !line_ended && self.at(SyntaxKind::L_BRACE) {
            self.balanced_node(SyntaxKind::BLOCK, SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
        } else {
            self.eat(SyntaxKind::SEMICOLON);
        }

        self.finish_node();
    }

    /// Result type of a function signature. Returns whether the line ended.
    fn func_result(&mut self) -> bool {
        self.start_node(SyntaxKind::RESULT);
        let mut prev = SyntaxKind::ERROR;
        let line_ended = loop {
            match self.current_kind() {
                SyntaxKind::L_PAREN => self.balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN),
                SyntaxKind::L_BRACKET => {
                    self.balanced(SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET)
                }
                // `struct { ... }` and `interface { ... }` braces belong to the type
                SyntaxKind::L_BRACE
                    if matches!(prev, SyntaxKind::STRUCT_KW | SyntaxKind::INTERFACE_KW) =>
                {
                    self.balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE)
                }
                SyntaxKind::L_BRACE | SyntaxKind::SEMICOLON => break false,
                _ => self.bump(),
            }
            prev = self
                .pos
                .checked_sub(1)
                .and_then(|i| self.tokens.get(i))
                .map_or(SyntaxKind::ERROR, |t| t.kind);
            if self.skip_trivia_same_line() {
                break true;
            }
        };
        self.finish_node();
        line_ended
    }

    /// `var`, `const` or `type`, either a single spec or a parenthesized group
    fn gen_decl(&mut self) {
        self.start_node(SyntaxKind::GEN_DECL);
        self.bump();

        if self.skip_trivia_same_line() {
            self.error("expected declaration");
        } else if self.eat(SyntaxKind::L_PAREN) {
            loop {
                self.skip_trivia();
                if self.at_eof() {
                    self.error("unclosed declaration group");
                    break;
                }
                if self.eat(SyntaxKind::R_PAREN) {
                    break;
                }
                if self.eat(SyntaxKind::SEMICOLON) {
                    continue;
                }
                self.gen_spec();
            }
        } else {
            self.gen_spec();
        }

        self.finish_node();
    }

    fn gen_spec(&mut self) {
        self.start_node(SyntaxKind::GEN_SPEC);
        if self.at(SyntaxKind::IDENT) {
            self.name();
        }

        // Everything up to the end of the line, at bracket depth zero
        let mut depth = 0usize;
        while let Some(token) = self.current() {
            let kind = token.kind;
            if depth == 0 {
                if kind.is_trivia() && token.contains_newline() {
                    break;
                }
                if matches!(kind, SyntaxKind::SEMICOLON | SyntaxKind::R_PAREN) {
                    break;
                }
            }
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACE | SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACE | SyntaxKind::R_BRACKET => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }
}
