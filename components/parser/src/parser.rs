//! Recursive descent parser for JavaScript
//!
//! Statements are parsed by recursive descent and binary operators by
//! precedence climbing. Arrow parameters and destructuring assignments are
//! first parsed as expressions and converted to patterns once `=>` or `=`
//! shows up.

use crate::ast::*;
use crate::error::*;
use crate::lexer::{
    parse_numeric_value, template_raw_text, Keyword, Lexer, Punctuator, SyntaxKind, Token,
};
use core_types::{ErrorKind, SourceLocation, SourcePosition, SyntaxResult};
use num_bigint::BigInt;
use num_traits::Num;
use std::collections::HashSet;
use std::mem;
use tracing::debug;

/// A label in scope of the statement being parsed
#[derive(Debug, Clone)]
struct Label {
    name: String,
    /// Label wraps an iteration statement, directly or through other labels
    /// (valid `continue` target)
    is_loop: bool,
}

/// Syntactic context, saved on entry to and restored on exit from functions,
/// arrows, classes and loops
#[derive(Debug, Clone)]
struct Context {
    in_function: bool,
    in_async: bool,
    in_generator: bool,
    in_class: bool,
    /// Method, accessor, field initializer or static block (allows `super`)
    in_method: bool,
    loop_depth: u32,
    switch_depth: u32,
    labels: Vec<Label>,
    /// `in` is a relational operator; cleared in for-statement heads
    allow_in: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            in_function: false,
            in_async: false,
            in_generator: false,
            in_class: false,
            in_method: false,
            loop_depth: 0,
            switch_depth: 0,
            labels: Vec::new(),
            allow_in: true,
        }
    }
}

/// Binary operator found by precedence climbing
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

/// Precedence of `**`, the only right-associative binary operator
const EXPONENT_PRECEDENCE: u8 = 12;

/// Modifiers and key of a class member or object literal method
struct MemberHead {
    key: PropertyKey,
    computed: bool,
    kind: MethodKind,
    is_async: bool,
    is_generator: bool,
    /// Key was a plain identifier (shorthand properties)
    is_identifier: bool,
}

/// JavaScript parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// Decoded value of `current`
    value: String,
    /// End of the last consumed token
    prev_end: SourcePosition,
    ctx: Context,
    /// Shorthand initializers (`{a = 1}`) not yet converted to patterns
    cover_inits: Vec<SourceLocation>,
    /// Start offsets of spread elements followed by a comma
    spread_commas: HashSet<usize>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            current: Token {
                kind: SyntaxKind::Eof,
                raw_value: String::new(),
                location: SourceLocation::default(),
                newline_before: false,
            },
            value: String::new(),
            prev_end: SourcePosition::default(),
            ctx: Context::default(),
            cover_inits: Vec::new(),
            spread_commas: HashSet::new(),
        }
    }

    /// Parse the source into a program.
    ///
    /// The first lexical, syntax or restriction error aborts the parse.
    pub fn parse(&mut self) -> SyntaxResult<Program> {
        let _span = tracing::debug_span!("parse", len = self.lexer.source().len()).entered();
        match self.parse_program() {
            Ok(program) => {
                debug!(statements = program.body.len(), "parse succeeded");
                Ok(program)
            }
            Err(err) => {
                debug!(kind = ?err.kind, location = %err.location.start, "parse failed");
                Err(err)
            }
        }
    }

    fn parse_program(&mut self) -> SyntaxResult<Program> {
        self.bump()?;
        let mut body = Vec::new();
        while self.current.kind != SyntaxKind::Eof {
            body.push(self.parse_statement_list_item()?);
        }
        Ok(Program {
            body,
            location: SourceLocation::new(SourcePosition::default(), self.current.location.end),
        })
    }

    // ---------------------------------------------------------------------
    // Token helpers
    // ---------------------------------------------------------------------

    /// Move to the next token, returning the consumed token and its value
    fn advance(&mut self) -> SyntaxResult<(Token, String)> {
        let next = self.lexer.next_token()?;
        let next_value = self.lexer.source_value().to_string();
        self.prev_end = self.current.location.end;
        let token = mem::replace(&mut self.current, next);
        let value = mem::replace(&mut self.value, next_value);
        Ok((token, value))
    }

    /// Replace a `/` or `/=` current token with the regex literal it starts
    fn rescan_regex(&mut self) -> SyntaxResult<()> {
        let token = self
            .lexer
            .rescan_as_regex(self.current.location.start, self.current.newline_before)?;
        self.value = self.lexer.source_value().to_string();
        self.current = token;
        Ok(())
    }

    fn bump(&mut self) -> SyntaxResult<()> {
        self.advance().map(|_| ())
    }

    /// Look at the token after `current` without consuming anything
    fn peek(&mut self) -> SyntaxResult<Token> {
        let checkpoint = self.lexer.checkpoint();
        let token = self.lexer.next_token();
        self.lexer.restore(checkpoint);
        token
    }

    fn check(&self, p: Punctuator) -> bool {
        self.current.is_punctuator(p)
    }

    fn check_keyword(&self, k: Keyword) -> bool {
        self.current.is_keyword(k)
    }

    fn check_identifier(&self, name: &str) -> bool {
        self.current.is_identifier_named(name)
    }

    fn eat(&mut self, p: Punctuator) -> SyntaxResult<bool> {
        if self.check(p) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect(&mut self, p: Punctuator) -> SyntaxResult<Token> {
        if !self.check(p) {
            return self.unexpected();
        }
        Ok(self.advance()?.0)
    }

    fn expect_keyword(&mut self, k: Keyword) -> SyntaxResult<Token> {
        if !self.check_keyword(k) {
            return self.unexpected();
        }
        Ok(self.advance()?.0)
    }

    /// Expect a contextual keyword such as `from` or `as`
    fn expect_contextual(&mut self, word: &str) -> SyntaxResult<()> {
        if !self.check_identifier(word) {
            return self.unexpected();
        }
        self.bump()
    }

    fn unexpected<T>(&self) -> SyntaxResult<T> {
        Err(unexpected_token(&self.current))
    }

    fn start(&self) -> SourcePosition {
        self.current.location.start
    }

    /// Location from `start` to the end of the last consumed token
    fn finish(&self, start: SourcePosition) -> SourceLocation {
        SourceLocation::new(start, self.prev_end)
    }

    fn is_eof(&self) -> bool {
        self.current.kind == SyntaxKind::Eof
    }

    /// ASI applies before the current token
    fn can_insert_semicolon(&self) -> bool {
        self.check(Punctuator::Semicolon)
            || self.check(Punctuator::RBrace)
            || self.current.newline_before
            || self.is_eof()
    }

    /// Consume a statement terminator with automatic semicolon insertion.
    ///
    /// A semicolon is inserted before a line break, before `}` and at the
    /// end of input.
    fn consume_semicolon(&mut self) -> SyntaxResult<()> {
        if self.eat(Punctuator::Semicolon)? {
            return Ok(());
        }
        if self.current.newline_before || self.is_eof() || self.check(Punctuator::RBrace) {
            return Ok(());
        }
        self.unexpected()
    }

    // ---------------------------------------------------------------------
    // Context helpers
    // ---------------------------------------------------------------------

    fn with_allow_in<T>(
        &mut self,
        allow_in: bool,
        f: impl FnOnce(&mut Self) -> SyntaxResult<T>,
    ) -> SyntaxResult<T> {
        let saved = mem::replace(&mut self.ctx.allow_in, allow_in);
        let result = f(self);
        self.ctx.allow_in = saved;
        result
    }

    /// Switch to a fresh function context, returning the one to restore
    fn enter_function(&mut self, is_async: bool, is_generator: bool, is_method: bool) -> Context {
        let ctx = Context {
            in_function: true,
            in_async: is_async,
            in_generator: is_generator,
            in_class: self.ctx.in_class,
            in_method: is_method,
            ..Context::default()
        };
        mem::replace(&mut self.ctx, ctx)
    }

    /// Arrows keep `super` access and the `in` flag of the enclosing code
    fn enter_arrow(&mut self, is_async: bool) -> Context {
        let ctx = Context {
            in_function: true,
            in_async: is_async,
            in_class: self.ctx.in_class,
            in_method: self.ctx.in_method,
            allow_in: self.ctx.allow_in,
            ..Context::default()
        };
        mem::replace(&mut self.ctx, ctx)
    }

    /// Field initializers and static blocks: `super` but no `return`
    fn enter_initializer(&mut self) -> Context {
        let ctx = Context {
            in_class: self.ctx.in_class,
            in_method: true,
            ..Context::default()
        };
        mem::replace(&mut self.ctx, ctx)
    }

    fn check_cover_inits(&self, len: usize) -> SyntaxResult<()> {
        match self.cover_inits.get(len) {
            Some(location) => Err(syntax_error(ErrorKind::InvalidShorthandInitializer, *location)),
            None => Ok(()),
        }
    }

    /// Forget the shorthand initializers recorded since `len` that became
    /// defaults of `pattern`.
    ///
    /// Member targets and default values stay expressions, so initializers
    /// inside them are still errors.
    fn release_cover_inits(&mut self, len: usize, pattern: &Pattern) {
        let mut regions = Vec::new();
        collect_expression_regions(pattern, &mut regions);
        let kept: Vec<SourceLocation> = self
            .cover_inits
            .drain(len..)
            .filter(|init| {
                regions.iter().any(|region| {
                    region.start.index <= init.start.index && init.end.index <= region.end.index
                })
            })
            .collect();
        self.cover_inits.extend(kept);
    }

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------

    fn parse_statement_list_item(&mut self) -> SyntaxResult<Statement> {
        let cover_len = self.cover_inits.len();
        let stmt = match self.try_parse_declaration()? {
            Some(decl) => decl,
            None if self.check_keyword(Keyword::Import) && self.import_starts_declaration()? => {
                self.parse_import_declaration()?
            }
            None if self.check_keyword(Keyword::Export) => self.parse_export_declaration()?,
            None => self.parse_statement()?,
        };
        self.check_cover_inits(cover_len)?;
        Ok(stmt)
    }

    /// Parse a declaration if one starts at the current token
    fn try_parse_declaration(&mut self) -> SyntaxResult<Option<Statement>> {
        let start = self.start();
        let kind = self.current.kind;
        let stmt = match kind {
            SyntaxKind::Keyword(Keyword::Function) => {
                Statement::FunctionDeclaration(self.parse_function(start, false, true)?)
            }
            SyntaxKind::Keyword(Keyword::Class) => Statement::ClassDeclaration(self.parse_class(true)?),
            SyntaxKind::Keyword(Keyword::Const) => self.parse_variable_statement(VariableKind::Const)?,
            SyntaxKind::Identifier if self.check_identifier("let") => {
                if !self.let_starts_declaration()? {
                    return Ok(None);
                }
                self.parse_variable_statement(VariableKind::Let)?
            }
            SyntaxKind::Identifier if self.check_identifier("async") => {
                if !self.peek_is_async_function()? {
                    return Ok(None);
                }
                self.bump()?;
                Statement::FunctionDeclaration(self.parse_function(start, true, true)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(stmt))
    }

    /// `let` followed by a binding starts a declaration; otherwise it is an
    /// identifier
    fn let_starts_declaration(&mut self) -> SyntaxResult<bool> {
        let next = self.peek()?;
        Ok(next.kind == SyntaxKind::Identifier
            || next.is_punctuator(Punctuator::LBracket)
            || next.is_punctuator(Punctuator::LBrace))
    }

    fn peek_is_async_function(&mut self) -> SyntaxResult<bool> {
        let next = self.peek()?;
        Ok(next.is_keyword(Keyword::Function) && !next.newline_before)
    }

    /// `import(` and `import.` start expressions
    fn import_starts_declaration(&mut self) -> SyntaxResult<bool> {
        let next = self.peek()?;
        Ok(!next.is_punctuator(Punctuator::LParen) && !next.is_punctuator(Punctuator::Dot))
    }

    fn parse_statement(&mut self) -> SyntaxResult<Statement> {
        let cover_len = self.cover_inits.len();
        let stmt = self.parse_statement_kind()?;
        self.check_cover_inits(cover_len)?;
        Ok(stmt)
    }

    fn parse_statement_kind(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        let kind = self.current.kind;
        match kind {
            SyntaxKind::Punctuator(Punctuator::LBrace) => {
                let body = self.parse_block()?;
                Ok(Statement::BlockStatement {
                    body,
                    location: self.finish(start),
                })
            }
            SyntaxKind::Punctuator(Punctuator::Semicolon) => {
                self.bump()?;
                Ok(Statement::EmptyStatement {
                    location: self.finish(start),
                })
            }
            SyntaxKind::Keyword(Keyword::Var) => self.parse_variable_statement(VariableKind::Var),
            SyntaxKind::Keyword(Keyword::If) => self.parse_if_statement(),
            SyntaxKind::Keyword(Keyword::For) => self.parse_for_statement(),
            SyntaxKind::Keyword(Keyword::While) => self.parse_while_statement(),
            SyntaxKind::Keyword(Keyword::Do) => self.parse_do_while_statement(),
            SyntaxKind::Keyword(Keyword::Return) => self.parse_return_statement(),
            SyntaxKind::Keyword(Keyword::Break) => self.parse_break_statement(),
            SyntaxKind::Keyword(Keyword::Continue) => self.parse_continue_statement(),
            SyntaxKind::Keyword(Keyword::Throw) => self.parse_throw_statement(),
            SyntaxKind::Keyword(Keyword::Try) => self.parse_try_statement(),
            SyntaxKind::Keyword(Keyword::Switch) => self.parse_switch_statement(),
            SyntaxKind::Keyword(Keyword::With) => self.parse_with_statement(),
            SyntaxKind::Keyword(Keyword::Debugger) => {
                self.bump()?;
                self.consume_semicolon()?;
                Ok(Statement::DebuggerStatement {
                    location: self.finish(start),
                })
            }
            SyntaxKind::Identifier if self.peek()?.is_punctuator(Punctuator::Colon) => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block(&mut self) -> SyntaxResult<Vec<Statement>> {
        self.expect(Punctuator::LBrace)?;
        let mut body = Vec::new();
        while !self.check(Punctuator::RBrace) {
            body.push(self.parse_statement_list_item()?);
        }
        self.expect(Punctuator::RBrace)?;
        Ok(body)
    }

    fn parse_expression_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::ExpressionStatement {
            expression,
            location: self.finish(start),
        })
    }

    fn parse_variable_statement(&mut self, kind: VariableKind) -> SyntaxResult<Statement> {
        let start = self.start();
        let mut decl = self.parse_variable_declaration(kind, false)?;
        self.consume_semicolon()?;
        decl.location = self.finish(start);
        Ok(Statement::VariableDeclaration(decl))
    }

    /// Parse `var`/`let`/`const` and its declarator list.
    ///
    /// Outside for-statement heads, `const` and destructuring declarators
    /// need an initializer.
    fn parse_variable_declaration(
        &mut self,
        kind: VariableKind,
        in_for_head: bool,
    ) -> SyntaxResult<VariableDeclaration> {
        let start = self.start();
        self.bump()?;
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.start();
            let id = self.parse_binding_target()?;
            let init = if self.eat(Punctuator::Assign)? {
                Some(self.parse_assignment()?)
            } else {
                if !in_for_head && needs_initializer(kind, &id) {
                    return self.unexpected();
                }
                None
            };
            declarations.push(VariableDeclarator {
                id,
                init,
                location: self.finish(decl_start),
            });
            if !self.eat(Punctuator::Comma)? {
                break;
            }
        }
        Ok(VariableDeclaration {
            kind,
            declarations,
            location: self.finish(start),
        })
    }

    fn parse_if_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let test = self.parse_paren_expression()?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.check_keyword(Keyword::Else) {
            self.bump()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::IfStatement {
            test,
            consequent,
            alternate,
            location: self.finish(start),
        })
    }

    /// `( Expression )` of `if`, `while`, `switch` and `with`
    fn parse_paren_expression(&mut self) -> SyntaxResult<Expression> {
        self.expect(Punctuator::LParen)?;
        let expression = self.with_allow_in(true, |p| p.parse_expression())?;
        self.expect(Punctuator::RParen)?;
        Ok(expression)
    }

    fn parse_loop_body(&mut self) -> SyntaxResult<Statement> {
        self.ctx.loop_depth += 1;
        let body = self.parse_statement();
        self.ctx.loop_depth -= 1;
        body
    }

    fn parse_while_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let test = self.parse_paren_expression()?;
        let body = Box::new(self.parse_loop_body()?);
        Ok(Statement::WhileStatement {
            test,
            body,
            location: self.finish(start),
        })
    }

    fn parse_do_while_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let body = Box::new(self.parse_loop_body()?);
        self.expect_keyword(Keyword::While)?;
        let test = self.parse_paren_expression()?;
        // The semicolon after do-while is always optional
        self.eat(Punctuator::Semicolon)?;
        Ok(Statement::DoWhileStatement {
            body,
            test,
            location: self.finish(start),
        })
    }

    fn for_declaration_kind(&mut self) -> SyntaxResult<Option<VariableKind>> {
        let token_kind = self.current.kind;
        let kind = match token_kind {
            SyntaxKind::Keyword(Keyword::Var) => Some(VariableKind::Var),
            SyntaxKind::Keyword(Keyword::Const) => Some(VariableKind::Const),
            SyntaxKind::Identifier if self.check_identifier("let") => {
                if self.let_starts_declaration()? {
                    Some(VariableKind::Let)
                } else {
                    None
                }
            }
            _ => None,
        };
        Ok(kind)
    }

    fn parse_for_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let is_await = if self.check_identifier("await") {
            if !self.ctx.in_async {
                return self.unexpected();
            }
            self.bump()?;
            true
        } else {
            false
        };
        self.expect(Punctuator::LParen)?;

        let init = if self.check(Punctuator::Semicolon) {
            None
        } else if let Some(kind) = self.for_declaration_kind()? {
            let decl = self.with_allow_in(false, |p| p.parse_variable_declaration(kind, true))?;
            if self.check_keyword(Keyword::In) || self.check_identifier("of") {
                if decl.declarations.len() != 1 {
                    return self.unexpected();
                }
                return self.parse_for_in_of(start, ForHead::VariableDeclaration(decl), is_await);
            }
            // Only for-in/of heads may leave `const` and patterns uninitialized
            if decl.declarations.iter().any(|d| d.init.is_none() && needs_initializer(kind, &d.id)) {
                return self.unexpected();
            }
            Some(ForInit::VariableDeclaration(decl))
        } else {
            let cover_len = self.cover_inits.len();
            let expression = self.with_allow_in(false, |p| p.parse_expression())?;
            if self.check_keyword(Keyword::In) || self.check_identifier("of") {
                let pattern = self.expression_to_pattern(expression, false)?;
                self.release_cover_inits(cover_len, &pattern);
                return self.parse_for_in_of(start, ForHead::Pattern { pattern }, is_await);
            }
            Some(ForInit::Expression { expression })
        };

        if is_await {
            return self.unexpected();
        }
        self.expect(Punctuator::Semicolon)?;
        let test = if self.check(Punctuator::Semicolon) {
            None
        } else {
            Some(self.with_allow_in(true, |p| p.parse_expression())?)
        };
        self.expect(Punctuator::Semicolon)?;
        let update = if self.check(Punctuator::RParen) {
            None
        } else {
            Some(self.with_allow_in(true, |p| p.parse_expression())?)
        };
        self.expect(Punctuator::RParen)?;
        let body = Box::new(self.parse_loop_body()?);
        Ok(Statement::ForStatement {
            init,
            test,
            update,
            body,
            location: self.finish(start),
        })
    }

    /// Rest of a for-in / for-of statement; `current` is `in` or `of`
    fn parse_for_in_of(
        &mut self,
        start: SourcePosition,
        left: ForHead,
        is_await: bool,
    ) -> SyntaxResult<Statement> {
        let is_of = self.check_identifier("of");
        if is_await && !is_of {
            return self.unexpected();
        }
        self.bump()?;
        let right = if is_of {
            self.with_allow_in(true, |p| p.parse_assignment())?
        } else {
            self.with_allow_in(true, |p| p.parse_expression())?
        };
        self.expect(Punctuator::RParen)?;
        let body = Box::new(self.parse_loop_body()?);
        let location = self.finish(start);
        if is_of {
            Ok(Statement::ForOfStatement {
                left,
                right,
                body,
                is_await,
                location,
            })
        } else {
            Ok(Statement::ForInStatement {
                left,
                right,
                body,
                location,
            })
        }
    }

    fn parse_return_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        if !self.ctx.in_function {
            return Err(syntax_error(ErrorKind::IllegalReturn, self.current.location));
        }
        self.bump()?;
        let argument = if self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;
        Ok(Statement::ReturnStatement {
            argument,
            location: self.finish(start),
        })
    }

    /// Optional label after `break` / `continue`, on the same line
    fn parse_jump_label(&mut self) -> SyntaxResult<Option<Identifier>> {
        if self.current.kind != SyntaxKind::Identifier || self.current.newline_before {
            return Ok(None);
        }
        let label = self.parse_identifier()?;
        if !self.ctx.labels.iter().any(|l| l.name == label.name) {
            return Err(syntax_error(ErrorKind::UndefinedLabel, label.location));
        }
        Ok(Some(label))
    }

    fn parse_break_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        let (keyword, _) = self.advance()?;
        let label = self.parse_jump_label()?;
        if label.is_none() && self.ctx.loop_depth == 0 && self.ctx.switch_depth == 0 {
            return Err(syntax_error(ErrorKind::IllegalBreak, keyword.location));
        }
        self.consume_semicolon()?;
        Ok(Statement::BreakStatement {
            label,
            location: self.finish(start),
        })
    }

    fn parse_continue_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        let (keyword, _) = self.advance()?;
        if self.ctx.loop_depth == 0 {
            return Err(syntax_error(ErrorKind::IllegalContinue, keyword.location));
        }
        let label = self.parse_jump_label()?;
        if let Some(label) = &label {
            let targets_loop = self
                .ctx
                .labels
                .iter()
                .rev()
                .find(|l| l.name == label.name)
                .is_some_and(|l| l.is_loop);
            if !targets_loop {
                return Err(syntax_error(ErrorKind::IllegalContinue, label.location));
            }
        }
        self.consume_semicolon()?;
        Ok(Statement::ContinueStatement {
            label,
            location: self.finish(start),
        })
    }

    fn parse_labeled_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        let label = self.parse_identifier()?;
        self.expect(Punctuator::Colon)?;
        let is_loop = self.labels_iteration_statement()?;
        self.ctx.labels.push(Label {
            name: label.name.clone(),
            is_loop,
        });
        let body = self.parse_statement();
        self.ctx.labels.pop();
        Ok(Statement::LabeledStatement {
            label,
            body: Box::new(body?),
            location: self.finish(start),
        })
    }

    /// True if the current token starts an iteration statement, possibly
    /// behind more labels (`a: b: while (x) {}` makes `a` a loop label too)
    fn labels_iteration_statement(&mut self) -> SyntaxResult<bool> {
        let checkpoint = self.lexer.checkpoint();
        let result = self.skip_label_chain();
        self.lexer.restore(checkpoint);
        result
    }

    fn skip_label_chain(&mut self) -> SyntaxResult<bool> {
        let mut kind = self.current.kind;
        loop {
            match kind {
                SyntaxKind::Keyword(Keyword::For | Keyword::While | Keyword::Do) => return Ok(true),
                SyntaxKind::Identifier => {
                    if !self.lexer.next_token()?.is_punctuator(Punctuator::Colon) {
                        return Ok(false);
                    }
                    kind = self.lexer.next_token()?.kind;
                }
                _ => return Ok(false),
            }
        }
    }

    fn parse_throw_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        if self.current.newline_before {
            return self.unexpected();
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::ThrowStatement {
            argument,
            location: self.finish(start),
        })
    }

    fn parse_try_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let block = self.parse_block()?;

        let handler = if self.check_keyword(Keyword::Catch) {
            let catch_start = self.start();
            self.bump()?;
            let param = if self.eat(Punctuator::LParen)? {
                let param = self.parse_binding_target()?;
                self.expect(Punctuator::RParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                body,
                location: self.finish(catch_start),
            })
        } else {
            None
        };

        let finalizer = if self.check_keyword(Keyword::Finally) {
            self.bump()?;
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return self.unexpected();
        }
        Ok(Statement::TryStatement {
            block,
            handler,
            finalizer,
            location: self.finish(start),
        })
    }

    fn parse_switch_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let discriminant = self.parse_paren_expression()?;
        self.expect(Punctuator::LBrace)?;
        self.ctx.switch_depth += 1;
        let cases = self.parse_switch_cases();
        self.ctx.switch_depth -= 1;
        let cases = cases?;
        self.expect(Punctuator::RBrace)?;
        Ok(Statement::SwitchStatement {
            discriminant,
            cases,
            location: self.finish(start),
        })
    }

    fn parse_switch_cases(&mut self) -> SyntaxResult<Vec<SwitchCase>> {
        let mut cases = Vec::new();
        let mut has_default = false;
        while !self.check(Punctuator::RBrace) {
            let case_start = self.start();
            let test = if self.check_keyword(Keyword::Case) {
                self.bump()?;
                Some(self.with_allow_in(true, |p| p.parse_expression())?)
            } else if self.check_keyword(Keyword::Default) && !has_default {
                has_default = true;
                self.bump()?;
                None
            } else {
                return self.unexpected();
            };
            self.expect(Punctuator::Colon)?;

            let mut consequent = Vec::new();
            while !self.check(Punctuator::RBrace)
                && !self.check_keyword(Keyword::Case)
                && !self.check_keyword(Keyword::Default)
            {
                consequent.push(self.parse_statement_list_item()?);
            }
            cases.push(SwitchCase {
                test,
                consequent,
                location: self.finish(case_start),
            });
        }
        Ok(cases)
    }

    fn parse_with_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let object = self.parse_paren_expression()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::WithStatement {
            object,
            body,
            location: self.finish(start),
        })
    }

    // ---------------------------------------------------------------------
    // Modules
    // ---------------------------------------------------------------------

    fn parse_import_declaration(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;
        let mut specifiers = Vec::new();

        if self.current.kind == SyntaxKind::StringLiteral {
            let source = self.parse_literal()?;
            self.consume_semicolon()?;
            return Ok(Statement::ImportDeclaration {
                specifiers,
                source,
                location: self.finish(start),
            });
        }

        if self.current.kind == SyntaxKind::Identifier {
            let local = self.parse_identifier()?;
            specifiers.push(ImportSpecifier::ImportDefaultSpecifier {
                location: local.location,
                local,
            });
            if !self.eat(Punctuator::Comma)? {
                return self.finish_import(start, specifiers);
            }
        }

        if self.check(Punctuator::Star) {
            let spec_start = self.start();
            self.bump()?;
            self.expect_contextual("as")?;
            let local = self.parse_identifier()?;
            specifiers.push(ImportSpecifier::ImportNamespaceSpecifier {
                local,
                location: self.finish(spec_start),
            });
        } else if self.eat(Punctuator::LBrace)? {
            while !self.check(Punctuator::RBrace) {
                let spec_start = self.start();
                let imported = self.parse_module_export_name()?;
                let local = if self.check_identifier("as") {
                    self.bump()?;
                    self.parse_identifier()?
                } else {
                    imported.clone()
                };
                specifiers.push(ImportSpecifier::ImportSpecifier {
                    imported,
                    local,
                    location: self.finish(spec_start),
                });
                if !self.check(Punctuator::RBrace) {
                    self.expect(Punctuator::Comma)?;
                }
            }
            self.expect(Punctuator::RBrace)?;
        } else {
            return self.unexpected();
        }
        self.finish_import(start, specifiers)
    }

    fn finish_import(
        &mut self,
        start: SourcePosition,
        specifiers: Vec<ImportSpecifier>,
    ) -> SyntaxResult<Statement> {
        self.expect_contextual("from")?;
        let source = self.parse_module_source()?;
        self.consume_semicolon()?;
        Ok(Statement::ImportDeclaration {
            specifiers,
            source,
            location: self.finish(start),
        })
    }

    fn parse_module_source(&mut self) -> SyntaxResult<Literal> {
        if self.current.kind != SyntaxKind::StringLiteral {
            return self.unexpected();
        }
        self.parse_literal()
    }

    /// IdentifierName or string literal naming a module binding
    fn parse_module_export_name(&mut self) -> SyntaxResult<Identifier> {
        if self.current.kind == SyntaxKind::StringLiteral {
            let (token, name) = self.advance()?;
            return Ok(Identifier {
                name,
                location: token.location,
            });
        }
        self.parse_identifier_name()
    }

    fn parse_export_declaration(&mut self) -> SyntaxResult<Statement> {
        let start = self.start();
        self.bump()?;

        if self.eat(Punctuator::Star)? {
            let exported = if self.check_identifier("as") {
                self.bump()?;
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            self.expect_contextual("from")?;
            let source = self.parse_module_source()?;
            self.consume_semicolon()?;
            return Ok(Statement::ExportAllDeclaration {
                exported,
                source,
                location: self.finish(start),
            });
        }

        if self.check_keyword(Keyword::Default) {
            self.bump()?;
            let declaration = self.parse_export_default()?;
            return Ok(Statement::ExportDefaultDeclaration {
                declaration,
                location: self.finish(start),
            });
        }

        if self.eat(Punctuator::LBrace)? {
            let mut specifiers = Vec::new();
            while !self.check(Punctuator::RBrace) {
                let spec_start = self.start();
                let local = self.parse_module_export_name()?;
                let exported = if self.check_identifier("as") {
                    self.bump()?;
                    self.parse_module_export_name()?
                } else {
                    local.clone()
                };
                specifiers.push(ExportSpecifier {
                    local,
                    exported,
                    location: self.finish(spec_start),
                });
                if !self.check(Punctuator::RBrace) {
                    self.expect(Punctuator::Comma)?;
                }
            }
            self.expect(Punctuator::RBrace)?;
            let source = if self.check_identifier("from") {
                self.bump()?;
                Some(self.parse_module_source()?)
            } else {
                None
            };
            self.consume_semicolon()?;
            return Ok(Statement::ExportNamedDeclaration {
                declaration: None,
                specifiers,
                source,
                location: self.finish(start),
            });
        }

        let declaration = if self.check_keyword(Keyword::Var) {
            self.parse_variable_statement(VariableKind::Var)?
        } else {
            match self.try_parse_declaration()? {
                Some(decl) => decl,
                None => return self.unexpected(),
            }
        };
        Ok(Statement::ExportNamedDeclaration {
            declaration: Some(Box::new(declaration)),
            specifiers: Vec::new(),
            source: None,
            location: self.finish(start),
        })
    }

    fn parse_export_default(&mut self) -> SyntaxResult<ExportDefaultKind> {
        let start = self.start();
        if self.check_keyword(Keyword::Function) {
            return Ok(ExportDefaultKind::FunctionDeclaration(
                self.parse_function(start, false, false)?,
            ));
        }
        if self.check_identifier("async") && self.peek_is_async_function()? {
            self.bump()?;
            return Ok(ExportDefaultKind::FunctionDeclaration(
                self.parse_function(start, true, false)?,
            ));
        }
        if self.check_keyword(Keyword::Class) {
            return Ok(ExportDefaultKind::ClassDeclaration(self.parse_class(false)?));
        }
        let expression = self.parse_assignment()?;
        self.consume_semicolon()?;
        Ok(ExportDefaultKind::Expression { expression })
    }

    // ---------------------------------------------------------------------
    // Identifiers, literals and bindings
    // ---------------------------------------------------------------------

    fn parse_identifier(&mut self) -> SyntaxResult<Identifier> {
        if self.current.kind != SyntaxKind::Identifier {
            return self.unexpected();
        }
        let (token, name) = self.advance()?;
        Ok(Identifier {
            name,
            location: token.location,
        })
    }

    /// Identifier or reserved word, as after `.` or in property keys
    fn parse_identifier_name(&mut self) -> SyntaxResult<Identifier> {
        if !matches!(
            self.current.kind,
            SyntaxKind::Identifier | SyntaxKind::Keyword(_)
        ) {
            return self.unexpected();
        }
        let (token, name) = self.advance()?;
        Ok(Identifier {
            name,
            location: token.location,
        })
    }

    fn parse_literal(&mut self) -> SyntaxResult<Literal> {
        let (token, text) = self.advance()?;
        let value = match token.kind {
            SyntaxKind::NumericLiteral => match parse_numeric_value(&text) {
                Some(n) => LiteralValue::Number(n),
                None => return Err(syntax_error(ErrorKind::InvalidNumericLiteral, token.location)),
            },
            SyntaxKind::BigIntLiteral => match bigint_digits(&text) {
                Some(digits) => LiteralValue::BigInt(digits),
                None => return Err(syntax_error(ErrorKind::InvalidNumericLiteral, token.location)),
            },
            SyntaxKind::StringLiteral => LiteralValue::String(text),
            SyntaxKind::RegexLiteral => {
                let raw = token.raw_value.as_str();
                let slash = raw.rfind('/').unwrap_or(0);
                LiteralValue::RegExp {
                    pattern: raw.get(1..slash).unwrap_or("").to_string(),
                    flags: raw.get(slash + 1..).unwrap_or("").to_string(),
                }
            }
            SyntaxKind::Keyword(Keyword::Null) => LiteralValue::Null,
            SyntaxKind::Keyword(Keyword::True) => LiteralValue::Boolean(true),
            SyntaxKind::Keyword(Keyword::False) => LiteralValue::Boolean(false),
            _ => return Err(unexpected_token(&token)),
        };
        Ok(Literal {
            value,
            raw: token.raw_value,
            location: token.location,
        })
    }

    /// Identifier, array pattern or object pattern
    fn parse_binding_target(&mut self) -> SyntaxResult<Pattern> {
        if self.check(Punctuator::LBracket) {
            return self.parse_array_binding();
        }
        if self.check(Punctuator::LBrace) {
            return self.parse_object_binding();
        }
        Ok(Pattern::Identifier(self.parse_identifier()?))
    }

    /// Binding target with an optional default value
    fn parse_binding_element(&mut self) -> SyntaxResult<Pattern> {
        let start = self.start();
        let target = self.parse_binding_target()?;
        if !self.eat(Punctuator::Assign)? {
            return Ok(target);
        }
        let right = self.with_allow_in(true, |p| p.parse_assignment())?;
        Ok(Pattern::AssignmentPattern {
            left: Box::new(target),
            right: Box::new(right),
            location: self.finish(start),
        })
    }

    fn parse_binding_rest(&mut self) -> SyntaxResult<Pattern> {
        let start = self.start();
        self.expect(Punctuator::Spread)?;
        let argument = self.parse_binding_target()?;
        if self.check(Punctuator::Assign) {
            return self.unexpected();
        }
        Ok(Pattern::RestElement {
            argument: Box::new(argument),
            location: self.finish(start),
        })
    }

    /// A rest element must be directly followed by `close`
    fn check_rest_is_last(&mut self, rest: SourceLocation, close: Punctuator) -> SyntaxResult<()> {
        if self.check(close) {
            return Ok(());
        }
        if !self.check(Punctuator::Comma) {
            return self.unexpected();
        }
        if self.peek()?.is_punctuator(close) {
            return Err(syntax_error(
                ErrorKind::RestElementCanNotEndWithComma,
                self.current.location,
            ));
        }
        Err(syntax_error(ErrorKind::RestElementShouldBeLastProperty, rest))
    }

    fn parse_array_binding(&mut self) -> SyntaxResult<Pattern> {
        let start = self.start();
        self.expect(Punctuator::LBracket)?;
        let mut elements = Vec::new();
        while !self.check(Punctuator::RBracket) {
            if self.eat(Punctuator::Comma)? {
                elements.push(None);
                continue;
            }
            if self.check(Punctuator::Spread) {
                let rest = self.parse_binding_rest()?;
                self.check_rest_is_last(rest.location(), Punctuator::RBracket)?;
                elements.push(Some(rest));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.check(Punctuator::RBracket) {
                self.expect(Punctuator::Comma)?;
            }
        }
        self.expect(Punctuator::RBracket)?;
        Ok(Pattern::ArrayPattern {
            elements,
            location: self.finish(start),
        })
    }

    fn parse_object_binding(&mut self) -> SyntaxResult<Pattern> {
        let start = self.start();
        self.expect(Punctuator::LBrace)?;
        let mut properties = Vec::new();
        while !self.check(Punctuator::RBrace) {
            if self.check(Punctuator::Spread) {
                let rest_start = self.start();
                self.bump()?;
                let argument = Pattern::Identifier(self.parse_identifier()?);
                let location = self.finish(rest_start);
                self.check_rest_is_last(location, Punctuator::RBrace)?;
                properties.push(ObjectPatternProperty::RestElement {
                    argument: Box::new(argument),
                    location,
                });
                break;
            }
            properties.push(self.parse_binding_property()?);
            if !self.check(Punctuator::RBrace) {
                self.expect(Punctuator::Comma)?;
            }
        }
        self.expect(Punctuator::RBrace)?;
        Ok(Pattern::ObjectPattern {
            properties,
            location: self.finish(start),
        })
    }

    fn parse_binding_property(&mut self) -> SyntaxResult<ObjectPatternProperty> {
        let start = self.start();
        let is_identifier = self.current.kind == SyntaxKind::Identifier;
        let (key, computed) = self.parse_property_key(false)?;
        if self.eat(Punctuator::Colon)? {
            let value = self.parse_binding_element()?;
            return Ok(ObjectPatternProperty::Property {
                key,
                value,
                shorthand: false,
                computed,
                location: self.finish(start),
            });
        }

        let id = match &key {
            PropertyKey::Identifier(id) if is_identifier => id.clone(),
            _ => return self.unexpected(),
        };
        let mut value = Pattern::Identifier(id);
        if self.eat(Punctuator::Assign)? {
            let right = self.with_allow_in(true, |p| p.parse_assignment())?;
            value = Pattern::AssignmentPattern {
                left: Box::new(value),
                right: Box::new(right),
                location: self.finish(start),
            };
        }
        Ok(ObjectPatternProperty::Property {
            key,
            value,
            shorthand: true,
            computed: false,
            location: self.finish(start),
        })
    }

    /// Parse a property key, returning it with its `computed` flag
    fn parse_property_key(&mut self, allow_private: bool) -> SyntaxResult<(PropertyKey, bool)> {
        let start = self.start();
        match self.current.kind {
            SyntaxKind::Identifier | SyntaxKind::Keyword(_) => {
                Ok((PropertyKey::Identifier(self.parse_identifier_name()?), false))
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                Ok((PropertyKey::Literal(self.parse_literal()?), false))
            }
            SyntaxKind::PrivateName => {
                if !allow_private {
                    return Err(syntax_error(
                        ErrorKind::PrivateFieldCanNotUseInObject,
                        self.current.location,
                    ));
                }
                let (token, name) = self.advance()?;
                Ok((
                    PropertyKey::PrivateName(Identifier {
                        name,
                        location: token.location,
                    }),
                    false,
                ))
            }
            SyntaxKind::Punctuator(Punctuator::LBracket) => {
                self.bump()?;
                let expression = self.with_allow_in(true, |p| p.parse_assignment())?;
                self.expect(Punctuator::RBracket)?;
                Ok((
                    PropertyKey::Computed {
                        expression: Box::new(expression),
                        location: self.finish(start),
                    },
                    true,
                ))
            }
            _ => self.unexpected(),
        }
    }

    // ---------------------------------------------------------------------
    // Functions and classes
    // ---------------------------------------------------------------------

    /// Parse `function [*] [name] (params) { body }`; a leading `async` has
    /// already been consumed by the caller, which passes its start
    fn parse_function(
        &mut self,
        start: SourcePosition,
        is_async: bool,
        name_required: bool,
    ) -> SyntaxResult<Function> {
        self.expect_keyword(Keyword::Function)?;
        let is_generator = self.eat(Punctuator::Star)?;
        let id = if self.current.kind == SyntaxKind::Identifier {
            Some(self.parse_identifier()?)
        } else if name_required {
            return self.unexpected();
        } else {
            None
        };
        let (params, body) = self.parse_function_rest(is_async, is_generator, false)?;
        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
            location: self.finish(start),
        })
    }

    fn parse_function_rest(
        &mut self,
        is_async: bool,
        is_generator: bool,
        is_method: bool,
    ) -> SyntaxResult<(Vec<Pattern>, Vec<Statement>)> {
        let saved = self.enter_function(is_async, is_generator, is_method);
        let result = self.parse_formal_parameters().and_then(|params| {
            let body = self.parse_block()?;
            Ok((params, body))
        });
        self.ctx = saved;
        result
    }

    fn parse_formal_parameters(&mut self) -> SyntaxResult<Vec<Pattern>> {
        self.expect(Punctuator::LParen)?;
        let mut params = Vec::new();
        while !self.check(Punctuator::RParen) {
            if self.check(Punctuator::Spread) {
                let rest = self.parse_binding_rest()?;
                self.check_rest_is_last(rest.location(), Punctuator::RParen)?;
                params.push(rest);
                break;
            }
            params.push(self.parse_binding_element()?);
            if !self.check(Punctuator::RParen) {
                self.expect(Punctuator::Comma)?;
            }
        }
        self.expect(Punctuator::RParen)?;
        Ok(params)
    }

    /// Method body starting at `(`; the function spans parameters and body
    fn parse_method_function(&mut self, is_async: bool, is_generator: bool) -> SyntaxResult<Function> {
        let start = self.start();
        let (params, body) = self.parse_function_rest(is_async, is_generator, true)?;
        Ok(Function {
            id: None,
            params,
            body,
            is_async,
            is_generator,
            location: self.finish(start),
        })
    }

    fn parse_class(&mut self, name_required: bool) -> SyntaxResult<Class> {
        let start = self.start();
        self.expect_keyword(Keyword::Class)?;
        let id = if self.current.kind == SyntaxKind::Identifier {
            Some(self.parse_identifier()?)
        } else if name_required {
            return self.unexpected();
        } else {
            None
        };
        let super_class = if self.check_keyword(Keyword::Extends) {
            self.bump()?;
            Some(Box::new(self.parse_lhs_expression()?))
        } else {
            None
        };

        if !self.check(Punctuator::LBrace) {
            return self.unexpected();
        }
        // The `{` is the lexer's latest token, so the class body context
        // covers every token up to the matching `}`
        self.lexer.enter_class_body();
        self.bump()?;

        let in_class = mem::replace(&mut self.ctx.in_class, true);
        let body = self.parse_class_body();
        self.ctx.in_class = in_class;
        Ok(Class {
            id,
            super_class,
            body: body?,
            location: self.finish(start),
        })
    }

    fn parse_class_body(&mut self) -> SyntaxResult<Vec<ClassMember>> {
        let mut members = Vec::new();
        let mut has_constructor = false;
        while !self.check(Punctuator::RBrace) {
            if self.eat(Punctuator::Semicolon)? {
                continue;
            }
            let member = self.parse_class_member()?;
            if let ClassMember::MethodDefinition {
                kind: MethodKind::Constructor,
                location,
                ..
            } = &member
            {
                if has_constructor {
                    return Err(syntax_error(ErrorKind::DuplicateConstructor, *location));
                }
                has_constructor = true;
            }
            members.push(member);
        }
        self.expect(Punctuator::RBrace)?;
        Ok(members)
    }

    fn parse_class_member(&mut self) -> SyntaxResult<ClassMember> {
        let start = self.start();
        let mut is_static = false;
        if self.check_identifier("static") {
            let next = self.peek()?;
            if next.is_punctuator(Punctuator::LBrace) {
                self.bump()?;
                return self.parse_static_block(start);
            }
            if !is_member_name_end(&next) {
                self.bump()?;
                is_static = true;
            }
        }

        let head = self.parse_member_head(true)?;
        if self.check(Punctuator::LParen) {
            return self.parse_class_method(start, head, is_static);
        }

        if head.kind != MethodKind::Method || head.is_async || head.is_generator {
            return self.unexpected();
        }
        if !head.computed && head.key.static_name() == Some("constructor") {
            return Err(syntax_error(
                ErrorKind::ConstructorCanNotBeSpecialMember,
                head.key.location(),
            ));
        }
        let value = if self.eat(Punctuator::Assign)? {
            let saved = self.enter_initializer();
            let value = self.parse_assignment();
            self.ctx = saved;
            Some(value?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(ClassMember::PropertyDefinition {
            key: head.key,
            value,
            is_static,
            computed: head.computed,
            location: self.finish(start),
        })
    }

    fn parse_static_block(&mut self, start: SourcePosition) -> SyntaxResult<ClassMember> {
        let saved = self.enter_initializer();
        let body = self.parse_block();
        self.ctx = saved;
        Ok(ClassMember::StaticBlock {
            body: body?,
            location: self.finish(start),
        })
    }

    fn parse_class_method(
        &mut self,
        start: SourcePosition,
        head: MemberHead,
        is_static: bool,
    ) -> SyntaxResult<ClassMember> {
        let is_constructor =
            !is_static && !head.computed && head.key.static_name() == Some("constructor");
        let kind = if is_constructor {
            if head.kind != MethodKind::Method {
                return Err(syntax_error(
                    ErrorKind::ConstructorCanNotBeSpecialMember,
                    head.key.location(),
                ));
            }
            MethodKind::Constructor
        } else {
            head.kind
        };
        let value = self.parse_method_function(head.is_async, head.is_generator)?;
        check_method_shape(kind, &value)?;
        Ok(ClassMember::MethodDefinition {
            key: head.key,
            kind,
            value,
            is_static,
            computed: head.computed,
            location: self.finish(start),
        })
    }

    /// Parse `[async] [*] [get|set] key`, shared by classes and object literals.
    ///
    /// A modifier word directly followed by the end of a member name is the
    /// name itself, as in `get() {}` or `async = 1`.
    fn parse_member_head(&mut self, allow_private: bool) -> SyntaxResult<MemberHead> {
        let mut is_async = false;
        let mut is_generator = false;
        let mut kind = MethodKind::Method;

        if self.check_identifier("async") {
            let next = self.peek()?;
            if !is_member_name_end(&next) && !next.newline_before {
                self.bump()?;
                is_async = true;
            }
        }
        if self.eat(Punctuator::Star)? {
            is_generator = true;
        }
        if self.check_identifier("get") || self.check_identifier("set") {
            let next = self.peek()?;
            if !is_member_name_end(&next) {
                kind = if self.check_identifier("get") {
                    MethodKind::Get
                } else {
                    MethodKind::Set
                };
                self.bump()?;
                if self.eat(Punctuator::Star)? {
                    is_generator = true;
                }
            }
        }

        let is_identifier = self.current.kind == SyntaxKind::Identifier;
        let (key, computed) = self.parse_property_key(allow_private)?;
        Ok(MemberHead {
            key,
            computed,
            kind,
            is_async,
            is_generator,
            is_identifier,
        })
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    /// Expression, including the comma operator
    fn parse_expression(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let first = self.parse_assignment()?;
        if !self.check(Punctuator::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(Punctuator::Comma)? {
            expressions.push(self.parse_assignment()?);
        }
        Ok(Expression::SequenceExpression {
            expressions,
            location: self.finish(start),
        })
    }

    fn parse_assignment(&mut self) -> SyntaxResult<Expression> {
        if self.ctx.in_generator && self.check_identifier("yield") {
            return self.parse_yield();
        }
        let start = self.start();
        let cover_len = self.cover_inits.len();
        let left = self.parse_conditional()?;
        if matches!(left, Expression::ArrowFunctionExpression(_)) {
            return Ok(left);
        }
        let Some(operator) = self.assignment_operator() else {
            return Ok(left);
        };

        let target = if operator == AssignmentOperator::Assign {
            let pattern = self.expression_to_pattern(left, false)?;
            self.release_cover_inits(cover_len, &pattern);
            pattern
        } else if is_simple_target(&left) {
            self.expression_to_pattern(left, false)?
        } else {
            return Err(syntax_error(ErrorKind::InvalidAssignmentTarget, left.location()));
        };
        self.bump()?;
        let right = self.parse_assignment()?;
        Ok(Expression::AssignmentExpression {
            operator,
            left: Box::new(target),
            right: Box::new(right),
            location: self.finish(start),
        })
    }

    fn assignment_operator(&self) -> Option<AssignmentOperator> {
        let SyntaxKind::Punctuator(p) = self.current.kind else {
            return None;
        };
        let operator = match p {
            Punctuator::Assign => AssignmentOperator::Assign,
            Punctuator::PlusEq => AssignmentOperator::AddAssign,
            Punctuator::MinusEq => AssignmentOperator::SubAssign,
            Punctuator::StarEq => AssignmentOperator::MulAssign,
            Punctuator::SlashEq => AssignmentOperator::DivAssign,
            Punctuator::PercentEq => AssignmentOperator::ModAssign,
            Punctuator::StarStarEq => AssignmentOperator::ExpAssign,
            Punctuator::AndEq => AssignmentOperator::BitAndAssign,
            Punctuator::OrEq => AssignmentOperator::BitOrAssign,
            Punctuator::XorEq => AssignmentOperator::BitXorAssign,
            Punctuator::LtLtEq => AssignmentOperator::LeftShiftAssign,
            Punctuator::GtGtEq => AssignmentOperator::RightShiftAssign,
            Punctuator::GtGtGtEq => AssignmentOperator::UnsignedRightShiftAssign,
            Punctuator::AndAndEq => AssignmentOperator::LogicalAndAssign,
            Punctuator::OrOrEq => AssignmentOperator::LogicalOrAssign,
            Punctuator::NullishCoalesceEq => AssignmentOperator::NullishCoalesceAssign,
            _ => return None,
        };
        Some(operator)
    }

    fn parse_yield(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        self.bump()?;
        let delegate = !self.current.newline_before && self.eat(Punctuator::Star)?;
        let ends_here = self.can_insert_semicolon()
            || self.check(Punctuator::RParen)
            || self.check(Punctuator::RBracket)
            || self.check(Punctuator::Colon)
            || self.check(Punctuator::Comma)
            || matches!(
                self.current.kind,
                SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail
            );
        let argument = if delegate || !ends_here {
            Some(Box::new(self.parse_assignment()?))
        } else {
            None
        };
        Ok(Expression::YieldExpression {
            argument,
            delegate,
            location: self.finish(start),
        })
    }

    fn parse_conditional(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let test = self.parse_binary(0)?;
        if matches!(test, Expression::ArrowFunctionExpression(_))
            || !self.eat(Punctuator::Question)?
        {
            return Ok(test);
        }
        let consequent = self.with_allow_in(true, |p| p.parse_assignment())?;
        self.expect(Punctuator::Colon)?;
        let alternate = self.parse_assignment()?;
        Ok(Expression::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            location: self.finish(start),
        })
    }

    /// Binary operator at the current token with its precedence
    fn binary_operator(&self) -> Option<(Operator, u8)> {
        let op = match self.current.kind {
            SyntaxKind::Punctuator(p) => match p {
                Punctuator::NullishCoalesce => (Operator::Logical(LogicalOperator::NullishCoalesce), 1),
                Punctuator::OrOr => (Operator::Logical(LogicalOperator::Or), 2),
                Punctuator::AndAnd => (Operator::Logical(LogicalOperator::And), 3),
                Punctuator::Or => (Operator::Binary(BinaryOperator::BitwiseOr), 4),
                Punctuator::Xor => (Operator::Binary(BinaryOperator::BitwiseXor), 5),
                Punctuator::And => (Operator::Binary(BinaryOperator::BitwiseAnd), 6),
                Punctuator::EqEq => (Operator::Binary(BinaryOperator::Eq), 7),
                Punctuator::NotEq => (Operator::Binary(BinaryOperator::NotEq), 7),
                Punctuator::EqEqEq => (Operator::Binary(BinaryOperator::StrictEq), 7),
                Punctuator::NotEqEq => (Operator::Binary(BinaryOperator::StrictNotEq), 7),
                Punctuator::Lt => (Operator::Binary(BinaryOperator::Lt), 8),
                Punctuator::LtEq => (Operator::Binary(BinaryOperator::LtEq), 8),
                Punctuator::Gt => (Operator::Binary(BinaryOperator::Gt), 8),
                Punctuator::GtEq => (Operator::Binary(BinaryOperator::GtEq), 8),
                Punctuator::LtLt => (Operator::Binary(BinaryOperator::LeftShift), 9),
                Punctuator::GtGt => (Operator::Binary(BinaryOperator::RightShift), 9),
                Punctuator::GtGtGt => (Operator::Binary(BinaryOperator::UnsignedRightShift), 9),
                Punctuator::Plus => (Operator::Binary(BinaryOperator::Add), 10),
                Punctuator::Minus => (Operator::Binary(BinaryOperator::Sub), 10),
                Punctuator::Star => (Operator::Binary(BinaryOperator::Mul), 11),
                Punctuator::Slash => (Operator::Binary(BinaryOperator::Div), 11),
                Punctuator::Percent => (Operator::Binary(BinaryOperator::Mod), 11),
                Punctuator::StarStar => (Operator::Binary(BinaryOperator::Exp), EXPONENT_PRECEDENCE),
                _ => return None,
            },
            SyntaxKind::Keyword(Keyword::Instanceof) => (Operator::Binary(BinaryOperator::Instanceof), 8),
            SyntaxKind::Keyword(Keyword::In) if self.ctx.allow_in => {
                (Operator::Binary(BinaryOperator::In), 8)
            }
            _ => return None,
        };
        Some(op)
    }

    /// Precedence climbing over binary and logical operators
    fn parse_binary(&mut self, min_precedence: u8) -> SyntaxResult<Expression> {
        let start = self.start();
        let mut left = self.parse_unary()?;
        // An arrow function is never an operand
        if matches!(left, Expression::ArrowFunctionExpression(_)) {
            return Ok(left);
        }
        while let Some((operator, precedence)) = self.binary_operator() {
            if precedence < min_precedence {
                break;
            }
            if precedence == EXPONENT_PRECEDENCE
                && matches!(
                    left,
                    Expression::UnaryExpression { .. } | Expression::AwaitExpression { .. }
                )
            {
                return Err(syntax_error(ErrorKind::UnaryBeforeExponentiation, left.location()));
            }
            self.bump()?;
            let next_min = if precedence == EXPONENT_PRECEDENCE {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary(next_min)?;
            let location = self.finish(start);
            left = match operator {
                Operator::Logical(operator) => {
                    check_nullish_mix(operator, &left, &right, location)?;
                    Expression::LogicalExpression {
                        operator,
                        left: Box::new(left),
                        right: Box::new(right),
                        location,
                    }
                }
                Operator::Binary(operator) => Expression::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    location,
                },
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let operator = match self.current.kind {
            SyntaxKind::Punctuator(Punctuator::Minus) => Some(UnaryOperator::Minus),
            SyntaxKind::Punctuator(Punctuator::Plus) => Some(UnaryOperator::Plus),
            SyntaxKind::Punctuator(Punctuator::Not) => Some(UnaryOperator::Not),
            SyntaxKind::Punctuator(Punctuator::Tilde) => Some(UnaryOperator::BitwiseNot),
            SyntaxKind::Keyword(Keyword::Typeof) => Some(UnaryOperator::Typeof),
            SyntaxKind::Keyword(Keyword::Void) => Some(UnaryOperator::Void),
            SyntaxKind::Keyword(Keyword::Delete) => Some(UnaryOperator::Delete),
            _ => None,
        };
        if let Some(operator) = operator {
            self.bump()?;
            let argument = self.parse_unary()?;
            return Ok(Expression::UnaryExpression {
                operator,
                argument: Box::new(argument),
                location: self.finish(start),
            });
        }

        if let Some(operator) = self.update_operator() {
            self.bump()?;
            let argument = self.parse_unary()?;
            if !is_simple_target(&argument) {
                return Err(syntax_error(ErrorKind::InvalidAssignmentTarget, argument.location()));
            }
            return Ok(Expression::UpdateExpression {
                operator,
                prefix: true,
                argument: Box::new(argument),
                location: self.finish(start),
            });
        }

        if self.ctx.in_async && self.check_identifier("await") {
            self.bump()?;
            let argument = self.parse_unary()?;
            return Ok(Expression::AwaitExpression {
                argument: Box::new(argument),
                location: self.finish(start),
            });
        }

        let expr = self.parse_lhs_expression()?;
        match self.update_operator() {
            Some(operator) if !self.current.newline_before => {
                if !is_simple_target(&expr) {
                    return Err(syntax_error(ErrorKind::InvalidAssignmentTarget, expr.location()));
                }
                self.bump()?;
                Ok(Expression::UpdateExpression {
                    operator,
                    prefix: false,
                    argument: Box::new(expr),
                    location: self.finish(start),
                })
            }
            _ => Ok(expr),
        }
    }

    fn update_operator(&self) -> Option<UpdateOperator> {
        if self.check(Punctuator::PlusPlus) {
            Some(UpdateOperator::Increment)
        } else if self.check(Punctuator::MinusMinus) {
            Some(UpdateOperator::Decrement)
        } else {
            None
        }
    }

    /// Member, call, optional chain and tagged template expressions
    fn parse_lhs_expression(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let expr = if self.check_keyword(Keyword::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        if matches!(expr, Expression::ArrowFunctionExpression(_)) {
            return Ok(expr);
        }
        self.parse_call_tail(start, expr)
    }

    fn parse_call_tail(&mut self, start: SourcePosition, mut expr: Expression) -> SyntaxResult<Expression> {
        let mut in_optional_chain = false;
        loop {
            let kind = self.current.kind;
            expr = match kind {
                SyntaxKind::Punctuator(Punctuator::Dot) => {
                    self.bump()?;
                    let property = self.parse_member_property()?;
                    member(expr, property, false, false, self.finish(start))
                }
                SyntaxKind::Punctuator(Punctuator::OptionalChain) => {
                    self.bump()?;
                    in_optional_chain = true;
                    if self.check(Punctuator::LParen) {
                        let arguments = self.parse_arguments()?;
                        Expression::CallExpression {
                            callee: Box::new(expr),
                            arguments,
                            optional: true,
                            location: self.finish(start),
                        }
                    } else if self.eat(Punctuator::LBracket)? {
                        let property = self.with_allow_in(true, |p| p.parse_expression())?;
                        self.expect(Punctuator::RBracket)?;
                        member(expr, property, true, true, self.finish(start))
                    } else {
                        let property = self.parse_member_property()?;
                        member(expr, property, false, true, self.finish(start))
                    }
                }
                SyntaxKind::Punctuator(Punctuator::LBracket) => {
                    self.bump()?;
                    let property = self.with_allow_in(true, |p| p.parse_expression())?;
                    self.expect(Punctuator::RBracket)?;
                    member(expr, property, true, false, self.finish(start))
                }
                SyntaxKind::Punctuator(Punctuator::LParen) => {
                    let arguments = self.parse_arguments()?;
                    Expression::CallExpression {
                        callee: Box::new(expr),
                        arguments,
                        optional: false,
                        location: self.finish(start),
                    }
                }
                SyntaxKind::NoSubstitutionTemplate | SyntaxKind::TemplateHead => {
                    if in_optional_chain {
                        return Err(syntax_error(
                            ErrorKind::TagTemplateExpressionCanNotUseOptionChain,
                            self.current.location,
                        ));
                    }
                    let quasi = self.parse_template_literal()?;
                    Expression::TaggedTemplateExpression {
                        tag: Box::new(expr),
                        quasi,
                        location: self.finish(start),
                    }
                }
                _ => return Ok(expr),
            };
        }
    }

    /// Property name after `.` or `?.`
    fn parse_member_property(&mut self) -> SyntaxResult<Expression> {
        if self.current.kind == SyntaxKind::PrivateName {
            let (token, name) = self.advance()?;
            return Ok(Expression::PrivateName(Identifier {
                name,
                location: token.location,
            }));
        }
        Ok(Expression::Identifier(self.parse_identifier_name()?))
    }

    fn parse_new(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let (new_token, _) = self.advance()?;
        if self.eat(Punctuator::Dot)? {
            if !self.check_identifier("target") {
                return self.unexpected();
            }
            let property = self.parse_identifier()?;
            return Ok(Expression::MetaProperty {
                meta: Identifier {
                    name: "new".to_string(),
                    location: new_token.location,
                },
                property,
                location: self.finish(start),
            });
        }

        let callee_start = self.start();
        let mut callee = if self.check_keyword(Keyword::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            let kind = self.current.kind;
            callee = match kind {
                SyntaxKind::Punctuator(Punctuator::Dot) => {
                    self.bump()?;
                    let property = self.parse_member_property()?;
                    member(callee, property, false, false, self.finish(callee_start))
                }
                SyntaxKind::Punctuator(Punctuator::LBracket) => {
                    self.bump()?;
                    let property = self.with_allow_in(true, |p| p.parse_expression())?;
                    self.expect(Punctuator::RBracket)?;
                    member(callee, property, true, false, self.finish(callee_start))
                }
                SyntaxKind::NoSubstitutionTemplate | SyntaxKind::TemplateHead => {
                    let quasi = self.parse_template_literal()?;
                    Expression::TaggedTemplateExpression {
                        tag: Box::new(callee),
                        quasi,
                        location: self.finish(callee_start),
                    }
                }
                SyntaxKind::Punctuator(Punctuator::OptionalChain) => {
                    return Err(syntax_error(
                        ErrorKind::NewExpressionCantUsingOptionalChain,
                        self.current.location,
                    ));
                }
                _ => break,
            };
        }

        let arguments = if self.check(Punctuator::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expression::NewExpression {
            callee: Box::new(callee),
            arguments,
            location: self.finish(start),
        })
    }

    fn parse_arguments(&mut self) -> SyntaxResult<Vec<ExpressionOrSpread>> {
        self.expect(Punctuator::LParen)?;
        let mut arguments = Vec::new();
        while !self.check(Punctuator::RParen) {
            arguments.push(self.parse_spread_or_assignment()?);
            if !self.check(Punctuator::RParen) {
                self.expect(Punctuator::Comma)?;
            }
        }
        self.expect(Punctuator::RParen)?;
        Ok(arguments)
    }

    /// Array element or call argument
    fn parse_spread_or_assignment(&mut self) -> SyntaxResult<ExpressionOrSpread> {
        let start = self.start();
        if self.eat(Punctuator::Spread)? {
            let argument = self.with_allow_in(true, |p| p.parse_assignment())?;
            let location = self.finish(start);
            if self.check(Punctuator::Comma) {
                self.spread_commas.insert(location.start.index);
            }
            return Ok(ExpressionOrSpread::Spread(SpreadElement { argument, location }));
        }
        let expression = self.with_allow_in(true, |p| p.parse_assignment())?;
        Ok(ExpressionOrSpread::Expression(expression))
    }

    fn parse_primary(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let kind = self.current.kind;
        match kind {
            SyntaxKind::Identifier => self.parse_identifier_reference(),
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegexLiteral
            | SyntaxKind::Keyword(Keyword::Null | Keyword::True | Keyword::False) => {
                Ok(Expression::Literal(self.parse_literal()?))
            }
            SyntaxKind::NoSubstitutionTemplate | SyntaxKind::TemplateHead => {
                Ok(Expression::TemplateLiteral(self.parse_template_literal()?))
            }
            SyntaxKind::Keyword(Keyword::This) => {
                self.bump()?;
                Ok(Expression::ThisExpression {
                    location: self.finish(start),
                })
            }
            SyntaxKind::Keyword(Keyword::Super) => {
                if !self.ctx.in_class && !self.ctx.in_method {
                    return self.unexpected();
                }
                self.bump()?;
                Ok(Expression::Super {
                    location: self.finish(start),
                })
            }
            SyntaxKind::Keyword(Keyword::Function) => {
                Ok(Expression::FunctionExpression(self.parse_function(start, false, false)?))
            }
            SyntaxKind::Keyword(Keyword::Class) => {
                Ok(Expression::ClassExpression(self.parse_class(false)?))
            }
            SyntaxKind::Keyword(Keyword::Import) => self.parse_import_expression(),
            SyntaxKind::Punctuator(Punctuator::Slash | Punctuator::SlashEq) => {
                self.rescan_regex()?;
                Ok(Expression::Literal(self.parse_literal()?))
            }
            SyntaxKind::Punctuator(Punctuator::LParen) => self.parse_parenthesized_or_arrow(),
            SyntaxKind::Punctuator(Punctuator::LBracket) => self.parse_array_literal(),
            SyntaxKind::Punctuator(Punctuator::LBrace) => self.parse_object_literal(),
            // `#x in obj` is the only expression a private name can start
            SyntaxKind::PrivateName if self.peek()?.is_keyword(Keyword::In) => {
                let (token, name) = self.advance()?;
                Ok(Expression::PrivateName(Identifier {
                    name,
                    location: token.location,
                }))
            }
            _ => self.unexpected(),
        }
    }

    /// Identifier, single-parameter arrow, or one of the `async` forms
    fn parse_identifier_reference(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        if self.check_identifier("async") {
            let next = self.peek()?;
            if !next.newline_before {
                if next.is_keyword(Keyword::Function) {
                    self.bump()?;
                    return Ok(Expression::FunctionExpression(
                        self.parse_function(start, true, false)?,
                    ));
                }
                if next.kind == SyntaxKind::Identifier {
                    self.bump()?;
                    let param = self.parse_identifier()?;
                    if !self.check(Punctuator::Arrow) || self.current.newline_before {
                        return self.unexpected();
                    }
                    return self.parse_arrow_body(start, vec![Pattern::Identifier(param)], true);
                }
                if next.is_punctuator(Punctuator::LParen) {
                    return self.parse_async_call_or_arrow();
                }
            }
        }

        let id = self.parse_identifier()?;
        if self.check(Punctuator::Arrow) && !self.current.newline_before {
            return self.parse_arrow_body(start, vec![Pattern::Identifier(id)], false);
        }
        Ok(Expression::Identifier(id))
    }

    /// `async(...)`: arrow parameters when `=>` follows, a call otherwise
    fn parse_async_call_or_arrow(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let cover_len = self.cover_inits.len();
        let callee = self.parse_identifier()?;
        let arguments = self.parse_arguments()?;

        if self.check(Punctuator::Arrow) && !self.current.newline_before {
            let count = arguments.len();
            let mut params = Vec::with_capacity(count);
            for (i, argument) in arguments.into_iter().enumerate() {
                let param = match argument {
                    ExpressionOrSpread::Expression(expr) => self.expression_to_pattern(expr, true)?,
                    ExpressionOrSpread::Spread(spread) => {
                        let location = spread.location;
                        let argument = self.spread_to_rest(spread, i + 1 == count, true)?;
                        Pattern::RestElement { argument, location }
                    }
                };
                params.push(param);
            }
            self.cover_inits.truncate(cover_len);
            return self.parse_arrow_body(start, params, true);
        }

        Ok(Expression::CallExpression {
            callee: Box::new(Expression::Identifier(callee)),
            arguments,
            optional: false,
            location: self.finish(start),
        })
    }

    /// `( ... )`: parenthesized expression, or arrow parameters when `=>`
    /// follows
    fn parse_parenthesized_or_arrow(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let cover_len = self.cover_inits.len();
        self.expect(Punctuator::LParen)?;
        let (mut items, rest, trailing_comma) = self.with_allow_in(true, |p| p.parse_paren_items())?;
        self.expect(Punctuator::RParen)?;

        if self.check(Punctuator::Arrow) && !self.current.newline_before {
            let mut params = items
                .into_iter()
                .map(|item| self.expression_to_pattern(item, true))
                .collect::<SyntaxResult<Vec<_>>>()?;
            params.extend(rest);
            self.cover_inits.truncate(cover_len);
            return self.parse_arrow_body(start, params, false);
        }

        if rest.is_some() || items.is_empty() || trailing_comma {
            return self.unexpected();
        }
        let expression = if items.len() == 1 {
            items.remove(0)
        } else {
            let first = items[0].location().start;
            let last = items[items.len() - 1].location().end;
            Expression::SequenceExpression {
                expressions: items,
                location: SourceLocation::new(first, last),
            }
        };
        Ok(Expression::ParenthesizedExpression {
            expression: Box::new(expression),
            location: self.finish(start),
        })
    }

    /// Items between parentheses: expressions, an optional trailing rest
    /// element, and whether the list ended with a comma
    fn parse_paren_items(&mut self) -> SyntaxResult<(Vec<Expression>, Option<Pattern>, bool)> {
        let mut items = Vec::new();
        let mut rest = None;
        let mut trailing_comma = false;
        while !self.check(Punctuator::RParen) {
            if self.check(Punctuator::Spread) {
                let pattern = self.parse_binding_rest()?;
                self.check_rest_is_last(pattern.location(), Punctuator::RParen)?;
                rest = Some(pattern);
                break;
            }
            items.push(self.parse_assignment()?);
            if !self.eat(Punctuator::Comma)? {
                break;
            }
            trailing_comma = self.check(Punctuator::RParen);
        }
        Ok((items, rest, trailing_comma))
    }

    /// Parse `=> body` for already converted parameters
    fn parse_arrow_body(
        &mut self,
        start: SourcePosition,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> SyntaxResult<Expression> {
        self.expect(Punctuator::Arrow)?;
        let saved = self.enter_arrow(is_async);
        let body = if self.check(Punctuator::LBrace) {
            self.with_allow_in(true, |p| p.parse_block())
                .map(ArrowFunctionBody::Block)
        } else {
            self.parse_assignment()
                .map(|expr| ArrowFunctionBody::Expression(Box::new(expr)))
        };
        self.ctx = saved;
        Ok(Expression::ArrowFunctionExpression(ArrowFunction {
            params,
            body: body?,
            is_async,
            location: self.finish(start),
        }))
    }

    /// `import.meta` or dynamic `import(source)`
    fn parse_import_expression(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        let (import_token, _) = self.advance()?;
        if self.eat(Punctuator::Dot)? {
            if !self.check_identifier("meta") {
                return self.unexpected();
            }
            let property = self.parse_identifier()?;
            return Ok(Expression::MetaProperty {
                meta: Identifier {
                    name: "import".to_string(),
                    location: import_token.location,
                },
                property,
                location: self.finish(start),
            });
        }
        self.expect(Punctuator::LParen)?;
        let source = self.with_allow_in(true, |p| p.parse_assignment())?;
        self.expect(Punctuator::RParen)?;
        Ok(Expression::ImportExpression {
            source: Box::new(source),
            location: self.finish(start),
        })
    }

    fn parse_template_literal(&mut self) -> SyntaxResult<TemplateLiteral> {
        let start = self.start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();

        if self.current.kind == SyntaxKind::NoSubstitutionTemplate {
            let (token, cooked) = self.advance()?;
            quasis.push(template_element(token, cooked, true));
        } else {
            if self.current.kind != SyntaxKind::TemplateHead {
                return self.unexpected();
            }
            let (token, cooked) = self.advance()?;
            quasis.push(template_element(token, cooked, false));
            loop {
                expressions.push(self.with_allow_in(true, |p| p.parse_expression())?);
                let kind = self.current.kind;
                let (token, cooked) = match kind {
                    SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail => self.advance()?,
                    _ => return self.unexpected(),
                };
                let tail = kind == SyntaxKind::TemplateTail;
                quasis.push(template_element(token, cooked, tail));
                if tail {
                    break;
                }
            }
        }
        Ok(TemplateLiteral {
            quasis,
            expressions,
            location: self.finish(start),
        })
    }

    fn parse_array_literal(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        self.expect(Punctuator::LBracket)?;
        let mut elements = Vec::new();
        while !self.check(Punctuator::RBracket) {
            if self.eat(Punctuator::Comma)? {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_spread_or_assignment()?));
            if !self.check(Punctuator::RBracket) {
                self.expect(Punctuator::Comma)?;
            }
        }
        self.expect(Punctuator::RBracket)?;
        Ok(Expression::ArrayExpression {
            elements,
            location: self.finish(start),
        })
    }

    fn parse_object_literal(&mut self) -> SyntaxResult<Expression> {
        let start = self.start();
        self.expect(Punctuator::LBrace)?;
        let mut properties = Vec::new();
        while !self.check(Punctuator::RBrace) {
            properties.push(self.parse_object_member()?);
            if !self.check(Punctuator::RBrace) {
                self.expect(Punctuator::Comma)?;
            }
        }
        self.expect(Punctuator::RBrace)?;
        Ok(Expression::ObjectExpression {
            properties,
            location: self.finish(start),
        })
    }

    fn parse_object_member(&mut self) -> SyntaxResult<ObjectMember> {
        let start = self.start();
        if self.eat(Punctuator::Spread)? {
            let argument = self.with_allow_in(true, |p| p.parse_assignment())?;
            let location = self.finish(start);
            if self.check(Punctuator::Comma) {
                self.spread_commas.insert(location.start.index);
            }
            return Ok(ObjectMember::SpreadElement { argument, location });
        }

        let head = self.parse_member_head(false)?;
        if self.check(Punctuator::LParen) {
            let value = self.parse_method_function(head.is_async, head.is_generator)?;
            check_method_shape(head.kind, &value)?;
            let kind = match head.kind {
                MethodKind::Get => PropertyKind::Get,
                MethodKind::Set => PropertyKind::Set,
                MethodKind::Method | MethodKind::Constructor => PropertyKind::Init,
            };
            return Ok(ObjectMember::Property {
                key: head.key,
                value: Expression::FunctionExpression(value),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                computed: head.computed,
                location: self.finish(start),
            });
        }
        if head.kind != MethodKind::Method || head.is_async || head.is_generator {
            return self.unexpected();
        }

        if self.eat(Punctuator::Colon)? {
            let value = self.with_allow_in(true, |p| p.parse_assignment())?;
            return Ok(ObjectMember::Property {
                key: head.key,
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand: false,
                computed: head.computed,
                location: self.finish(start),
            });
        }

        let id = match &head.key {
            PropertyKey::Identifier(id) if head.is_identifier => id.clone(),
            _ => return self.unexpected(),
        };
        let mut value = Expression::Identifier(id.clone());
        if self.eat(Punctuator::Assign)? {
            // Only valid if the literal later becomes a pattern
            let right = self.with_allow_in(true, |p| p.parse_assignment())?;
            let location = self.finish(start);
            self.cover_inits.push(location);
            value = Expression::AssignmentExpression {
                operator: AssignmentOperator::Assign,
                left: Box::new(Pattern::Identifier(id)),
                right: Box::new(right),
                location,
            };
        }
        Ok(ObjectMember::Property {
            key: head.key,
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: true,
            computed: false,
            location: self.finish(start),
        })
    }

    // ---------------------------------------------------------------------
    // Cover grammar
    // ---------------------------------------------------------------------

    /// Convert an expression parsed ahead of `=`, `=>` or a for-in/of head
    /// into a pattern.
    ///
    /// `binding` is set for arrow parameters, where member expressions and
    /// parenthesized targets are not allowed.
    fn expression_to_pattern(&self, expr: Expression, binding: bool) -> SyntaxResult<Pattern> {
        let location = expr.location();
        if !binding && matches!(expr, Expression::MemberExpression { .. }) && !in_optional_chain(&expr) {
            return Ok(Pattern::MemberExpression {
                expression: Box::new(expr),
            });
        }
        match expr {
            Expression::Identifier(id) => Ok(Pattern::Identifier(id)),
            Expression::ParenthesizedExpression { expression, .. }
                if !binding && is_simple_target(&expression) =>
            {
                self.expression_to_pattern(*expression, false)
            }
            Expression::ArrayExpression { elements, location } => {
                let count = elements.len();
                let mut patterns = Vec::with_capacity(count);
                for (i, element) in elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(ExpressionOrSpread::Expression(expr)) => {
                            Some(self.expression_to_pattern(expr, binding)?)
                        }
                        Some(ExpressionOrSpread::Spread(spread)) => {
                            let location = spread.location;
                            let argument = self.spread_to_rest(spread, i + 1 == count, binding)?;
                            Some(Pattern::RestElement { argument, location })
                        }
                    };
                    patterns.push(pattern);
                }
                Ok(Pattern::ArrayPattern {
                    elements: patterns,
                    location,
                })
            }
            Expression::ObjectExpression { properties, location } => {
                let count = properties.len();
                let mut patterns = Vec::with_capacity(count);
                for (i, property) in properties.into_iter().enumerate() {
                    match property {
                        ObjectMember::Property {
                            key,
                            value,
                            kind: PropertyKind::Init,
                            method: false,
                            shorthand,
                            computed,
                            location,
                        } => patterns.push(ObjectPatternProperty::Property {
                            key,
                            value: self.expression_to_pattern(value, binding)?,
                            shorthand,
                            computed,
                            location,
                        }),
                        ObjectMember::Property { location, .. } => {
                            return Err(syntax_error(ErrorKind::InvalidAssignmentTarget, location));
                        }
                        ObjectMember::SpreadElement { argument, location } => {
                            let spread = SpreadElement { argument, location };
                            let argument = self.spread_to_rest(spread, i + 1 == count, binding)?;
                            if matches!(
                                *argument,
                                Pattern::ObjectPattern { .. } | Pattern::ArrayPattern { .. }
                            ) {
                                return Err(syntax_error(ErrorKind::InvalidAssignmentTarget, location));
                            }
                            patterns.push(ObjectPatternProperty::RestElement { argument, location });
                        }
                    }
                }
                Ok(Pattern::ObjectPattern {
                    properties: patterns,
                    location,
                })
            }
            Expression::AssignmentExpression {
                operator: AssignmentOperator::Assign,
                left,
                right,
                location,
            } => {
                if binding && pattern_contains_member(&left) {
                    return Err(syntax_error(ErrorKind::InvalidAssignmentTarget, left.location()));
                }
                Ok(Pattern::AssignmentPattern {
                    left,
                    right,
                    location,
                })
            }
            _ => Err(syntax_error(ErrorKind::InvalidAssignmentTarget, location)),
        }
    }

    /// Convert a spread element into the argument of a rest element
    fn spread_to_rest(
        &self,
        spread: SpreadElement,
        is_last: bool,
        binding: bool,
    ) -> SyntaxResult<Box<Pattern>> {
        if !is_last {
            return Err(syntax_error(
                ErrorKind::RestElementShouldBeLastProperty,
                spread.location,
            ));
        }
        if self.spread_commas.contains(&spread.location.start.index) {
            return Err(syntax_error(
                ErrorKind::RestElementCanNotEndWithComma,
                spread.location,
            ));
        }
        if matches!(spread.argument, Expression::AssignmentExpression { .. }) {
            return Err(syntax_error(
                ErrorKind::InvalidAssignmentTarget,
                spread.argument.location(),
            ));
        }
        Ok(Box::new(self.expression_to_pattern(spread.argument, binding)?))
    }
}

/// Parse a complete source text into a program
pub fn parse(source: &str) -> SyntaxResult<Program> {
    Parser::new(source).parse()
}

/// Reject accessor and constructor shapes the language forbids
fn check_method_shape(kind: MethodKind, function: &Function) -> SyntaxResult<()> {
    let special = function.is_async || function.is_generator;
    let error = match kind {
        MethodKind::Get if special => Some(ErrorKind::GetterCanNotBeAsyncOrGenerator),
        MethodKind::Get if !function.params.is_empty() => Some(ErrorKind::GetterShouldNeverHasParams),
        MethodKind::Set if special => Some(ErrorKind::SetterCanNotBeAsyncOrGenerator),
        MethodKind::Set if function.params.len() != 1 => {
            Some(ErrorKind::SetterShouldHasAtLastOneParams)
        }
        MethodKind::Constructor if special => Some(ErrorKind::ConstructorCanNotBeAsyncOrGenerator),
        _ => None,
    };
    match error {
        Some(kind) => Err(syntax_error(kind, function.location)),
        None => Ok(()),
    }
}

/// `??` cannot share an operand with `||` or `&&` unless parenthesized
fn check_nullish_mix(
    operator: LogicalOperator,
    left: &Expression,
    right: &Expression,
    location: SourceLocation,
) -> SyntaxResult<()> {
    let is_logical = |expr: &Expression, nullish: bool| match expr {
        Expression::LogicalExpression { operator, .. } => {
            (*operator == LogicalOperator::NullishCoalesce) == nullish
        }
        _ => false,
    };
    let nullish = operator == LogicalOperator::NullishCoalesce;
    if is_logical(left, !nullish) || is_logical(right, !nullish) {
        return Err(syntax_error(ErrorKind::MixedNullishAndLogical, location));
    }
    Ok(())
}

/// Identifier or non-optional member access, possibly parenthesized
fn is_simple_target(expr: &Expression) -> bool {
    match expr {
        Expression::Identifier(_) => true,
        Expression::MemberExpression { .. } => !in_optional_chain(expr),
        Expression::ParenthesizedExpression { expression, .. } => is_simple_target(expression),
        _ => false,
    }
}

/// True if a member or call chain contains `?.`
fn in_optional_chain(expr: &Expression) -> bool {
    match expr {
        Expression::MemberExpression { object, optional, .. } => *optional || in_optional_chain(object),
        Expression::CallExpression { callee, optional, .. } => *optional || in_optional_chain(callee),
        _ => false,
    }
}

fn pattern_contains_member(pattern: &Pattern) -> bool {
    match pattern {
        Pattern::MemberExpression { .. } => true,
        Pattern::Identifier(_) => false,
        Pattern::ObjectPattern { properties, .. } => properties.iter().any(|property| match property {
            ObjectPatternProperty::Property { value, .. } => pattern_contains_member(value),
            ObjectPatternProperty::RestElement { argument, .. } => pattern_contains_member(argument),
        }),
        Pattern::ArrayPattern { elements, .. } => {
            elements.iter().flatten().any(pattern_contains_member)
        }
        Pattern::AssignmentPattern { left, .. } => pattern_contains_member(left),
        Pattern::RestElement { argument, .. } => pattern_contains_member(argument),
    }
}

/// `const` and destructuring declarators need an initializer
fn needs_initializer(kind: VariableKind, id: &Pattern) -> bool {
    kind == VariableKind::Const || !matches!(id, Pattern::Identifier(_))
}

/// Locations of the parts of `pattern` that remain expressions
fn collect_expression_regions(pattern: &Pattern, out: &mut Vec<SourceLocation>) {
    match pattern {
        Pattern::Identifier(_) => {}
        Pattern::MemberExpression { expression } => out.push(expression.location()),
        Pattern::ObjectPattern { properties, .. } => {
            for property in properties {
                match property {
                    ObjectPatternProperty::Property { key, value, .. } => {
                        if let PropertyKey::Computed { location, .. } = key {
                            out.push(*location);
                        }
                        collect_expression_regions(value, out);
                    }
                    ObjectPatternProperty::RestElement { argument, .. } => {
                        collect_expression_regions(argument, out)
                    }
                }
            }
        }
        Pattern::ArrayPattern { elements, .. } => {
            for element in elements.iter().flatten() {
                collect_expression_regions(element, out);
            }
        }
        Pattern::AssignmentPattern { left, right, .. } => {
            collect_expression_regions(left, out);
            out.push(right.location());
        }
        Pattern::RestElement { argument, .. } => collect_expression_regions(argument, out),
    }
}

/// Tokens that end a member name, making a preceding modifier the name
fn is_member_name_end(token: &Token) -> bool {
    token.kind == SyntaxKind::Eof
        || [
            Punctuator::LParen,
            Punctuator::Assign,
            Punctuator::Semicolon,
            Punctuator::RBrace,
            Punctuator::Comma,
            Punctuator::Colon,
        ]
        .iter()
        .any(|p| token.is_punctuator(*p))
}

fn member(
    object: Expression,
    property: Expression,
    computed: bool,
    optional: bool,
    location: SourceLocation,
) -> Expression {
    Expression::MemberExpression {
        object: Box::new(object),
        property: Box::new(property),
        computed,
        optional,
        location,
    }
}

fn template_element(token: Token, cooked: String, tail: bool) -> TemplateElement {
    TemplateElement {
        raw: template_raw_text(token.kind, &token.raw_value).to_string(),
        cooked,
        tail,
        location: token.location,
    }
}

/// Decimal digits of a BigInt literal given without its `n` suffix
fn bigint_digits(text: &str) -> Option<String> {
    let (digits, radix) = match text.get(..2).map(|p| p.to_ascii_lowercase()).as_deref() {
        Some("0x") => (&text[2..], 16),
        Some("0o") => (&text[2..], 8),
        Some("0b") => (&text[2..], 2),
        _ => (text, 10),
    };
    BigInt::from_str_radix(digits, radix).ok().map(|n| n.to_string())
}
