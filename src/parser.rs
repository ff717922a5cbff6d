use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::{Diagnostic, Result, Span};
use crate::evaluator::{Arithmetic, BinaryOp, Evaluate};
use crate::lexer::{Lexer, Token, TokenType};
use crate::symbol::{SymbolError, SymbolTable};
use crate::value::{Value, ValueType};
use std::io::Write;
use tracing::{debug, trace};

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub syntax_errors: usize,
    pub semantic_errors: usize,
    pub expressions: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: SymbolTable,
    /// Values written by `print` statements, already formatted.
    pub printed: Vec<String>,
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        self.syntax_errors == 0 && self.semantic_errors == 0
    }

    pub fn value_of(&self, name: &str) -> Option<Value> {
        self.symbols.get(name).map(|symbol| symbol.value)
    }

    pub fn write_summary<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "\n=== Parse Complete ===")?;
        writeln!(out, "Syntax Errors: {}", self.syntax_errors)?;
        writeln!(out, "Semantic Errors: {}", self.semantic_errors)?;
        writeln!(out, "Expressions Parsed: {}", self.expressions)?;

        if !self.is_success() {
            return writeln!(out, "Status: FAILED");
        }

        writeln!(out, "Status: SUCCESS")?;
        writeln!(out, "\n=== Symbol Table ===")?;
        if self.symbols.is_empty() {
            writeln!(out, "(empty)")?;
        }
        for symbol in self.symbols.iter() {
            writeln!(out, "  {} ({}) = {}", symbol.name, symbol.value_type, symbol.value)?;
        }
        writeln!(out, "====================")
    }
}

/// Recursive-descent parser that evaluates as it goes. One method per
/// production; the transcript (token trace, narration, errors, print results)
/// is written to `out`.
pub struct Parser<W, E = Arithmetic> {
    lexer: Lexer,
    current: Token,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
    evaluator: E,
    out: W,
    trace_tokens: bool,
    statements: usize,
    printed: Vec<String>,
}

impl<W: Write> Parser<W> {
    pub fn new(source: &str, config: &Config, out: W) -> Self {
        Self::with_evaluator(source, config, out, Arithmetic)
    }
}

impl<W: Write, E: Evaluate> Parser<W, E> {
    pub fn with_evaluator(source: &str, config: &Config, out: W, evaluator: E) -> Self {
        Self {
            lexer: Lexer::with_config(source, config),
            current: Token::new(TokenType::Eof, String::new(), 1, Span::single(0)),
            symbols: SymbolTable::with_capacity(config.initial_symbol_capacity, config.max_symbols),
            diagnostics: Diagnostics::new(),
            evaluator,
            out,
            trace_tokens: config.trace_tokens,
            statements: 0,
            printed: Vec::new(),
        }
    }

    // program -> statement* EOF
    pub fn parse_program(mut self) -> Result<ParseOutcome> {
        writeln!(self.out, "=== Starting Parse ===")?;
        self.fetch()?;

        while !self.check(TokenType::Eof) && !self.diagnostics.has_failed() {
            self.statements += 1;
            writeln!(self.out, "\n--- Statement #{} ---", self.statements)?;
            // The statement's first token was fetched silently so its trace
            // lands under the header.
            self.emit_trace()?;
            self.statement()?;
        }

        if self.diagnostics.has_failed() {
            debug!(statements = self.statements, "stopped after first failing statement");
        } else {
            self.emit_trace()?;
        }

        Ok(ParseOutcome {
            syntax_errors: self.diagnostics.syntax_errors(),
            semantic_errors: self.diagnostics.semantic_errors(),
            expressions: self.statements,
            diagnostics: self.diagnostics.into_recorded(),
            symbols: self.symbols,
            printed: self.printed,
        })
    }

    // statement -> declaration | assignment | printStmt
    fn statement(&mut self) -> Result<()> {
        match self.current.token_type {
            TokenType::Int | TokenType::Double => self.declaration(),
            TokenType::Print => self.print_statement(),
            TokenType::Identifier => self.assignment(),
            TokenType::Unknown => {
                self.syntax_error("Unexpected character in statement")?;
                self.advance()
            }
            _ => {
                self.syntax_error("Expected statement (declaration, assignment, or print)")?;
                self.advance()
            }
        }
    }

    // declaration -> ('int' | 'double') IDENTIFIER '=' expression ';'
    fn declaration(&mut self) -> Result<()> {
        writeln!(self.out, "Parsing declaration...")?;

        let value_type = match self.current.token_type {
            TokenType::Int => ValueType::Int,
            TokenType::Double => ValueType::Double,
            _ => return self.syntax_error("Expected 'int' or 'double' keyword"),
        };
        self.advance()?;

        if !self.check(TokenType::Identifier) {
            self.syntax_error(format!("Expected identifier after '{}'", value_type))?;
            return self.skip_past(TokenType::Semicolon);
        }

        let name = self.current.lexeme.clone();
        self.advance()?;

        // Registered before the initializer runs, so `int x = x;` reads 0.
        let registered = self.declare(&name, value_type)?;

        if !self.check(TokenType::Assign) {
            return self.syntax_error("Expected '=' operator after identifier");
        }
        self.advance()?;

        let value = self.expression()?;

        if !self.check(TokenType::Semicolon) {
            return self.syntax_error("Expected ';' at end of declaration");
        }
        if registered {
            self.store(&name, value)?;
        }
        self.finish_statement()
    }

    // assignment -> IDENTIFIER '=' expression ';'
    fn assignment(&mut self) -> Result<()> {
        writeln!(self.out, "Parsing assignment...")?;

        let name = self.current.lexeme.clone();
        if !self.symbols.is_declared(&name) {
            // Keep parsing; the store below reports its own error.
            self.semantic_error(SymbolError::UsedBeforeDeclaration(name.clone()).to_string())?;
        }
        self.advance()?;

        if !self.check(TokenType::Assign) {
            return self.syntax_error("Expected '=' operator");
        }
        self.advance()?;

        let value = self.expression()?;

        if !self.check(TokenType::Semicolon) {
            return self.syntax_error("Expected ';' at end of assignment");
        }
        self.store(&name, value)?;
        self.finish_statement()
    }

    // printStmt -> 'print' '(' IDENTIFIER ')' ';'
    fn print_statement(&mut self) -> Result<()> {
        writeln!(self.out, "Parsing print statement...")?;
        self.advance()?;

        if !self.check(TokenType::LeftParen) {
            return self.syntax_error("Expected '(' after print");
        }
        self.advance()?;

        if !self.check(TokenType::Identifier) {
            self.syntax_error("Expected identifier inside print()")?;
            return self.skip_past(TokenType::RightParen);
        }

        let name = self.current.lexeme.clone();
        let number = self.variable_value(&name)?;
        // Undeclared names print as the integer zero.
        let value = self
            .symbols
            .get(&name)
            .map_or(ValueType::Int, |symbol| symbol.value_type)
            .coerce(number);
        self.advance()?;

        if !self.check(TokenType::RightParen) {
            return self.syntax_error("Expected ')' after identifier");
        }
        self.advance()?;

        if !self.check(TokenType::Semicolon) {
            return self.syntax_error("Expected ';' at end of print statement");
        }
        writeln!(self.out, "Result: {}", value)?;
        self.printed.push(value.to_string());
        self.finish_statement()
    }

    // expression -> term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64> {
        let mut value = Some(self.term()?);

        while let Some(op) = BinaryOp::additive(self.current.token_type) {
            self.advance()?;
            let rhs = self.term()?;
            value = match value {
                Some(lhs) => self.apply(op, lhs, rhs)?,
                None => None,
            };
        }

        Ok(value.unwrap_or(0.0))
    }

    // term -> factor (('*' | '/') factor)*
    //
    // After a failed operation the remaining factors are still consumed but
    // neither looked up nor folded, and the term is worth 0.
    fn term(&mut self) -> Result<f64> {
        let mut value = Some(self.factor(true)?);

        while let Some(op) = BinaryOp::multiplicative(self.current.token_type) {
            self.advance()?;
            let rhs = self.factor(value.is_some())?;
            value = match value {
                Some(lhs) => self.apply(op, lhs, rhs)?,
                None => None,
            };
        }

        Ok(value.unwrap_or(0.0))
    }

    // factor -> IDENTIFIER | INTEGER | DECIMAL
    //
    // With `resolve` unset an identifier is only consumed.
    fn factor(&mut self, resolve: bool) -> Result<f64> {
        let value = match self.current.token_type {
            TokenType::Identifier if resolve => {
                let name = self.current.lexeme.clone();
                self.variable_value(&name)?
            }
            TokenType::Identifier => 0.0,
            TokenType::IntegerLiteral | TokenType::DecimalLiteral => {
                self.evaluator.literal(&self.current.lexeme)
            }
            _ => {
                self.syntax_error("Expected identifier or number in expression")?;
                0.0
            }
        };
        self.advance()?;
        Ok(value)
    }

    fn apply(&mut self, op: BinaryOp, lhs: f64, rhs: f64) -> Result<Option<f64>> {
        match self.evaluator.binary(op, lhs, rhs) {
            Ok(value) => {
                trace!(%op, lhs, rhs, value, "folded");
                Ok(Some(value))
            }
            Err(err) => {
                self.semantic_error(err.to_string())?;
                Ok(None)
            }
        }
    }

    // Symbol table access, turning failures into semantic errors.

    fn declare(&mut self, name: &str, value_type: ValueType) -> Result<bool> {
        match self.symbols.declare(name, value_type) {
            Ok(_) => Ok(true),
            Err(err) => {
                self.semantic_error(err.to_string())?;
                Ok(false)
            }
        }
    }

    fn variable_value(&mut self, name: &str) -> Result<f64> {
        match self.symbols.get_value(name) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.semantic_error(err.to_string())?;
                Ok(0.0)
            }
        }
    }

    fn store(&mut self, name: &str, value: f64) -> Result<()> {
        if let Err(err) = self.symbols.set_value(name, value) {
            self.semantic_error(err.to_string())?;
        }
        Ok(())
    }

    // Token handling.

    fn check(&self, token_type: TokenType) -> bool {
        self.current.is(token_type)
    }

    /// Replaces the current token without tracing it.
    fn fetch(&mut self) -> Result<()> {
        let (token, error) = self.lexer.fetch();
        self.current = token;
        if let Some(error) = error {
            self.syntax_error(error.to_string())?;
        }
        Ok(())
    }

    fn emit_trace(&mut self) -> Result<()> {
        if self.trace_tokens {
            writeln!(self.out, "  {}", self.current)?;
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        self.fetch()?;
        self.emit_trace()
    }

    // Steps over the terminating ';'. The next statement's first token is
    // traced by the program loop.
    fn finish_statement(&mut self) -> Result<()> {
        self.fetch()
    }

    fn skip_past(&mut self, terminator: TokenType) -> Result<()> {
        debug!(%terminator, line = self.lexer.line(), "recovering");
        while !self.check(terminator) && !self.check(TokenType::Eof) {
            self.advance()?;
        }
        if self.check(terminator) {
            self.advance()?;
        }
        Ok(())
    }

    // Diagnostics.

    fn syntax_error(&mut self, message: impl Into<String>) -> Result<()> {
        let diagnostic = self.diagnostics.syntax_error(
            self.lexer.line(),
            &self.current.lexeme,
            self.current.span.clone(),
            message.into(),
        );
        writeln!(self.out, "\n{}", diagnostic)?;
        Ok(())
    }

    fn semantic_error(&mut self, message: impl Into<String>) -> Result<()> {
        let diagnostic = self.diagnostics.semantic_error(
            self.lexer.line(),
            &self.current.lexeme,
            self.current.span.clone(),
            message.into(),
        );
        writeln!(self.out, "\n{}", diagnostic)?;
        Ok(())
    }
}
