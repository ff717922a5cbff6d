use crate::config::Config;
use crate::error::Span;
use crate::source::SourceReader;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Keywords
    Int,
    Double,
    Print,

    // Literals
    Identifier,
    IntegerLiteral,
    DecimalLiteral,

    // Operators
    Assign,
    Plus,
    Minus,
    Star,
    Slash,

    // Symbols
    Semicolon,
    LeftParen,
    RightParen,

    // Special
    Eof,
    Unknown,
}

impl TokenType {
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Int => "KEYWORD_INT",
            TokenType::Double => "KEYWORD_DOUBLE",
            TokenType::Print => "KEYWORD_PRINT",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::IntegerLiteral => "INTEGER",
            TokenType::DecimalLiteral => "DECIMAL",
            TokenType::Assign => "OPERATOR_ASSIGN",
            TokenType::Plus => "OPERATOR_PLUS",
            TokenType::Minus => "OPERATOR_MINUS",
            TokenType::Star => "OPERATOR_MULTIPLY",
            TokenType::Slash => "OPERATOR_DIVIDE",
            TokenType::Semicolon => "SYMBOL_SEMICOLON",
            TokenType::LeftParen => "SYMBOL_LPAREN",
            TokenType::RightParen => "SYMBOL_RPAREN",
            TokenType::Eof => "EOF",
            TokenType::Unknown => "UNKNOWN",
        }
    }

    fn keyword(text: &str) -> Option<TokenType> {
        match text {
            "int" => Some(TokenType::Int),
            "double" => Some(TokenType::Double),
            "print" => Some(TokenType::Print),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, line: usize, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            line,
            span,
        }
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {}] {} '{}'", self.line, self.token_type, self.lexeme)
    }
}

/// Malformed input found while producing a token. The token itself is still
/// returned so parsing can carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Identifier too long (max {0} characters)")]
    IdentifierTooLong(usize),

    #[error("Number too long (max {0} characters)")]
    NumberTooLong(usize),

    #[error("Unknown character '{0}' (code: {1})")]
    UnknownCharacter(char, u32),
}

/// Produces one token per call to [`Lexer::fetch`].
pub struct Lexer {
    reader: SourceReader,
    max_lexeme_len: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self::with_config(source, &Config::default())
    }

    pub fn with_config(source: &str, config: &Config) -> Self {
        Self {
            reader: SourceReader::new(source),
            max_lexeme_len: config.max_lexeme_len.max(1),
        }
    }

    /// Current line of the underlying reader.
    pub fn line(&self) -> usize {
        self.reader.line()
    }

    /// Scans the next token. Once the input is exhausted every call returns an
    /// end-of-input token.
    pub fn fetch(&mut self) -> (Token, Option<LexError>) {
        let c = loop {
            match self.reader.next_char() {
                Some(' ' | '\t' | '\r' | '\n') => continue,
                Some(c) => break c,
                None => {
                    let offset = self.reader.offset();
                    let token = Token::new(
                        TokenType::Eof,
                        "EOF".to_string(),
                        self.reader.line(),
                        Span::single(offset),
                    );
                    return (token, None);
                }
            }
        };

        let line = self.reader.line();
        let start = self.reader.offset() - 1;

        let (token_type, lexeme, error) = match c {
            '=' => (TokenType::Assign, c.to_string(), None),
            '+' => (TokenType::Plus, c.to_string(), None),
            '-' => (TokenType::Minus, c.to_string(), None),
            '*' => (TokenType::Star, c.to_string(), None),
            '/' => (TokenType::Slash, c.to_string(), None),
            ';' => (TokenType::Semicolon, c.to_string(), None),
            '(' => (TokenType::LeftParen, c.to_string(), None),
            ')' => (TokenType::RightParen, c.to_string(), None),
            c if c.is_ascii_alphabetic() => self.identifier(c),
            c if c.is_ascii_digit() => self.number(c),
            c => (
                TokenType::Unknown,
                c.to_string(),
                Some(LexError::UnknownCharacter(c, c as u32)),
            ),
        };

        let token = Token::new(token_type, lexeme, line, Span::new(start, self.reader.offset()));
        (token, error)
    }

    fn identifier(&mut self, first: char) -> (TokenType, String, Option<LexError>) {
        let (text, overflowed) = self.take_while(first, |c, _| c.is_ascii_alphanumeric());
        let token_type = TokenType::keyword(&text).unwrap_or(TokenType::Identifier);
        let error = overflowed.then(|| LexError::IdentifierTooLong(self.max_lexeme_len));
        (token_type, text, error)
    }

    fn number(&mut self, first: char) -> (TokenType, String, Option<LexError>) {
        let (text, overflowed) = self.take_while(first, |c, text| {
            c.is_ascii_digit() || (c == '.' && !text.contains('.'))
        });
        let token_type = if text.contains('.') {
            TokenType::DecimalLiteral
        } else {
            TokenType::IntegerLiteral
        };
        let error = overflowed.then(|| LexError::NumberTooLong(self.max_lexeme_len));
        (token_type, text, error)
    }

    // Accumulates characters accepted by `accept` up to the lexeme cap. The
    // first rejected (or overflowing) character is pushed back unread.
    fn take_while(&mut self, first: char, accept: impl Fn(char, &str) -> bool) -> (String, bool) {
        let mut text = String::from(first);

        while let Some(c) = self.reader.next_char() {
            if !accept(c, &text) {
                self.reader.unread(c);
                return (text, false);
            }
            if text.len() >= self.max_lexeme_len {
                self.reader.unread(c);
                return (text, true);
            }
            text.push(c);
        }

        (text, false)
    }
}
