// onepass language front end
//
// Lexing, recursive-descent parsing, semantic checks and evaluation of a
// tiny `int`/`double` scripting language, all in a single pass.

// Public modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod runner;
pub mod source;
pub mod symbol;
pub mod value;

// Re-export commonly used items
pub use config::Config;
pub use diagnostics::Diagnostics;
pub use error::{Diagnostic, DiagnosticKind, Error, Span};
pub use evaluator::{Arithmetic, BinaryOp, Evaluate};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseOutcome, Parser};
pub use symbol::{Symbol, SymbolError, SymbolTable};
pub use value::{Value, ValueType};

// Re-export main functions
pub use runner::{exit_status, run, run_file, run_with_output};
