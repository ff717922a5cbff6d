use crate::symbol::SymbolTable;

/// Knobs for a single run. `Config::default()` matches the language's
/// documented limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Longest identifier or number the lexer accepts before truncating.
    pub max_lexeme_len: usize,
    /// Echo every fetched token into the transcript.
    pub trace_tokens: bool,
    /// Render recorded diagnostics with source snippets on stderr.
    pub render_reports: bool,
    pub initial_symbol_capacity: usize,
    pub max_symbols: Option<usize>,
}

impl Config {
    pub const DEFAULT_MAX_LEXEME_LEN: usize = 49;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_lexeme_len: Self::DEFAULT_MAX_LEXEME_LEN,
            trace_tokens: true,
            render_reports: true,
            initial_symbol_capacity: SymbolTable::DEFAULT_CAPACITY,
            max_symbols: None,
        }
    }
}
