use crate::error::{Diagnostic, DiagnosticKind, Span};
use tracing::debug;

/// Error counters plus the sticky failure flag.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    syntax_errors: usize,
    semantic_errors: usize,
    failed: bool,
    recorded: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn syntax_error(&mut self, line: usize, token: &str, span: Span, message: String) -> &Diagnostic {
        self.syntax_errors += 1;
        self.record(DiagnosticKind::Syntax, line, token, span, message)
    }

    pub fn semantic_error(&mut self, line: usize, token: &str, span: Span, message: String) -> &Diagnostic {
        self.semantic_errors += 1;
        self.record(DiagnosticKind::Semantic, line, token, span, message)
    }

    fn record(
        &mut self,
        kind: DiagnosticKind,
        line: usize,
        token: &str,
        span: Span,
        message: String,
    ) -> &Diagnostic {
        if !self.failed {
            debug!(%kind, line, "first error recorded, run is now failed");
        }
        self.failed = true;
        self.recorded
            .push(Diagnostic::new(kind, line, message, token.to_string(), span));
        &self.recorded[self.recorded.len() - 1]
    }

    pub fn syntax_errors(&self) -> usize {
        self.syntax_errors
    }

    pub fn semantic_errors(&self) -> usize {
        self.semantic_errors
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn into_recorded(self) -> Vec<Diagnostic> {
        self.recorded
    }
}
