use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Syntax,
    Semantic,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagnosticKind::Syntax => write!(f, "SYNTAX ERROR"),
            DiagnosticKind::Semantic => write!(f, "SEMANTIC ERROR"),
        }
    }
}

/// A recorded syntax or semantic error, stamped with the line and the text of
/// the token that was current when it was raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    pub message: String,
    pub token: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: usize, message: String, token: String, span: Span) -> Self {
        Self {
            kind,
            line,
            message,
            token,
            span,
        }
    }

    /// Renders the diagnostic against the source text on stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) -> io::Result<()> {
        let filename = filename.unwrap_or("<input>");

        let color = match self.kind {
            DiagnosticKind::Syntax => Color::Yellow,
            DiagnosticKind::Semantic => Color::Magenta,
        };

        let kind_str = match self.kind {
            DiagnosticKind::Syntax => "Syntax Error",
            DiagnosticKind::Semantic => "Semantic Error",
        };

        // Spans are character offsets; the end-of-input token sits one past
        // the last character.
        let end = source.chars().count();
        let start = self.span.start.min(end);
        let stop = self.span.end.clamp(start, end);

        Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", kind_str.fg(color), self.message))
            .with_label(
                Label::new((filename, start..stop))
                    .with_message(format!("current token '{}'", self.token))
                    .with_color(color),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}] Line {}: {}\n  Current token: '{}'",
            self.kind, self.line, self.message, self.token
        )
    }
}

/// Failures that abort a run before or while producing the transcript.
/// Syntax and semantic problems in the program are never reported this way;
/// they are recorded as [`Diagnostic`]s.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error reading file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
