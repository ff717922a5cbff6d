use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::{ParseOutcome, Parser};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Reads `path` and runs it, writing the transcript to stdout.
pub fn run_file(path: &Path, config: &Config) -> Result<ParseOutcome> {
    let source = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    run(&source, path.to_str(), config)
}

/// Runs `source`, writing the transcript to stdout and, when enabled, rich
/// diagnostics to stderr.
pub fn run(source: &str, filename: Option<&str>, config: &Config) -> Result<ParseOutcome> {
    let stdout = io::stdout();
    let outcome = run_with_output(source, config, stdout.lock())?;

    if config.render_reports {
        for diagnostic in &outcome.diagnostics {
            diagnostic.report(source, filename)?;
        }
    }

    Ok(outcome)
}

/// Process exit status for a finished run: 0 when the program was clean, 1
/// when any diagnostic was recorded, 2 when the run could not complete.
pub fn exit_status(result: &Result<ParseOutcome>) -> u8 {
    match result {
        Ok(outcome) if outcome.is_success() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

/// Runs `source` with the whole transcript, summary included, going to `out`.
pub fn run_with_output<W: Write>(source: &str, config: &Config, mut out: W) -> Result<ParseOutcome> {
    let outcome = Parser::new(source, config, &mut out).parse_program()?;
    outcome.write_summary(&mut out)?;
    out.flush()?;

    info!(
        syntax_errors = outcome.syntax_errors,
        semantic_errors = outcome.semantic_errors,
        statements = outcome.expressions,
        "run finished"
    );
    Ok(outcome)
}
