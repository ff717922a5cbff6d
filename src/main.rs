use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use onepass::{runner, Config};
use std::path::Path;
use std::process::ExitCode;
use tracing::Level;

fn main() -> ExitCode {
    let matches = Command::new("onepass")
        .about("Single-pass parser and evaluator for int/double scripts")
        .arg(
            Arg::new("file")
                .help("The script file to check and run")
                .value_name("FILE")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("no-trace")
                .long("no-trace")
                .help("Do not echo every token as it is read")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-report")
                .long("no-report")
                .help("Do not render errors with source snippets on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-lexeme-len")
                .long("max-lexeme-len")
                .help("Longest identifier or number before truncation")
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("max-symbols")
                .long("max-symbols")
                .help("Maximum number of variables a script may declare")
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let Some(file_path) = matches.get_one::<String>("file") else {
        eprintln!("Usage: onepass FILE");
        return ExitCode::from(2);
    };

    let result = runner::run_file(Path::new(file_path), &config_from(&matches));
    if let Err(error) = &result {
        eprintln!("{}", error);
    }
    ExitCode::from(runner::exit_status(&result))
}

fn config_from(matches: &ArgMatches) -> Config {
    let defaults = Config::default();
    Config {
        max_lexeme_len: matches
            .get_one::<usize>("max-lexeme-len")
            .copied()
            .unwrap_or(defaults.max_lexeme_len),
        trace_tokens: !matches.get_flag("no-trace"),
        render_reports: !matches.get_flag("no-report"),
        max_symbols: matches.get_one::<usize>("max-symbols").copied(),
        ..defaults
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so they never mix with the transcript.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
