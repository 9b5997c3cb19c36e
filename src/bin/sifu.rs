//! Command-line interface for sifu
//! This binary tokenizes or parses a sifu file and prints the result in one of
//! the processing formats.
//!
//! Usage:
//!   sifu `<path>` [--format `<format>`] [--config `<file>`]  - Process a file (`-` reads stdin)
//!   sifu --list-formats                                   - List all available formats
//!
//! Configuration is layered: built-in defaults, then `./sifu.toml` if present,
//! then `--config`, then command-line flags. Logging goes to stderr and is
//! controlled by `SIFU_LOG` (default `warn`) or `--verbose`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sifu::sifu::config::{Loader, SifuConfig};
use sifu::sifu::processor::{available_formats, process_str, ProcessingSpec};

fn main() {
    let matches = Command::new("sifu")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting sifu source files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the sifu file, or `-` for stdin")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'ast-treeviz', 'ast-sexpr', 'token-simple')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("no-newline-semicolon")
                .long("no-newline-semicolon")
                .help("Treat top-level newlines as whitespace")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("flat-groups")
                .long("flat-groups")
                .help("Treat newlines inside groups as whitespace")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser activity to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // clap enforces the path unless --list-formats was given
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    handle_process_command(path, &config);
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SIFU_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<SifuConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file("sifu.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("no-newline-semicolon") {
        loader = loader.set_override("parser.newline_is_semicolon", false)?;
    }
    if matches.get_flag("flat-groups") {
        loader = loader.set_override("parser.nested_allows_repetition", false)?;
    }
    let config = loader.build()?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Handle processing a file
fn handle_process_command(path: &str, config: &SifuConfig) {
    let spec = ProcessingSpec::from_string(&config.output.format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Run `sifu --list-formats` to see the available formats");
        std::process::exit(1);
    });

    let source = read_source(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });

    let output = process_str(&source, &spec, &config.parser).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    });

    print!("{}", output);
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }
}

fn read_source(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
