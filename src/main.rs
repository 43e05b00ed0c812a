//! Census - context inventory for Claude Code sessions
//!
//! CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use census::cli::{ReportCommand, ReportOptions};
use census::config::Config;
use census::error::exit_codes;

// =============================================================================
// CLI Definition
// =============================================================================

/// List the memory files, skills, hooks, MCP servers, agents and commands
/// that shape a Claude Code session
#[derive(Parser, Debug)]
#[command(name = "census")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project directory to inspect (defaults to the current directory)
    project_dir: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    output: Option<PathBuf>,

    /// Render the inventory as JSON
    #[arg(long, short)]
    json: bool,

    /// Suppress status messages
    #[arg(long, short)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("census error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`.
fn init_tracing(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Run the CLI and return the exit code.
fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let project_dir = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let config = Config::load();
    let command = ReportCommand::new(project_dir, config);
    let options = ReportOptions {
        json: cli.json,
        quiet: cli.quiet,
        output: cli.output,
    };

    let output = command.run(&options);
    if let Some(error) = &output.error {
        eprintln!("census error: {}", error);
    }

    let formatted = command.format_output(&output, &options);
    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 1);
    }

    #[test]
    fn test_success_to_exit_code() {
        assert_eq!(
            success_to_exit_code(true),
            ExitCode::from(exit_codes::SUCCESS as u8)
        );
        assert_eq!(
            success_to_exit_code(false),
            ExitCode::from(exit_codes::ERROR as u8)
        );
    }

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["census"]);
        assert!(cli.project_dir.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_positionals() {
        let cli = Cli::parse_from(["census", "/work/app", "report.md"]);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/work/app")));
        assert_eq!(cli.output, Some(PathBuf::from("report.md")));
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from(["census", "--json", "-q", "-vv", "."]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project_dir, Some(PathBuf::from(".")));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(7), "trace");
    }
}
