// maxhour CLI - crew flight-hour compliance analysis

mod analyze;
mod exit_codes;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use analyze::AnalyzeArgs;
use exit_codes::{EXIT_CONFIG, EXIT_EXPORT, EXIT_INPUT, EXIT_SCHEMA, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "maxhour")]
#[command(about = "Crew flight-hour compliance analyzer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a monthly and a consecutive-year flight-hour report
    #[command(after_help = "\
Examples:
  maxhour analyze monthly.xlsx consecutive.xlsx
  maxhour analyze monthly.xlsx consecutive.xlsx -o report.xlsx
  maxhour analyze monthly.csv consecutive.csv --json
  maxhour analyze monthly.xlsx consecutive.xlsx --config limits.toml --limit 50")]
    Analyze(AnalyzeArgs),

    /// Validate a thresholds config file without running an analysis
    #[command(after_help = "\
Examples:
  maxhour validate limits.toml")]
    Validate {
        /// Path to the TOML config file
        config: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: maxhour <command> [options]");
            eprintln!("       maxhour --help for more information");
            Err(CliError {
                code: EXIT_USAGE,
                message: String::new(),
                hint: None,
            })
        }
        Some(Commands::Analyze(args)) => analyze::cmd_analyze(args),
        Some(Commands::Validate { config }) => analyze::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT, message: msg.into(), hint: None }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SCHEMA, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
