//! `rulekit` command-line tool.

mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use cli::Cli;
use config::CliConfig;
use console::style;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            return ExitCode::from(2);
        }
    };
    cli.apply_overrides(&mut config);

    if let Err(err) = logging::init(&config) {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        return ExitCode::from(2);
    }

    match cli.execute(&config).await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::from(2)
        }
    }
}
