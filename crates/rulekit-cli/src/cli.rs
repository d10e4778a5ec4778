//! CLI argument parsing

use crate::commands::{self, CheckArgs, ExampleArgs, Outcome, ParseArgs};
use crate::config::{CliConfig, LogFormat};
use clap::{Parser, Subcommand};

/// rulekit - validate JSON records against declarative rule strings
#[derive(Parser, Debug)]
#[command(name = "rulekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter, overrides RULEKIT_LOG (e.g. `rulekit_validate=debug`)
    #[arg(long, global = true)]
    log: Option<String>,

    /// Log output format, overrides RULEKIT_LOG_FORMAT
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON record against a JSON object of rule strings
    Check(CheckArgs),

    /// Parse a rule expression and print its canonical form
    Parse(ParseArgs),

    /// List the registered rules and their default messages
    Rules,

    /// Run a bundled example
    Example(ExampleArgs),
}

impl Cli {
    /// Apply command-line overrides to the environment configuration.
    pub fn apply_overrides(&self, config: &mut CliConfig) {
        if let Some(log) = &self.log {
            config.log = log.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }

    /// Execute the CLI command
    pub async fn execute(self, config: &CliConfig) -> anyhow::Result<Outcome> {
        match self.command {
            Commands::Check(args) => commands::check(args, config).await,
            Commands::Parse(args) => commands::parse(args),
            Commands::Rules => commands::list_rules(),
            Commands::Example(args) => commands::example(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_overrides() {
        let cli = Cli::parse_from(["rulekit", "--log", "debug", "--log-format", "json", "rules"]);
        let mut config = CliConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.log, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
