//! `rulekit check`: validate a JSON record from files.

use super::Outcome;
use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use rulekit_validate::{CustomMessages, MemoryLookup, ValidateError, Validator};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding the record to validate
    #[arg(short, long)]
    pub data: PathBuf,

    /// JSON file mapping attribute keys to rule strings
    #[arg(short, long)]
    pub rules: PathBuf,

    /// JSON file with custom messages (defaults to RULEKIT_MESSAGES)
    #[arg(short, long)]
    pub messages: Option<PathBuf>,

    /// JSON fixture `{resource: {field: [values]}}` backing the `exists` rule
    /// (defaults to RULEKIT_RECORDS)
    #[arg(long)]
    pub records: Option<PathBuf>,
}

pub async fn check(args: CheckArgs, config: &CliConfig) -> Result<Outcome> {
    let data: Value = read_json(&args.data).await?;
    let rules: BTreeMap<String, String> = read_json(&args.rules)
        .await
        .context("rules must be a JSON object of rule strings")?;

    let messages = match args.messages.as_ref().or(config.messages.as_ref()) {
        Some(path) => read_json::<CustomMessages>(path).await?,
        None => CustomMessages::new(),
    };

    let mut builder = Validator::builder();
    if let Some(path) = args.records.as_ref().or(config.records.as_ref()) {
        let fixture: Value = read_json(path).await?;
        let lookup = MemoryLookup::from_json(&fixture)
            .with_context(|| format!("invalid record fixture {}", path.display()))?;
        tracing::debug!(records = lookup.len(), path = %path.display(), "Loaded record fixture");
        builder = builder.lookup(lookup);
    }
    let validator = builder.build();

    let result = validator.validate_with(&data, &rules, &messages).await;
    report(result)
}

/// Print a validation result and map it to an outcome.
pub(crate) fn report(result: Result<(), ValidateError>) -> Result<Outcome> {
    match result {
        Ok(()) => {
            println!("{}", style("passed").green());
            Ok(Outcome::Passed)
        }
        Err(ValidateError::Failed(errors)) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            Ok(Outcome::Failed)
        }
        Err(err) => {
            eprintln!("{} {}", style("rejected:").red().bold(), err);
            Ok(Outcome::Rejected)
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}
