//! `rulekit parse` and `rulekit rules`: inspect the rule grammar.

use super::Outcome;
use anyhow::Result;
use clap::Args;
use console::style;
use rulekit_validate::{default_message, Registry, SizeClass};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Rule expression, e.g. `required|min:2|in:draft,published`
    pub expression: String,
}

pub fn parse(args: ParseArgs) -> Result<Outcome> {
    let registry = Registry::new();

    match registry.parse(&args.expression) {
        Ok(rules) => {
            println!("{}", rules);
            println!("{}", serde_json::to_string_pretty(&rules)?);
            Ok(Outcome::Passed)
        }
        Err(err) => {
            eprintln!("{} {}", style("rejected:").red().bold(), err);
            Ok(Outcome::Rejected)
        }
    }
}

pub fn list_rules() -> Result<Outcome> {
    let registry = Registry::new();

    for name in registry.names() {
        let kind = match registry.lookup(name) {
            Some(entry) if entry.is_async() => "async",
            _ => "sync",
        };
        let message = default_message(name, SizeClass::String).unwrap_or("-");
        println!(
            "{:<16} {:<6} {}",
            style(name).bold(),
            style(kind).dim(),
            message
        );
    }

    Ok(Outcome::Passed)
}
