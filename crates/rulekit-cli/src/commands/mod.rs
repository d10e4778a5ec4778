//! CLI commands

mod check;
mod example;
mod parse;

pub use check::{check, CheckArgs};
pub use example::{example, ExampleArgs};
pub use parse::{list_rules, parse, ParseArgs};

use std::process::ExitCode;

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything validated (or the command had nothing to validate).
    Passed,
    /// The record failed validation.
    Failed,
    /// The rules were broken or a collaborator failed.
    Rejected,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
            Outcome::Rejected => ExitCode::from(2),
        }
    }
}
