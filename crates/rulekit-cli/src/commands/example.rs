//! `rulekit example`: bundled demonstration records.

use super::check::report;
use super::Outcome;
use anyhow::Result;
use clap::Args;
use console::style;
use rulekit_validate::Validator;
use serde_json::{json, Value};

#[derive(Args, Debug)]
pub struct ExampleArgs {
    /// Example to run; lists the examples when omitted
    pub name: Option<String>,
}

struct Example {
    name: &'static str,
    about: &'static str,
    data: fn() -> Value,
    rules: &'static [(&'static str, &'static str)],
}

const EXAMPLES: &[Example] = &[
    Example {
        name: "basic",
        about: "A person record with a missing first name and an underage age",
        data: || {
            json!({
                "firstName": "",
                "lastName": "Doe",
                "age": 16,
                "gender": "male"
            })
        },
        rules: &[
            ("firstName", "required|min:2"),
            ("lastName", "required|min:2"),
            ("age", "required|numeric|min:18"),
            ("gender", "in:male,female"),
        ],
    },
    Example {
        name: "wildcard",
        about: "Per-element checks on an array of scores",
        data: || json!({ "scores": [12, null, 7, "n/a"] }),
        rules: &[("scores", "array|min:1"), ("scores.*", "required|integer|min:10")],
    },
];

/// Runs an example. Validation failures are the point of the examples, so
/// they still exit successfully.
pub async fn example(args: ExampleArgs) -> Result<Outcome> {
    let Some(name) = args.name else {
        list();
        return Ok(Outcome::Passed);
    };

    let Some(example) = EXAMPLES.iter().find(|example| example.name == name) else {
        eprintln!(
            "{} unknown example `{}`; available: {}",
            style("error:").red().bold(),
            name,
            names().join(", ")
        );
        return Ok(Outcome::Rejected);
    };

    let data = (example.data)();
    println!("{}", style("Data").bold());
    println!("{}", serde_json::to_string_pretty(&data)?);
    println!("{}", style("Rules").bold());
    for (attribute, rules) in example.rules {
        println!("  {:<12} {}", attribute, rules);
    }
    println!("{}", style("Result").bold());

    let result = Validator::new()
        .validate(&data, example.rules.iter().copied())
        .await;
    match report(result)? {
        Outcome::Rejected => Ok(Outcome::Rejected),
        _ => Ok(Outcome::Passed),
    }
}

fn names() -> Vec<&'static str> {
    EXAMPLES.iter().map(|example| example.name).collect()
}

fn list() {
    for example in EXAMPLES {
        println!("{:<10} {}", style(example.name).bold(), example.about);
    }
}
