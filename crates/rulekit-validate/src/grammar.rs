//! Rule-expression grammar.
//!
//! A rule expression is a `|`-separated list of invocations. Each invocation
//! is a rule name, optionally followed by `:` and a `,`-separated parameter
//! list:
//!
//! ```text
//! required|min:2|in:draft,published
//! ```
//!
//! Parameters are coerced on parse: numeric-looking strings become numbers,
//! `true`/`false` become booleans and everything else stays text.

use crate::error::ConfigurationError;
use crate::registry::Registry;
use crate::value::format_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coerced rule parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    /// `true` / `false`
    Bool(bool),
    /// Any finite number
    Number(f64),
    /// Everything else
    Text(String),
}

impl Parameter {
    /// Coerce a raw parameter string.
    pub fn coerce(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "true" => Parameter::Bool(true),
            "false" => Parameter::Bool(false),
            _ => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Parameter::Number(n),
                _ => Parameter::Text(raw.to_string()),
            },
        }
    }

    /// The numeric value, when this parameter is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Parameter::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text value, when this parameter is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Parameter::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Bool(b) => write!(f, "{}", b),
            Parameter::Number(n) => f.write_str(&format_number(*n)),
            Parameter::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Parameter {
    fn from(raw: &str) -> Self {
        Parameter::coerce(raw)
    }
}

impl From<f64> for Parameter {
    fn from(n: f64) -> Self {
        Parameter::Number(n)
    }
}

/// One named check plus its parameters, e.g. `min:7`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInvocation {
    /// Canonical rule name
    pub name: String,
    /// Coerced parameters, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl RuleInvocation {
    /// Create an invocation. The name is canonicalized but not checked
    /// against a registry.
    pub fn new(name: &str, parameters: Vec<Parameter>) -> Self {
        Self {
            name: canonical_name(name),
            parameters,
        }
    }
}

impl fmt::Display for RuleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.parameters.is_empty() {
            let parameters: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
            write!(f, ":{}", parameters.join(","))?;
        }
        Ok(())
    }
}

/// The parsed, ordered rules of one attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(Vec<RuleInvocation>);

impl RuleSet {
    /// Create a rule set from invocations.
    pub fn new(invocations: Vec<RuleInvocation>) -> Self {
        Self(invocations)
    }

    /// Iterate over invocations in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleInvocation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether any rule named in `names` is declared.
    pub fn has_rule(&self, names: &[&str]) -> bool {
        self.find(names).is_some()
    }

    /// The first declared invocation named in `names`.
    pub fn find(&self, names: &[&str]) -> Option<&RuleInvocation> {
        self.0
            .iter()
            .find(|invocation| names.contains(&invocation.name.as_str()))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, invocation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", invocation)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleInvocation;
    type IntoIter = std::slice::Iter<'a, RuleInvocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse a rule expression against a registry.
///
/// Empty tokens (`required||min:2`) are skipped. Any rule name missing from
/// the registry fails the whole parse.
pub fn parse(expression: &str, registry: &Registry) -> Result<RuleSet, ConfigurationError> {
    let mut invocations = Vec::new();

    for token in expression.split('|') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        invocations.push(parse_invocation(token, registry)?);
    }

    Ok(RuleSet(invocations))
}

fn parse_invocation(token: &str, registry: &Registry) -> Result<RuleInvocation, ConfigurationError> {
    let (raw_name, blob) = match token.split_once(':') {
        Some((name, blob)) => (name, Some(blob)),
        None => (token, None),
    };

    let name = canonical_name(raw_name);
    let entry = registry
        .lookup(&name)
        .ok_or_else(|| ConfigurationError::UnknownRule { name: name.clone() })?;

    let parameters = match blob {
        None => Vec::new(),
        Some(blob) if entry.raw_parameters() => {
            if blob.is_empty() {
                Vec::new()
            } else {
                vec![Parameter::Text(blob.to_string())]
            }
        }
        Some(blob) if blob.trim().is_empty() => Vec::new(),
        Some(blob) => blob.split(',').map(Parameter::coerce).collect(),
    };

    Ok(RuleInvocation { name, parameters })
}

/// Normalize a rule name: snake_case plus the `int` / `bool` aliases.
pub fn canonical_name(raw: &str) -> String {
    let name = snake_case(raw.trim());
    match name.as_str() {
        "int" => "integer".to_string(),
        "bool" => "boolean".to_string(),
        _ => name,
    }
}

/// Convert `camelCase`, `StudlyCase`, `kebab-case` or spaced words to snake_case.
pub(crate) fn snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;

    for ch in input.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev = Some('_');
            continue;
        }

        if ch.is_uppercase() {
            if matches!(prev, Some(p) if p.is_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
        prev = Some(ch);
    }

    out
}
