//! Size/type classification for size-based rules (`min`, `max`, `between`).

use crate::grammar::RuleSet;
use crate::value::{as_number, textual};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Rules that make an attribute numeric.
pub const NUMERIC_RULES: &[&str] = &["numeric", "integer"];

/// Rules that make an attribute an array.
pub const ARRAY_RULES: &[&str] = &["array"];

/// How an attribute is measured and which message variant applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Numeric,
    Array,
    String,
}

impl SizeClass {
    /// Classify an attribute from all of its declared rules.
    pub fn classify(rules: &RuleSet) -> Self {
        if rules.has_rule(NUMERIC_RULES) {
            SizeClass::Numeric
        } else if rules.has_rule(ARRAY_RULES) {
            SizeClass::Array
        } else {
            SizeClass::String
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Numeric => "numeric",
            SizeClass::Array => "array",
            SizeClass::String => "string",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measure a value.
///
/// Numeric attributes measure numbers (and numeric strings) by value, arrays
/// measure element count, everything else measures the character length of
/// its textual form.
pub fn size_of(value: &Value, class: SizeClass) -> f64 {
    if class == SizeClass::Numeric {
        if let Some(n) = as_number(value) {
            return n;
        }
    }

    match value {
        Value::Array(items) => items.len() as f64,
        other => textual(other).chars().count() as f64,
    }
}
