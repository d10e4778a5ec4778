//! Synchronous validation rules.
//!
//! These rules decide on the spot; their checks resolve on the first poll.

use crate::context::RuleContext;
use crate::error::ConfigurationError;
use crate::grammar::Parameter;
use crate::traits::ValidationRule;
use crate::value::{as_number, textual};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

// Pre-compiled regex patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified email regex
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        ).unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        // scheme://[user[:pass]@]host[:port][/path][?query][#fragment]
        Regex::new(
            r"^[a-zA-Z][a-zA-Z0-9+.-]*://(?:[^\s:@/]+(?::[^\s@/]*)?@)?(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*|\[[0-9a-fA-F:.]+\])(?::[0-9]{1,5})?(?:[/?#][^\s]*)?$"
        ).unwrap()
    })
}

/// Text of the parameter at `index`, or empty.
fn param_text(parameters: &[Parameter], index: usize) -> String {
    parameters
        .get(index)
        .map(|p| p.to_string())
        .unwrap_or_default()
}

/// Strings and numbers as text; other values are not textual.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_) | Value::Number(_) => Some(textual(value)),
        _ => None,
    }
}

/// Value is present and non-empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredRule;

impl ValidationRule for RequiredRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => true,
        })
    }
}

/// Marker rule: a null or absent value skips the attribute's other rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableRule;

impl ValidationRule for NullableRule {
    fn passes(
        &self,
        _attribute: &str,
        _value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(true)
    }
}

/// `size(value) >= min`
#[derive(Debug, Clone, Copy, Default)]
pub struct MinRule;

impl ValidationRule for MinRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        let min = ctx.numeric_parameter(parameters, 0)?;
        Ok(ctx.size(value) >= min)
    }

    fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        vec![("min", param_text(parameters, 0))]
    }
}

/// `size(value) <= max`
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxRule;

impl ValidationRule for MaxRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        let max = ctx.numeric_parameter(parameters, 0)?;
        Ok(ctx.size(value) <= max)
    }

    fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        vec![("max", param_text(parameters, 0))]
    }
}

/// `min <= size(value) <= max`
#[derive(Debug, Clone, Copy, Default)]
pub struct BetweenRule;

impl ValidationRule for BetweenRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        ctx.require_parameter_count(2, parameters)?;
        let min = ctx.numeric_parameter(parameters, 0)?;
        let max = ctx.numeric_parameter(parameters, 1)?;
        let size = ctx.size(value);
        Ok(size >= min && size <= max)
    }

    fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        vec![
            ("min", param_text(parameters, 0)),
            ("max", param_text(parameters, 1)),
        ]
    }
}

/// Value reads as a finite number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericRule;

impl ValidationRule for NumericRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(as_number(value).is_some())
    }
}

/// Value is an exact integer, as a number or an integer string.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerRule;

impl ValidationRule for IntegerRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(match value {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().map_or(false, |f| f.fract() == 0.0)
            }
            Value::String(s) => s.trim().parse::<i64>().is_ok(),
            _ => false,
        })
    }
}

/// Value is one of `true`, `false`, `0`, `1`, `"0"`, `"1"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRule;

impl ValidationRule for BooleanRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(match value {
            Value::Bool(_) => true,
            Value::Number(n) => matches!(n.as_f64(), Some(f) if f == 0.0 || f == 1.0),
            Value::String(s) => s == "0" || s == "1",
            _ => false,
        })
    }
}

/// Value matches one of the parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct InRule;

impl ValidationRule for InRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        if !matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
            return Ok(false);
        }

        let candidate = textual(value);
        Ok(parameters.iter().any(|option| match option {
            Parameter::Number(n) => as_number(value) == Some(*n),
            other => candidate == other.to_string(),
        }))
    }

    fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        let values: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
        vec![("values", values.join(", "))]
    }
}

/// Value is an array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayRule;

impl ValidationRule for ArrayRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(value.is_array())
    }
}

/// Value is a URL with a scheme and a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlRule;

impl ValidationRule for UrlRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(value.as_str().map_or(false, |s| url_regex().is_match(s)))
    }
}

/// Value is an email address.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRule;

impl ValidationRule for EmailRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(value.as_str().map_or(false, |s| email_regex().is_match(s)))
    }
}

/// Value matches the pattern given after `regex:`.
///
/// Compiled patterns are cached by pattern text, so a pattern shared by every
/// element of a wildcard attribute compiles once.
#[derive(Debug, Default)]
pub struct RegexRule {
    compiled: RwLock<HashMap<String, Regex>>,
}

impl RegexRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct patterns compiled so far.
    pub fn cached_patterns(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn pattern(&self, source: &str, ctx: &RuleContext<'_>) -> Result<Regex, ConfigurationError> {
        if let Some(pattern) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            return Ok(pattern.clone());
        }

        let pattern = Regex::new(source).map_err(|e| ConfigurationError::InvalidPattern {
            rule: ctx.rule().to_string(),
            reason: e.to_string(),
        })?;
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source.to_string(), pattern.clone());
        Ok(pattern)
    }
}

impl ValidationRule for RegexRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        ctx.require_parameter_count(1, parameters)?;
        let pattern = self.pattern(&parameters[0].to_string(), ctx)?;

        Ok(scalar_text(value).map_or(false, |text| pattern.is_match(&text)))
    }

    fn raw_parameters(&self) -> bool {
        true
    }
}

/// Value is an RFC 3339 timestamp, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRule;

impl ValidationRule for DateRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        let Some(s) = value.as_str() else {
            return Ok(false);
        };
        let s = s.trim();

        Ok(DateTime::parse_from_rfc3339(s).is_ok()
            || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
            || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok())
    }
}

/// Digit string of a value: non-negative integers and strings of ASCII digits.
fn digit_count(value: &Value) -> Option<usize> {
    let text = scalar_text(value)?;
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        Some(text.len())
    } else {
        None
    }
}

/// Value has exactly `n` digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitsRule;

impl ValidationRule for DigitsRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        let digits = ctx.numeric_parameter(parameters, 0)?;
        Ok(digit_count(value).map_or(false, |count| count as f64 == digits))
    }

    fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        vec![("digits", param_text(parameters, 0))]
    }
}

/// Value has between `min` and `max` digits, inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitsBetweenRule;

impl ValidationRule for DigitsBetweenRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        ctx.require_parameter_count(2, parameters)?;
        let min = ctx.numeric_parameter(parameters, 0)?;
        let max = ctx.numeric_parameter(parameters, 1)?;
        Ok(digit_count(value).map_or(false, |count| {
            let count = count as f64;
            count >= min && count <= max
        }))
    }

    fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        vec![
            ("min", param_text(parameters, 0)),
            ("max", param_text(parameters, 1)),
        ]
    }
}

/// Value is one of `true`, `"true"`, `"yes"`, `"on"`, `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptedRule;

impl ValidationRule for AcceptedRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(match value {
            Value::Bool(b) => *b,
            Value::String(s) => matches!(s.as_str(), "true" | "yes" | "on"),
            Value::Number(n) => n.as_f64() == Some(1.0),
            _ => false,
        })
    }
}

/// Value contains only alphabetic characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaRule;

impl ValidationRule for AlphaRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(scalar_text(value).map_or(false, |text| text.chars().all(char::is_alphabetic)))
    }
}

/// Value contains only alphanumeric characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaNumRule;

impl ValidationRule for AlphaNumRule {
    fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError> {
        Ok(scalar_text(value).map_or(false, |text| text.chars().all(char::is_alphanumeric)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationContext;
    use crate::grammar::{RuleInvocation, RuleSet};
    use serde_json::json;

    /// Run `rule` for an attribute declaring `declared`.
    fn check(
        rule: &dyn ValidationRule,
        declared: &[&str],
        value: Value,
        parameters: &[Parameter],
    ) -> Result<bool, ConfigurationError> {
        let rules = RuleSet::new(
            declared
                .iter()
                .map(|name| RuleInvocation::new(name, Vec::new()))
                .collect(),
        );
        let collaborators = ValidationContext::new();
        let name = declared.first().copied().unwrap_or("rule");
        let ctx = RuleContext::new(name, &rules, &collaborators);
        rule.passes("attribute", &value, parameters, &ctx)
    }

    fn params(raw: &[&str]) -> Vec<Parameter> {
        raw.iter().map(|r| Parameter::coerce(r)).collect()
    }

    #[test]
    fn required() {
        assert!(!check(&RequiredRule, &["required"], json!(null), &[]).unwrap());
        assert!(!check(&RequiredRule, &["required"], json!(""), &[]).unwrap());
        assert!(!check(&RequiredRule, &["required"], json!([]), &[]).unwrap());
        assert!(!check(&RequiredRule, &["required"], json!({}), &[]).unwrap());
        assert!(check(&RequiredRule, &["required"], json!("example"), &[]).unwrap());
        assert!(check(&RequiredRule, &["required"], json!(0), &[]).unwrap());
        assert!(check(&RequiredRule, &["required"], json!(false), &[]).unwrap());
    }

    #[test]
    fn min_and_max_by_size_class() {
        let seven = params(&["7"]);
        assert!(!check(&MinRule, &["min"], json!("hello"), &seven).unwrap());
        assert!(check(&MinRule, &["min", "numeric"], json!(7), &seven).unwrap());
        assert!(!check(&MinRule, &["min", "numeric"], json!(6), &seven).unwrap());
        assert!(check(&MaxRule, &["max"], json!("hello"), &seven).unwrap());
        assert!(!check(&MaxRule, &["max"], json!("hello world"), &seven).unwrap());
        assert!(!check(&MaxRule, &["max", "array"], json!([1, 2, 3, 4, 5, 6, 7, 8]), &seven).unwrap());
    }

    #[test]
    fn min_parameter_errors() {
        let err = check(&MinRule, &["min"], json!("x"), &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation rule min requires at least 1 parameters."
        );

        let err = check(&MaxRule, &["max"], json!("x"), &params(&["notNumber"])).unwrap_err();
        assert_eq!(err.to_string(), "Validation rule max requires number parameter.");
    }

    #[test]
    fn between() {
        let range = params(&["2", "4"]);
        assert!(check(&BetweenRule, &["between"], json!("abc"), &range).unwrap());
        assert!(!check(&BetweenRule, &["between"], json!("abcde"), &range).unwrap());
        assert!(check(&BetweenRule, &["between", "integer"], json!(4), &range).unwrap());

        let err = check(&BetweenRule, &["between"], json!("abc"), &params(&["2"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation rule between requires at least 2 parameters."
        );
    }

    #[test]
    fn numeric_and_integer() {
        assert!(check(&NumericRule, &["numeric"], json!(1.5), &[]).unwrap());
        assert!(check(&NumericRule, &["numeric"], json!("-3.25"), &[]).unwrap());
        assert!(!check(&NumericRule, &["numeric"], json!("abc"), &[]).unwrap());
        assert!(!check(&NumericRule, &["numeric"], json!(""), &[]).unwrap());
        assert!(!check(&NumericRule, &["numeric"], json!(true), &[]).unwrap());

        assert!(check(&IntegerRule, &["integer"], json!(42), &[]).unwrap());
        assert!(check(&IntegerRule, &["integer"], json!("-42"), &[]).unwrap());
        assert!(!check(&IntegerRule, &["integer"], json!(4.2), &[]).unwrap());
        assert!(!check(&IntegerRule, &["integer"], json!("4.2"), &[]).unwrap());
        assert!(!check(&IntegerRule, &["integer"], json!("abc"), &[]).unwrap());
        assert!(!check(&IntegerRule, &["integer"], json!([1]), &[]).unwrap());
        assert!(!check(&IntegerRule, &["integer"], json!({"a": 1}), &[]).unwrap());
        assert!(!check(&IntegerRule, &["integer"], json!(true), &[]).unwrap());
        assert!(!check(&IntegerRule, &["integer"], json!(null), &[]).unwrap());
    }

    #[test]
    fn boolean_and_accepted() {
        for ok in [json!(true), json!(false), json!(0), json!(1), json!("0"), json!("1")] {
            assert!(check(&BooleanRule, &["boolean"], ok, &[]).unwrap());
        }
        for bad in [json!("true"), json!(2), json!(null), json!("yes")] {
            assert!(!check(&BooleanRule, &["boolean"], bad, &[]).unwrap());
        }

        for ok in [json!(true), json!("true"), json!("yes"), json!("on"), json!(1)] {
            assert!(check(&AcceptedRule, &["accepted"], ok, &[]).unwrap());
        }
        for bad in [json!(false), json!("no"), json!(0), json!(null)] {
            assert!(!check(&AcceptedRule, &["accepted"], bad, &[]).unwrap());
        }
    }

    #[test]
    fn in_rule() {
        let options = params(&["react", "vue", "angular"]);
        assert!(check(&InRule, &["in"], json!("vue"), &options).unwrap());
        assert!(!check(&InRule, &["in"], json!("riot"), &options).unwrap());

        let numbers = params(&["1", "2"]);
        assert!(check(&InRule, &["in"], json!(2), &numbers).unwrap());
        assert!(check(&InRule, &["in"], json!("1"), &numbers).unwrap());
        assert!(!check(&InRule, &["in"], json!(null), &numbers).unwrap());

        assert_eq!(
            InRule.placeholders(&options),
            vec![("values", "react, vue, angular".to_string())]
        );
    }

    #[test]
    fn url_and_email() {
        for ok in [
            "http://example.com",
            "https://sub.example.com:8080/path?q=1#top",
            "ftp://user:pw@files.example.org/readme.txt",
        ] {
            assert!(check(&UrlRule, &["url"], json!(ok), &[]).unwrap(), "{}", ok);
        }
        for bad in ["example.com", "http://", "not a url", "http://exa mple.com"] {
            assert!(!check(&UrlRule, &["url"], json!(bad), &[]).unwrap(), "{}", bad);
        }

        assert!(check(&EmailRule, &["email"], json!("test@example.com"), &[]).unwrap());
        assert!(!check(&EmailRule, &["email"], json!("not-an-email"), &[]).unwrap());
    }

    #[test]
    fn regex_rule() {
        let rule = RegexRule::new();
        let pattern = vec![Parameter::Text("^[0-9]{3}$".to_string())];
        assert!(check(&rule, &["regex"], json!("123"), &pattern).unwrap());
        assert!(check(&rule, &["regex"], json!(123), &pattern).unwrap());
        assert!(!check(&rule, &["regex"], json!("12a"), &pattern).unwrap());

        let broken = vec![Parameter::Text("([".to_string())];
        let err = check(&rule, &["regex"], json!("x"), &broken).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }

    #[test]
    fn regex_rule_compiles_each_pattern_once() {
        let rule = RegexRule::new();
        let digits = vec![Parameter::Text("^[0-9]+$".to_string())];
        let letters = vec![Parameter::Text("^[a-z]+$".to_string())];

        for value in ["1", "22", "x", "333"] {
            check(&rule, &["regex"], json!(value), &digits).unwrap();
        }
        assert_eq!(rule.cached_patterns(), 1);

        assert!(check(&rule, &["regex"], json!("abc"), &letters).unwrap());
        assert_eq!(rule.cached_patterns(), 2);

        let broken = vec![Parameter::Text("([".to_string())];
        assert!(check(&rule, &["regex"], json!("x"), &broken).is_err());
        assert_eq!(rule.cached_patterns(), 2);
    }

    #[test]
    fn date_rule() {
        for ok in ["2024-02-29", "2024-02-29 13:45:00", "2024-02-29T13:45:00Z"] {
            assert!(check(&DateRule, &["date"], json!(ok), &[]).unwrap(), "{}", ok);
        }
        for bad in ["2023-02-29", "yesterday", ""] {
            assert!(!check(&DateRule, &["date"], json!(bad), &[]).unwrap(), "{}", bad);
        }
    }

    #[test]
    fn digits() {
        let four = params(&["4"]);
        assert!(check(&DigitsRule, &["digits"], json!("0123"), &four).unwrap());
        assert!(check(&DigitsRule, &["digits"], json!(1234), &four).unwrap());
        assert!(!check(&DigitsRule, &["digits"], json!("123"), &four).unwrap());
        assert!(!check(&DigitsRule, &["digits"], json!("12a4"), &four).unwrap());
        assert!(!check(&DigitsRule, &["digits"], json!(-123), &four).unwrap());

        let range = params(&["2", "3"]);
        assert!(check(&DigitsBetweenRule, &["digits_between"], json!("12"), &range).unwrap());
        assert!(check(&DigitsBetweenRule, &["digits_between"], json!(123), &range).unwrap());
        assert!(!check(&DigitsBetweenRule, &["digits_between"], json!("1234"), &range).unwrap());
    }

    #[test]
    fn alpha_and_alpha_num() {
        assert!(check(&AlphaRule, &["alpha"], json!("héllo"), &[]).unwrap());
        assert!(!check(&AlphaRule, &["alpha"], json!("hello1"), &[]).unwrap());
        assert!(!check(&AlphaRule, &["alpha"], json!(12), &[]).unwrap());

        assert!(check(&AlphaNumRule, &["alpha_num"], json!("hello1"), &[]).unwrap());
        assert!(check(&AlphaNumRule, &["alpha_num"], json!(12), &[]).unwrap());
        assert!(!check(&AlphaNumRule, &["alpha_num"], json!("hello 1"), &[]).unwrap());
        assert!(!check(&AlphaNumRule, &["alpha_num"], json!(null), &[]).unwrap());
    }
}
