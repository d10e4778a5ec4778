//! Message templates and their resolution.
//!
//! A failed rule is turned into text in two steps: pick a template, then
//! substitute placeholders. Templates come from, most specific first:
//!
//! 1. the per-call [`CustomMessages`] overlay (`attr` → `{rule: ..}`,
//!    `attr.rule`, `attr`, `rule`, then `attr.*` for wildcard members);
//! 2. the validator's global messages in the [`MessageCatalog`];
//! 3. built-in defaults, with numeric/string/array variants for size rules.
//!
//! `:attribute` is replaced by the attribute's display name; rule-specific
//! placeholders (`:min`, `:values`, ...) come from the rule itself.

use crate::grammar::{canonical_name, snake_case};
use crate::size::SizeClass;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Used when no template exists for a rule.
pub const FALLBACK_MESSAGE: &str = "The :attribute is invalid.";

/// Built-in template for `rule` under `class`.
pub fn default_message(rule: &str, class: SizeClass) -> Option<&'static str> {
    let message = match (rule, class) {
        ("required", _) => "The :attribute field is required.",
        ("min", SizeClass::Numeric) => "The :attribute must be at least :min.",
        ("min", SizeClass::String) => "The :attribute must be at least :min characters.",
        ("min", SizeClass::Array) => "The :attribute must have at least :min items.",
        ("max", SizeClass::Numeric) => "The :attribute may not be greater than :max.",
        ("max", SizeClass::String) => "The :attribute may not be greater than :max characters.",
        ("max", SizeClass::Array) => "The :attribute may not have more than :max items.",
        ("between", SizeClass::Numeric) => "The :attribute must be between :min and :max.",
        ("between", SizeClass::String) => {
            "The :attribute must be between :min and :max characters."
        }
        ("between", SizeClass::Array) => "The :attribute must have between :min and :max items.",
        ("exists", _) | ("in", _) => "The selected :attribute is invalid.",
        ("boolean", _) => "The :attribute field must be true or false.",
        ("url", _) | ("regex", _) => "The :attribute format is invalid.",
        ("digits", _) => "The :attribute must be :digits digits.",
        ("digits_between", _) => "The :attribute must be between :min and :max digits.",
        ("integer", _) => "The :attribute must be an integer.",
        ("numeric", _) => "The :attribute must be numeric.",
        ("accepted", _) => "The :attribute must be accepted.",
        ("alpha", _) => "The :attribute may only contain letters.",
        ("alpha_num", _) => "The :attribute may only contain letters and numbers.",
        ("date", _) => "The :attribute is not a valid date.",
        ("email", _) => "The :attribute must be a valid email address.",
        ("array", _) => "The :attribute must be an array.",
        _ => return None,
    };
    Some(message)
}

/// Validator-wide message templates.
///
/// Holds global overrides keyed by canonical rule name. Built-in defaults are
/// consulted after them. Immutable once the validator is built.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    global: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global template for a rule.
    pub fn with_message(mut self, rule: &str, template: impl Into<String>) -> Self {
        self.global
            .insert(canonical_name(rule), template.into());
        self
    }

    /// The global template for a rule, if one was set.
    pub fn global(&self, rule: &str) -> Option<&str> {
        self.global.get(rule).map(String::as_str)
    }

    /// The template used when no per-call message applies.
    pub fn template(&self, rule: &str, class: SizeClass) -> &str {
        self.global(rule)
            .or_else(|| default_message(rule, class))
            .unwrap_or(FALLBACK_MESSAGE)
    }
}

/// A per-call message entry: one template, or templates keyed by rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageEntry {
    Message(String),
    ByRule(HashMap<String, String>),
}

impl MessageEntry {
    /// The entry with rule-map keys in canonical form.
    fn canonical(self) -> Self {
        match self {
            MessageEntry::ByRule(rules) => MessageEntry::ByRule(
                rules
                    .into_iter()
                    .map(|(rule, template)| (canonical_name(&rule), template))
                    .collect(),
            ),
            message => message,
        }
    }
}

impl From<&str> for MessageEntry {
    fn from(message: &str) -> Self {
        MessageEntry::Message(message.to_string())
    }
}

impl From<String> for MessageEntry {
    fn from(message: String) -> Self {
        MessageEntry::Message(message)
    }
}

/// Per-call custom messages.
///
/// Keys are attribute names, `attribute.rule`, `attribute.*` or bare rule
/// names. Rule names may be written in any form the rule grammar accepts
/// (`digitsBetween`, `digits_between`). Deserializes from JSON such as:
///
/// ```json
/// {
///   "age.*": { "min": "Every age must be at least :min" },
///   "email.required": "We need your email.",
///   "required": "Please fill in :attribute."
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CustomMessages(HashMap<String, MessageEntry>);

impl<'de> Deserialize<'de> for CustomMessages {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = HashMap::<String, MessageEntry>::deserialize(deserializer)?;
        Ok(Self(
            entries
                .into_iter()
                .map(|(key, entry)| (key, entry.canonical()))
                .collect(),
        ))
    }
}

impl CustomMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry under `key`.
    pub fn with(mut self, key: impl Into<String>, entry: impl Into<MessageEntry>) -> Self {
        let entry: MessageEntry = entry.into();
        self.0.insert(key.into(), entry.canonical());
        self
    }

    /// Add a template for one rule of one attribute (`{attribute: {rule: ..}}`).
    pub fn with_rule(
        mut self,
        attribute: impl Into<String>,
        rule: &str,
        template: impl Into<String>,
    ) -> Self {
        let rule = canonical_name(rule);
        let entry = self
            .0
            .entry(attribute.into())
            .or_insert_with(|| MessageEntry::ByRule(HashMap::new()));

        match entry {
            MessageEntry::ByRule(rules) => {
                rules.insert(rule, template.into());
            }
            MessageEntry::Message(_) => {
                let mut rules = HashMap::new();
                rules.insert(rule, template.into());
                *entry = MessageEntry::ByRule(rules);
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&MessageEntry> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Template of `key` for `rule`: a rule map entry for that rule, or a plain
    /// string entry.
    fn entry_for(&self, key: &str, rule: &str) -> Option<&str> {
        match self.0.get(key)? {
            MessageEntry::Message(message) => Some(message),
            MessageEntry::ByRule(rules) => rules.get(rule).map(String::as_str),
        }
    }

    /// Only a rule map entry for `rule`.
    fn by_rule(&self, key: &str, rule: &str) -> Option<&str> {
        match self.0.get(key)? {
            MessageEntry::ByRule(rules) => rules.get(rule).map(String::as_str),
            MessageEntry::Message(_) => None,
        }
    }

    /// Only a plain string entry.
    fn plain(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            MessageEntry::Message(message) => Some(message),
            MessageEntry::ByRule(_) => None,
        }
    }

    /// A plain entry keyed by `rule`, or by `prefix.rule` when a prefix is
    /// given. The exact canonical key wins; otherwise any key whose rule part
    /// canonicalizes to `rule` matches, the smallest key first.
    fn plain_for_rule(&self, prefix: Option<&str>, rule: &str) -> Option<&str> {
        let exact = match prefix {
            Some(prefix) => format!("{}.{}", prefix, rule),
            None => rule.to_string(),
        };
        if let Some(message) = self.plain(&exact) {
            return Some(message);
        }

        self.0
            .iter()
            .filter_map(|(key, entry)| {
                let MessageEntry::Message(message) = entry else {
                    return None;
                };
                let name = match prefix {
                    Some(prefix) => key.strip_prefix(prefix)?.strip_prefix('.')?,
                    None => key.as_str(),
                };
                (!name.contains('.') && canonical_name(name) == rule)
                    .then_some((key, message.as_str()))
            })
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, message)| message)
    }

    /// Most specific overlay template for an attribute and rule.
    fn lookup(&self, attribute: &str, rule: &str, wildcard: bool) -> Option<&str> {
        self.by_rule(attribute, rule)
            .or_else(|| self.plain_for_rule(Some(attribute), rule))
            .or_else(|| self.plain(attribute))
            .or_else(|| self.plain_for_rule(None, rule))
            .or_else(|| {
                if !wildcard {
                    return None;
                }
                let group = format!("{}.*", attribute);
                self.plain_for_rule(Some(&group), rule)
                    .or_else(|| self.entry_for(&group, rule))
            })
    }
}

/// Per-call display names for `:attribute`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeNames(HashMap<String, String>);

impl AttributeNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `attribute` as `name`.
    pub fn with(mut self, attribute: impl Into<String>, name: impl Into<String>) -> Self {
        self.0.insert(attribute.into(), name.into());
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }
}

/// Human-readable form of an attribute name: `firstName` → `first name`.
pub fn humanize(attribute: &str) -> String {
    snake_case(attribute).replace('_', " ")
}

/// Resolves failures to messages for one session.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MessageResolver<'a> {
    catalog: &'a MessageCatalog,
    custom: Option<&'a CustomMessages>,
    names: Option<&'a AttributeNames>,
}

impl<'a> MessageResolver<'a> {
    pub(crate) fn new(
        catalog: &'a MessageCatalog,
        custom: Option<&'a CustomMessages>,
        names: Option<&'a AttributeNames>,
    ) -> Self {
        Self {
            catalog,
            custom,
            names,
        }
    }

    /// Message for `rule` failing on `attribute`.
    ///
    /// For wildcard members `attribute` is the base name and `wildcard` is set.
    pub(crate) fn resolve(
        &self,
        attribute: &str,
        wildcard: bool,
        rule: &str,
        class: SizeClass,
        placeholders: &[(&'static str, String)],
    ) -> String {
        let template = self
            .custom
            .and_then(|custom| custom.lookup(attribute, rule, wildcard))
            .unwrap_or_else(|| self.catalog.template(rule, class));

        let mut message = template.to_string();
        for (name, value) in placeholders {
            message = message.replace(&format!(":{}", name), value);
        }
        message.replace(":attribute", &self.display_name(attribute))
    }

    fn display_name(&self, attribute: &str) -> String {
        self.names
            .and_then(|names| names.get(attribute))
            .map(str::to_string)
            .unwrap_or_else(|| humanize(attribute))
    }
}
