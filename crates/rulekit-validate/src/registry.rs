//! Validator registry - maps canonical rule names to rule implementations.
//!
//! Built-in rules come from the [`BuiltinRule`] table. Custom rules can be
//! added through [`RegistryBuilder`]; once built, a registry is immutable and
//! shared by every session of a validator.

use crate::context::RuleContext;
use crate::error::ConfigurationError;
use crate::grammar::{self, canonical_name, Parameter, RuleSet};
use crate::rules::*;
use crate::traits::{AsyncValidationRule, PendingCheck, ValidationRule};
use futures_util::future::{self, FutureExt};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Built-in rules, by canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRule {
    Required,
    Nullable,
    Min,
    Max,
    Between,
    Numeric,
    Integer,
    Boolean,
    In,
    Exists,
    Array,
    Url,
    Email,
    Regex,
    Date,
    Digits,
    DigitsBetween,
    Accepted,
    Alpha,
    AlphaNum,
}

impl BuiltinRule {
    /// Every built-in rule.
    pub const ALL: [BuiltinRule; 20] = [
        BuiltinRule::Required,
        BuiltinRule::Nullable,
        BuiltinRule::Min,
        BuiltinRule::Max,
        BuiltinRule::Between,
        BuiltinRule::Numeric,
        BuiltinRule::Integer,
        BuiltinRule::Boolean,
        BuiltinRule::In,
        BuiltinRule::Exists,
        BuiltinRule::Array,
        BuiltinRule::Url,
        BuiltinRule::Email,
        BuiltinRule::Regex,
        BuiltinRule::Date,
        BuiltinRule::Digits,
        BuiltinRule::DigitsBetween,
        BuiltinRule::Accepted,
        BuiltinRule::Alpha,
        BuiltinRule::AlphaNum,
    ];

    /// Canonical rule name.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinRule::Required => "required",
            BuiltinRule::Nullable => "nullable",
            BuiltinRule::Min => "min",
            BuiltinRule::Max => "max",
            BuiltinRule::Between => "between",
            BuiltinRule::Numeric => "numeric",
            BuiltinRule::Integer => "integer",
            BuiltinRule::Boolean => "boolean",
            BuiltinRule::In => "in",
            BuiltinRule::Exists => "exists",
            BuiltinRule::Array => "array",
            BuiltinRule::Url => "url",
            BuiltinRule::Email => "email",
            BuiltinRule::Regex => "regex",
            BuiltinRule::Date => "date",
            BuiltinRule::Digits => "digits",
            BuiltinRule::DigitsBetween => "digits_between",
            BuiltinRule::Accepted => "accepted",
            BuiltinRule::Alpha => "alpha",
            BuiltinRule::AlphaNum => "alpha_num",
        }
    }

    /// Resolve a canonical name to a built-in rule.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    fn handler(self) -> Handler {
        match self {
            BuiltinRule::Required => Handler::Sync(Arc::new(RequiredRule)),
            BuiltinRule::Nullable => Handler::Sync(Arc::new(NullableRule)),
            BuiltinRule::Min => Handler::Sync(Arc::new(MinRule)),
            BuiltinRule::Max => Handler::Sync(Arc::new(MaxRule)),
            BuiltinRule::Between => Handler::Sync(Arc::new(BetweenRule)),
            BuiltinRule::Numeric => Handler::Sync(Arc::new(NumericRule)),
            BuiltinRule::Integer => Handler::Sync(Arc::new(IntegerRule)),
            BuiltinRule::Boolean => Handler::Sync(Arc::new(BooleanRule)),
            BuiltinRule::In => Handler::Sync(Arc::new(InRule)),
            BuiltinRule::Exists => Handler::Async(Arc::new(ExistsRule)),
            BuiltinRule::Array => Handler::Sync(Arc::new(ArrayRule)),
            BuiltinRule::Url => Handler::Sync(Arc::new(UrlRule)),
            BuiltinRule::Email => Handler::Sync(Arc::new(EmailRule)),
            BuiltinRule::Regex => Handler::Sync(Arc::new(RegexRule::new())),
            BuiltinRule::Date => Handler::Sync(Arc::new(DateRule)),
            BuiltinRule::Digits => Handler::Sync(Arc::new(DigitsRule)),
            BuiltinRule::DigitsBetween => Handler::Sync(Arc::new(DigitsBetweenRule)),
            BuiltinRule::Accepted => Handler::Sync(Arc::new(AcceptedRule)),
            BuiltinRule::Alpha => Handler::Sync(Arc::new(AlphaRule)),
            BuiltinRule::AlphaNum => Handler::Sync(Arc::new(AlphaNumRule)),
        }
    }
}

#[derive(Clone)]
enum Handler {
    Sync(Arc<dyn ValidationRule>),
    Async(Arc<dyn AsyncValidationRule>),
}

/// A registered rule.
#[derive(Clone)]
pub struct RuleEntry {
    name: String,
    handler: Handler,
}

impl RuleEntry {
    /// Canonical rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this rule resolves asynchronously.
    pub fn is_async(&self) -> bool {
        matches!(self.handler, Handler::Async(_))
    }

    /// Whether the rule takes its parameter blob unsplit.
    pub fn raw_parameters(&self) -> bool {
        match &self.handler {
            Handler::Sync(rule) => rule.raw_parameters(),
            Handler::Async(rule) => rule.raw_parameters(),
        }
    }

    /// Placeholder replacements for this rule's message.
    pub fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        match &self.handler {
            Handler::Sync(rule) => rule.placeholders(parameters),
            Handler::Async(rule) => rule.placeholders(parameters),
        }
    }

    /// Dispatch the rule into a uniform pending check.
    ///
    /// Synchronous rules run now and come back as an already-resolved future.
    /// Parameter errors surface here, before anything is awaited.
    pub fn dispatch<'a>(
        &'a self,
        attribute: &'a str,
        value: &'a Value,
        parameters: &'a [Parameter],
        ctx: &RuleContext<'a>,
    ) -> Result<PendingCheck<'a>, ConfigurationError> {
        match &self.handler {
            Handler::Sync(rule) => {
                let passed = rule.passes(attribute, value, parameters, ctx)?;
                Ok(future::ready(Ok(passed)).boxed())
            }
            Handler::Async(rule) => {
                rule.prepare(attribute, parameters, ctx)?;
                Ok(rule.passes(attribute, value, parameters, ctx.collaborators()))
            }
        }
    }
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("name", &self.name)
            .field("async", &self.is_async())
            .finish()
    }
}

/// Registry of rules, keyed by canonical name.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, RuleEntry>,
}

impl Registry {
    /// A registry with every built-in rule.
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    /// Create a builder seeded with the built-in rules.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up a rule by canonical name.
    pub fn lookup(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.get(name)
    }

    /// Check if a canonical rule name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse a rule expression against this registry.
    pub fn parse(&self, expression: &str) -> Result<RuleSet, ConfigurationError> {
        grammar::parse(expression, self)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.names())
            .finish()
    }
}

/// Builder for a [`Registry`].
pub struct RegistryBuilder {
    rules: HashMap<String, RuleEntry>,
}

impl RegistryBuilder {
    /// A builder seeded with the built-in rules.
    pub fn new() -> Self {
        let mut builder = Self::empty();
        for rule in BuiltinRule::ALL {
            builder.insert(rule.name(), rule.handler());
        }
        builder
    }

    /// A builder with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register a synchronous rule, replacing any rule of the same name.
    pub fn rule(mut self, name: &str, rule: impl ValidationRule + 'static) -> Self {
        self.insert(name, Handler::Sync(Arc::new(rule)));
        self
    }

    /// Register an asynchronous rule, replacing any rule of the same name.
    pub fn async_rule(mut self, name: &str, rule: impl AsyncValidationRule + 'static) -> Self {
        self.insert(name, Handler::Async(Arc::new(rule)));
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        debug!(rules = self.rules.len(), "Built validation rule registry");
        Registry { rules: self.rules }
    }

    fn insert(&mut self, name: &str, handler: Handler) {
        let name = canonical_name(name);
        self.rules.insert(name.clone(), RuleEntry { name, handler });
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
