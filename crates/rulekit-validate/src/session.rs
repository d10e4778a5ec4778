//! Validators and validation sessions.
//!
//! A [`Validator`] owns the immutable parts of validation: the rule registry,
//! the message catalog and the injected collaborators. Every call builds a
//! fresh [`Session`], which moves through its states by value:
//!
//! ```text
//! Session (Created) --parse()--> ParsedSession (RulesParsed) --evaluate()--> Result (Resolved)
//! ```
//!
//! Since `evaluate` consumes the session, a session cannot be run twice.

use crate::context::{ValidationContext, ValidationContextBuilder};
use crate::error::{ConfigurationError, ValidateError};
use crate::evaluator::{AttributePath, Evaluator};
use crate::grammar::RuleSet;
use crate::lookup::ExistenceLookup;
use crate::messages::{AttributeNames, CustomMessages, MessageCatalog, MessageResolver};
use crate::registry::{Registry, RegistryBuilder};
use crate::traits::{AsyncValidationRule, ValidationRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

static DEFAULT_VALIDATOR: OnceLock<Validator> = OnceLock::new();

/// The process-wide validator used by [`validate`](crate::validate): built-in
/// rules, default messages, no record lookup.
pub fn default_validator() -> &'static Validator {
    DEFAULT_VALIDATOR.get_or_init(Validator::new)
}

/// Lifecycle states of a session, as reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    RulesParsed,
    AttributesEvaluating,
    Resolved,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Created => "created",
            SessionState::RulesParsed => "rules_parsed",
            SessionState::AttributesEvaluating => "attributes_evaluating",
            SessionState::Resolved => "resolved",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session factory.
///
/// Cheap to clone; clones share the registry and message catalog.
///
/// ## Example
///
/// ```rust
/// use rulekit_validate::prelude::*;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let validator = Validator::builder()
///     .lookup(MemoryLookup::new().with_records("users", "id", [json!(1)]))
///     .message("exists", "No such :resource.")
///     .build();
///
/// let data = json!({ "owner": 2, "title": "Hi" });
/// let err = validator
///     .validate(&data, [("owner", "required|exists:users,id"), ("title", "min:3")])
///     .await
///     .unwrap_err();
///
/// let errors = err.errors().unwrap();
/// assert_eq!(errors.message("owner"), Some("No such users."));
/// assert_eq!(errors.message("title"), Some("The title must be at least 3 characters."));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<Registry>,
    catalog: Arc<MessageCatalog>,
    context: ValidationContext,
}

impl Validator {
    /// A validator with the built-in rules and no collaborators.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Start a session for `data` against `rules` (attribute key → rule expression).
    pub fn session<'a, I, K, V>(&'a self, data: &'a Value, rules: I) -> Session<'a>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Session {
            validator: self,
            data,
            rules: rules
                .into_iter()
                .map(|(key, expression)| (key.into(), expression.as_ref().to_string()))
                .collect(),
            messages: None,
            names: None,
        }
    }

    /// Validate `data` against `rules`.
    pub async fn validate<I, K, V>(&self, data: &Value, rules: I) -> Result<(), ValidateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        self.session(data, rules).parse()?.evaluate().await
    }

    /// Validate `data` against `rules` with per-call custom messages.
    pub async fn validate_with<I, K, V>(
        &self,
        data: &Value,
        rules: I,
        messages: &CustomMessages,
    ) -> Result<(), ValidateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        self.session(data, rules)
            .messages(messages)
            .parse()?
            .evaluate()
            .await
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    registry: RegistryBuilder,
    catalog: MessageCatalog,
    context: ValidationContextBuilder,
}

impl ValidatorBuilder {
    /// A builder seeded with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule registry builder, e.g. with [`RegistryBuilder::empty`].
    pub fn registry(mut self, registry: RegistryBuilder) -> Self {
        self.registry = registry;
        self
    }

    /// Register a synchronous rule.
    pub fn rule(mut self, name: &str, rule: impl ValidationRule + 'static) -> Self {
        self.registry = self.registry.rule(name, rule);
        self
    }

    /// Register an asynchronous rule.
    pub fn async_rule(mut self, name: &str, rule: impl AsyncValidationRule + 'static) -> Self {
        self.registry = self.registry.async_rule(name, rule);
        self
    }

    /// Set the global message template for a rule.
    pub fn message(mut self, rule: &str, template: impl Into<String>) -> Self {
        self.catalog = self.catalog.with_message(rule, template);
        self
    }

    /// Set the record lookup used by `exists`.
    pub fn lookup(mut self, lookup: impl ExistenceLookup + 'static) -> Self {
        self.context = self.context.lookup(lookup);
        self
    }

    /// Set the record lookup from an Arc.
    pub fn lookup_arc(mut self, lookup: Arc<dyn ExistenceLookup>) -> Self {
        self.context = self.context.lookup_arc(lookup);
        self
    }

    /// Take the collaborators of an existing context.
    pub fn context(mut self, context: &ValidationContext) -> Self {
        if let Some(lookup) = context.lookup() {
            self.context = self.context.lookup_arc(Arc::clone(lookup));
        }
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            registry: Arc::new(self.registry.build()),
            catalog: Arc::new(self.catalog),
            context: self.context.build(),
        }
    }
}

/// A freshly created session: data and rule strings captured, nothing parsed.
#[derive(Debug)]
pub struct Session<'a> {
    validator: &'a Validator,
    data: &'a Value,
    rules: Vec<(String, String)>,
    messages: Option<&'a CustomMessages>,
    names: Option<&'a AttributeNames>,
}

impl<'a> Session<'a> {
    /// Use per-call custom messages.
    pub fn messages(mut self, messages: &'a CustomMessages) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Use per-call display names for `:attribute`.
    pub fn attribute_names(mut self, names: &'a AttributeNames) -> Self {
        self.names = Some(names);
        self
    }

    pub fn state(&self) -> SessionState {
        SessionState::Created
    }

    /// Parse every rule expression. Any unknown rule rejects the session.
    pub fn parse(self) -> Result<ParsedSession<'a>, ConfigurationError> {
        debug!(
            state = %SessionState::Created,
            attributes = self.rules.len(),
            "Parsing validation rules"
        );

        let mut attributes = Vec::with_capacity(self.rules.len());
        for (key, expression) in &self.rules {
            match self.validator.registry.parse(expression) {
                Ok(rules) => attributes.push((AttributePath::new(key.as_str()), rules)),
                Err(error) => {
                    debug!(attribute = %key, error = %error, "Rejected validation rules");
                    return Err(error);
                }
            }
        }
        attributes.sort_by(|(a, _), (b, _)| a.cmp(b));

        debug!(
            state = %SessionState::RulesParsed,
            attributes = attributes.len(),
            rules = attributes.iter().map(|(_, rules)| rules.len()).sum::<usize>(),
            "Parsed validation rules"
        );

        Ok(ParsedSession {
            validator: self.validator,
            data: self.data,
            attributes,
            messages: self.messages,
            names: self.names,
        })
    }
}

/// A session whose rules all parsed.
#[derive(Debug)]
pub struct ParsedSession<'a> {
    validator: &'a Validator,
    data: &'a Value,
    attributes: Vec<(AttributePath, RuleSet)>,
    messages: Option<&'a CustomMessages>,
    names: Option<&'a AttributeNames>,
}

impl<'a> ParsedSession<'a> {
    pub fn state(&self) -> SessionState {
        SessionState::RulesParsed
    }

    /// Parsed rules, sorted by attribute key.
    pub fn rules(&self) -> impl Iterator<Item = (&AttributePath, &RuleSet)> {
        self.attributes.iter().map(|(path, rules)| (path, rules))
    }

    /// Evaluate every attribute and resolve the session.
    pub async fn evaluate(self) -> Result<(), ValidateError> {
        debug!(
            state = %SessionState::AttributesEvaluating,
            attributes = self.attributes.len(),
            "Evaluating attributes"
        );

        let resolver = MessageResolver::new(&self.validator.catalog, self.messages, self.names);
        let evaluator = Evaluator::new(
            &self.validator.registry,
            &self.validator.context,
            resolver,
        );
        let errors = evaluator.run(&self.attributes, self.data).await?;

        debug!(
            state = %SessionState::Resolved,
            failed = errors.len(),
            "Validation resolved"
        );
        errors.into_result().map_err(ValidateError::Failed)
    }
}
