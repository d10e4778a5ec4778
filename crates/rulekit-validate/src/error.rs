//! Error types for the validation engine.
//!
//! Three disjoint classes come out of a validation pass:
//!
//! - [`ConfigurationError`]: the rules themselves are broken (unknown rule,
//!   missing or malformed parameters). Fatal to the whole session.
//! - [`ErrorMap`]: one or more attributes failed their rules. Accumulative.
//! - [`CollaboratorError`]: an injected collaborator (e.g. the record lookup
//!   behind `exists`) failed to answer.
//!
//! [`ValidateError`] wraps all three and is what a session resolves to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A broken rule configuration. Never recorded in an [`ErrorMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The rule name is not registered.
    #[error("Invalid validation rule {name}")]
    UnknownRule { name: String },

    /// Fewer parameters than the rule needs.
    #[error("Validation rule {rule} requires at least {count} parameters.")]
    MissingParameters { rule: String, count: usize },

    /// More parameters than the rule accepts.
    #[error("Validation rule {rule} requires exactly {count} parameters.")]
    ExactParameters { rule: String, count: usize },

    /// A parameter that must be numeric is not.
    #[error("Validation rule {rule} requires number parameter.")]
    NumericParameter { rule: String },

    /// The pattern given to a pattern rule does not compile.
    #[error("Validation rule {rule} has an invalid pattern: {reason}")]
    InvalidPattern { rule: String, reason: String },

    /// The rule needs a record lookup but the validator has none.
    #[error("Validation rule {rule} requires a record lookup.")]
    MissingLookup { rule: String },
}

/// A collaborator failed while answering a check.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Validation rule {rule} for {attribute} could not be checked: {message}")]
pub struct CollaboratorError {
    /// Attribute being validated (base name for wildcard attributes)
    pub attribute: String,
    /// Canonical rule name
    pub rule: String,
    /// Message reported by the collaborator
    pub message: String,
}

impl CollaboratorError {
    /// Create a new collaborator error.
    pub fn new(
        attribute: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Errors recorded for one attribute.
///
/// Plain attributes carry a single message. Wildcard attributes (`tags.*`)
/// carry a sparse list indexed by array position; positions that passed are
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeErrors {
    /// Single resolved message
    Message(String),
    /// Per-element messages for wildcard attributes
    Positional(Vec<Option<String>>),
}

impl AttributeErrors {
    /// The message of a plain attribute.
    pub fn message(&self) -> Option<&str> {
        match self {
            AttributeErrors::Message(message) => Some(message),
            AttributeErrors::Positional(_) => None,
        }
    }

    /// The message recorded at `index` of a wildcard attribute.
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            AttributeErrors::Positional(items) => items.get(index)?.as_deref(),
            AttributeErrors::Message(_) => None,
        }
    }

    /// Positions that failed, in ascending order.
    pub fn failed_positions(&self) -> Vec<usize> {
        match self {
            AttributeErrors::Positional(items) => items
                .iter()
                .enumerate()
                .filter_map(|(index, message)| message.as_ref().map(|_| index))
                .collect(),
            AttributeErrors::Message(_) => Vec::new(),
        }
    }
}

/// Map of base attribute name to its recorded errors.
///
/// Serializes as a plain JSON object:
///
/// ```json
/// { "first_name": "The first name field is required.", "ages": [null, "The ages must be at least 18."] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    fields: BTreeMap<String, AttributeErrors>,
}

impl ErrorMap {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of attributes with errors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Errors recorded for an attribute.
    pub fn get(&self, attribute: &str) -> Option<&AttributeErrors> {
        self.fields.get(attribute)
    }

    /// The single message recorded for a plain attribute.
    pub fn message(&self, attribute: &str) -> Option<&str> {
        self.get(attribute)?.message()
    }

    /// The message recorded at `index` of a wildcard attribute.
    pub fn at(&self, attribute: &str, index: usize) -> Option<&str> {
        self.get(attribute)?.at(index)
    }

    /// Check whether an attribute has any recorded error.
    pub fn contains(&self, attribute: &str) -> bool {
        self.fields.contains_key(attribute)
    }

    /// Attribute names with errors, sorted.
    pub fn attributes(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Iterate over attribute errors, sorted by attribute name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeErrors)> {
        self.fields.iter().map(|(name, errors)| (name.as_str(), errors))
    }

    /// Convert to Result - Ok if no errors, Err otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Record the message of a plain attribute. The first recorded message wins.
    pub(crate) fn insert(&mut self, attribute: &str, message: String) {
        self.fields
            .entry(attribute.to_string())
            .or_insert(AttributeErrors::Message(message));
    }

    /// Record the message at `index` of a wildcard attribute.
    ///
    /// Ignored when the attribute already carries a plain message.
    pub(crate) fn insert_at(&mut self, attribute: &str, index: usize, message: String) {
        let entry = self
            .fields
            .entry(attribute.to_string())
            .or_insert_with(|| AttributeErrors::Positional(Vec::new()));

        if let AttributeErrors::Positional(items) = entry {
            if items.len() <= index {
                items.resize(index + 1, None);
            }
            if items[index].is_none() {
                items[index] = Some(message);
            }
        }
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {} attribute(s)", self.len())
    }
}

impl std::error::Error for ErrorMap {}

/// Outcome of a failed validation pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidateError {
    /// The rules are broken; nothing was evaluated to completion.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// One or more attributes failed their rules.
    #[error(transparent)]
    Failed(#[from] ErrorMap),

    /// A collaborator could not answer a check.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl ValidateError {
    /// The attribute errors, when this is a validation failure.
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            ValidateError::Failed(errors) => Some(errors),
            _ => None,
        }
    }

    /// Take the attribute errors, when this is a validation failure.
    pub fn into_errors(self) -> Option<ErrorMap> {
        match self {
            ValidateError::Failed(errors) => Some(errors),
            _ => None,
        }
    }

    /// Check if the rules themselves were broken.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ValidateError::Configuration(_))
    }
}
