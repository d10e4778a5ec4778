//! Contexts handed to rules.
//!
//! [`ValidationContext`] holds the injected collaborators and is shared by
//! every session of a validator. [`RuleContext`] is built per dispatched check
//! and bundles the read-only session helpers a rule may need.

use crate::error::ConfigurationError;
use crate::grammar::{Parameter, RuleSet};
use crate::lookup::ExistenceLookup;
use crate::size::{size_of, SizeClass};
use serde_json::Value;
use std::sync::Arc;

/// Collaborators available to asynchronous rules.
///
/// ## Example
///
/// ```rust
/// use rulekit_validate::prelude::*;
/// use serde_json::json;
///
/// let lookup = MemoryLookup::new().with_records("tag", "name", [json!("news")]);
/// let ctx = ValidationContext::builder().lookup(lookup).build();
/// assert!(ctx.lookup().is_some());
/// ```
#[derive(Clone, Default)]
pub struct ValidationContext {
    lookup: Option<Arc<dyn ExistenceLookup>>,
}

impl ValidationContext {
    /// Create a new empty validation context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record lookup if configured.
    pub fn lookup(&self) -> Option<&Arc<dyn ExistenceLookup>> {
        self.lookup.as_ref()
    }

    /// Create a builder for constructing a validation context.
    pub fn builder() -> ValidationContextBuilder {
        ValidationContextBuilder::new()
    }
}

impl std::fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("has_lookup", &self.lookup.is_some())
            .finish()
    }
}

/// Builder for constructing a `ValidationContext`.
#[derive(Default)]
pub struct ValidationContextBuilder {
    lookup: Option<Arc<dyn ExistenceLookup>>,
}

impl ValidationContextBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record lookup.
    pub fn lookup(mut self, lookup: impl ExistenceLookup + 'static) -> Self {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Set the record lookup from an Arc.
    pub fn lookup_arc(mut self, lookup: Arc<dyn ExistenceLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Build the validation context.
    pub fn build(self) -> ValidationContext {
        ValidationContext {
            lookup: self.lookup,
        }
    }
}

/// Session helpers passed to every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    rule: &'a str,
    rules: &'a RuleSet,
    collaborators: &'a ValidationContext,
}

impl<'a> RuleContext<'a> {
    /// Context for dispatching `rule` on an attribute declaring `rules`.
    pub fn new(rule: &'a str, rules: &'a RuleSet, collaborators: &'a ValidationContext) -> Self {
        Self {
            rule,
            rules,
            collaborators,
        }
    }

    /// Canonical name of the rule being dispatched.
    pub fn rule(&self) -> &'a str {
        self.rule
    }

    /// All rules declared for the attribute.
    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    /// The validator's collaborators.
    pub fn collaborators(&self) -> &'a ValidationContext {
        self.collaborators
    }

    /// Check whether the attribute declares any of `names`.
    pub fn has_rule(&self, names: &[&str]) -> bool {
        self.rules.has_rule(names)
    }

    /// Size class implied by the attribute's declared rules.
    pub fn size_class(&self) -> SizeClass {
        SizeClass::classify(self.rules)
    }

    /// Size of `value` under the attribute's size class.
    pub fn size(&self, value: &Value) -> f64 {
        size_of(value, self.size_class())
    }

    /// Fail unless at least `count` parameters were given.
    pub fn require_parameter_count(
        &self,
        count: usize,
        parameters: &[Parameter],
    ) -> Result<(), ConfigurationError> {
        if parameters.len() < count {
            return Err(ConfigurationError::MissingParameters {
                rule: self.rule.to_string(),
                count,
            });
        }
        Ok(())
    }

    /// Fail unless exactly `count` parameters were given.
    pub fn require_exact_parameter_count(
        &self,
        count: usize,
        parameters: &[Parameter],
    ) -> Result<(), ConfigurationError> {
        self.require_parameter_count(count, parameters)?;
        if parameters.len() > count {
            return Err(ConfigurationError::ExactParameters {
                rule: self.rule.to_string(),
                count,
            });
        }
        Ok(())
    }

    /// The parameter at `index` as a number.
    pub fn numeric_parameter(
        &self,
        parameters: &[Parameter],
        index: usize,
    ) -> Result<f64, ConfigurationError> {
        self.require_parameter_count(index + 1, parameters)?;
        parameters[index]
            .as_f64()
            .ok_or_else(|| ConfigurationError::NumericParameter {
                rule: self.rule.to_string(),
            })
    }
}
