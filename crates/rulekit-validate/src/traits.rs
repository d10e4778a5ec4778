//! Rule traits.
//!
//! Every rule, synchronous or not, is dispatched into a [`PendingCheck`]: a
//! boxed future resolving to pass/fail. Synchronous rules resolve on the first
//! poll, which lets the evaluator short-circuit an attribute as soon as it
//! fails while remote checks are still in flight.

use crate::context::{RuleContext, ValidationContext};
use crate::error::ConfigurationError;
use crate::grammar::Parameter;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde_json::Value;
use std::fmt::Debug;

/// A dispatched check. `Err` carries a collaborator failure message.
pub type PendingCheck<'a> = BoxFuture<'a, Result<bool, String>>;

/// A synchronous validation rule.
///
/// ## Example
///
/// ```rust
/// use rulekit_validate::prelude::*;
/// use serde_json::Value;
///
/// #[derive(Debug)]
/// struct Uppercase;
///
/// impl ValidationRule for Uppercase {
///     fn passes(
///         &self,
///         _attribute: &str,
///         value: &Value,
///         _parameters: &[Parameter],
///         _ctx: &RuleContext<'_>,
///     ) -> Result<bool, ConfigurationError> {
///         Ok(value.as_str().map_or(false, |s| s.chars().all(|c| !c.is_lowercase())))
///     }
/// }
/// ```
pub trait ValidationRule: Debug + Send + Sync {
    /// Decide whether `value` passes.
    ///
    /// Parameter problems are reported as [`ConfigurationError`]s and abort the
    /// whole session.
    fn passes(
        &self,
        attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<bool, ConfigurationError>;

    /// Placeholder replacements for this rule's message (`("min", "7")`
    /// replaces `:min`).
    fn placeholders(&self, _parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Receive everything after the first `:` as one text parameter.
    fn raw_parameters(&self) -> bool {
        false
    }
}

/// An asynchronous validation rule, typically backed by a collaborator from
/// the [`ValidationContext`].
#[async_trait]
pub trait AsyncValidationRule: Debug + Send + Sync {
    /// Check parameters before the rule is dispatched.
    fn prepare(
        &self,
        _attribute: &str,
        _parameters: &[Parameter],
        _ctx: &RuleContext<'_>,
    ) -> Result<(), ConfigurationError> {
        Ok(())
    }

    /// Decide whether `value` passes. `Err` is a collaborator failure.
    async fn passes(
        &self,
        attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &ValidationContext,
    ) -> Result<bool, String>;

    /// Placeholder replacements for this rule's message.
    fn placeholders(&self, _parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Receive everything after the first `:` as one text parameter.
    fn raw_parameters(&self) -> bool {
        false
    }
}
