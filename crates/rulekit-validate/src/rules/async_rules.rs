//! Asynchronous validation rules.
//!
//! These rules consult a collaborator from the [`ValidationContext`], typically
//! a database.

use crate::context::{RuleContext, ValidationContext};
use crate::error::ConfigurationError;
use crate::grammar::Parameter;
use crate::traits::AsyncValidationRule;
use async_trait::async_trait;
use serde_json::Value;

/// Record existence rule: `exists:<resource>,<field>`.
///
/// Passes when the configured [`ExistenceLookup`](crate::lookup::ExistenceLookup)
/// finds a record of `resource` whose `field` equals the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistsRule;

#[async_trait]
impl AsyncValidationRule for ExistsRule {
    fn prepare(
        &self,
        _attribute: &str,
        parameters: &[Parameter],
        ctx: &RuleContext<'_>,
    ) -> Result<(), ConfigurationError> {
        ctx.require_exact_parameter_count(2, parameters)?;
        if ctx.collaborators().lookup().is_none() {
            return Err(ConfigurationError::MissingLookup {
                rule: ctx.rule().to_string(),
            });
        }
        Ok(())
    }

    async fn passes(
        &self,
        _attribute: &str,
        value: &Value,
        parameters: &[Parameter],
        ctx: &ValidationContext,
    ) -> Result<bool, String> {
        let lookup = ctx
            .lookup()
            .ok_or_else(|| "Record lookup not configured in context".to_string())?;

        let resource = parameters.first().map(|p| p.to_string()).unwrap_or_default();
        let field = parameters.get(1).map(|p| p.to_string()).unwrap_or_default();

        lookup.exists(&resource, &field, value).await
    }

    fn placeholders(&self, parameters: &[Parameter]) -> Vec<(&'static str, String)> {
        let text = |index: usize| {
            parameters
                .get(index)
                .map(|p| p.to_string())
                .unwrap_or_default()
        };
        vec![("resource", text(0)), ("field", text(1))]
    }
}
