//! Attribute evaluation and wildcard expansion.
//!
//! Every attribute (and every element of a wildcard attribute) becomes a
//! target. Each target's invocations are dispatched in order into pending
//! checks; a check that resolves on its first poll is treated as synchronous
//! and a synchronous failure stops the target's remaining invocations. Checks
//! still pending are awaited together at the end, so none is left dangling.

use crate::context::{RuleContext, ValidationContext};
use crate::error::{CollaboratorError, ConfigurationError, ErrorMap, ValidateError};
use crate::grammar::{RuleInvocation, RuleSet};
use crate::messages::MessageResolver;
use crate::registry::Registry;
use crate::size::SizeClass;
use crate::traits::PendingCheck;
use crate::value::{lookup, NULL};
use futures_util::future::{join_all, FutureExt};
use serde_json::Value;
use std::fmt;
use tracing::{trace, warn};

/// A rule-map key: a dot path, optionally ending in a `*` segment.
///
/// Only a trailing `*` addresses array elements; a `*` anywhere else is part of
/// the literal path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributePath {
    key: String,
    wildcard: bool,
}

impl AttributePath {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let wildcard = key
            .strip_suffix(".*")
            .map_or(false, |base| !base.is_empty());
        Self { key, wildcard }
    }

    /// The key as declared.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The addressed attribute: the key without its trailing `.*`.
    pub fn base(&self) -> &str {
        if self.wildcard {
            &self.key[..self.key.len() - 2]
        } else {
            &self.key
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// One value checked against one attribute's rules.
#[derive(Debug, Clone, Copy)]
struct Target<'a> {
    /// Error-map key: the path, or the base for wildcard members
    name: &'a str,
    /// Array position for wildcard members
    index: Option<usize>,
    value: &'a Value,
    rules: &'a RuleSet,
}

impl Target<'_> {
    /// `nullable` attributes with no value skip their rules.
    fn skips_rules(&self) -> bool {
        self.value.is_null() && self.rules.has_rule(&["nullable"])
    }
}

/// A check that did not resolve on its first poll.
struct Pending<'a> {
    target: usize,
    order: usize,
    sequence: usize,
    invocation: &'a RuleInvocation,
}

pub(crate) struct Evaluator<'a> {
    registry: &'a Registry,
    collaborators: &'a ValidationContext,
    resolver: MessageResolver<'a>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        registry: &'a Registry,
        collaborators: &'a ValidationContext,
        resolver: MessageResolver<'a>,
    ) -> Self {
        Self {
            registry,
            collaborators,
            resolver,
        }
    }

    /// Evaluate every attribute against `data` and collect the error map.
    ///
    /// Configuration errors abort immediately. Collaborator errors are
    /// returned only after every dispatched check has settled.
    pub(crate) async fn run(
        &self,
        attributes: &'a [(AttributePath, RuleSet)],
        data: &'a Value,
    ) -> Result<ErrorMap, ValidateError> {
        let mut errors = ErrorMap::new();
        let (targets, not_arrays) = self.expand(attributes, data);

        let mut failures: Vec<Option<(usize, &'a RuleInvocation)>> = vec![None; targets.len()];
        let mut collaborator_errors: Vec<(usize, CollaboratorError)> = Vec::new();
        let mut pending: Vec<Pending<'a>> = Vec::new();
        let mut checks: Vec<PendingCheck<'a>> = Vec::new();
        let mut sequence = 0;

        for (slot, target) in targets.iter().enumerate() {
            if target.skips_rules() {
                trace!(attribute = target.name, index = ?target.index, "Skipped nullable attribute");
                continue;
            }

            for (order, invocation) in target.rules.iter().enumerate() {
                let mut check = self.dispatch(target, invocation)?;
                sequence += 1;

                match (&mut check).now_or_never() {
                    Some(Ok(true)) => {}
                    Some(Ok(false)) => {
                        failures[slot] = Some((order, invocation));
                        break;
                    }
                    Some(Err(message)) => {
                        collaborator_errors.push((
                            sequence,
                            CollaboratorError::new(target.name, &invocation.name, message),
                        ));
                    }
                    None => {
                        pending.push(Pending {
                            target: slot,
                            order,
                            sequence,
                            invocation,
                        });
                        checks.push(check);
                    }
                }
            }
        }

        trace!(pending = checks.len(), "Awaiting pending checks");
        let outcomes = join_all(checks).await;

        for (check, outcome) in pending.into_iter().zip(outcomes) {
            match outcome {
                Ok(true) => {}
                Ok(false) => {
                    let earliest = match failures[check.target] {
                        Some((order, _)) if order < check.order => continue,
                        _ => (check.order, check.invocation),
                    };
                    failures[check.target] = Some(earliest);
                }
                Err(message) => collaborator_errors.push((
                    check.sequence,
                    CollaboratorError::new(
                        targets[check.target].name,
                        &check.invocation.name,
                        message,
                    ),
                )),
            }
        }

        if let Some((_, error)) = collaborator_errors
            .into_iter()
            .min_by_key(|(sequence, _)| *sequence)
        {
            warn!(
                attribute = %error.attribute,
                rule = %error.rule,
                error = %error.message,
                "Collaborator failed while validating"
            );
            return Err(ValidateError::Collaborator(error));
        }

        // Plain messages first, then wildcard bases that are not arrays, then
        // positions. The first message recorded for a name wins.
        let mut positional = Vec::new();
        for (target, failure) in targets.iter().zip(failures) {
            let Some((_, invocation)) = failure else {
                continue;
            };
            let message = self.message(target, invocation);
            match target.index {
                None => errors.insert(target.name, message),
                Some(index) => positional.push((target.name, index, message)),
            }
        }
        for (name, message) in not_arrays {
            errors.insert(name, message);
        }
        for (name, index, message) in positional {
            errors.insert_at(name, index, message);
        }

        Ok(errors)
    }

    /// Turn the rule map into targets, expanding wildcard attributes.
    ///
    /// Wildcard bases holding something other than an array produce no
    /// targets; their `array` messages are returned alongside.
    fn expand(
        &self,
        attributes: &'a [(AttributePath, RuleSet)],
        data: &'a Value,
    ) -> (Vec<Target<'a>>, Vec<(&'a str, String)>) {
        let mut targets = Vec::new();
        let mut not_arrays = Vec::new();

        for (path, rules) in attributes {
            if !path.is_wildcard() {
                targets.push(Target {
                    name: path.key(),
                    index: None,
                    value: lookup(data, path.key()).unwrap_or(&NULL),
                    rules,
                });
                continue;
            }

            match lookup(data, path.base()) {
                None | Some(Value::Null) => {
                    trace!(attribute = path.base(), "Wildcard attribute has no elements");
                }
                Some(Value::Array(items)) => {
                    targets.extend(items.iter().enumerate().map(|(index, value)| Target {
                        name: path.base(),
                        index: Some(index),
                        value,
                        rules,
                    }));
                }
                Some(_) => {
                    let message = self.resolver.resolve(
                        path.base(),
                        true,
                        "array",
                        SizeClass::classify(rules),
                        &[],
                    );
                    not_arrays.push((path.base(), message));
                }
            }
        }

        (targets, not_arrays)
    }

    fn dispatch(
        &self,
        target: &Target<'a>,
        invocation: &'a RuleInvocation,
    ) -> Result<PendingCheck<'a>, ConfigurationError> {
        let entry = self.registry.lookup(&invocation.name).ok_or_else(|| {
            ConfigurationError::UnknownRule {
                name: invocation.name.clone(),
            }
        })?;

        trace!(
            attribute = target.name,
            index = ?target.index,
            rule = %invocation.name,
            "Dispatching check"
        );

        let ctx = RuleContext::new(&invocation.name, target.rules, self.collaborators);
        entry.dispatch(target.name, target.value, &invocation.parameters, &ctx)
    }

    fn message(&self, target: &Target<'a>, invocation: &RuleInvocation) -> String {
        let placeholders = self
            .registry
            .lookup(&invocation.name)
            .map(|entry| entry.placeholders(&invocation.parameters))
            .unwrap_or_default();

        self.resolver.resolve(
            target.name,
            target.index.is_some(),
            &invocation.name,
            SizeClass::classify(target.rules),
            &placeholders,
        )
    }
}
