use super::ExistenceLookup;
use crate::value::textual;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

type Records = HashMap<(String, String), HashSet<String>>;

/// A lookup fixture that does not have the `{resource: {field: [values]}}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    #[error("lookup fixture must be an object keyed by resource")]
    NotAnObject,

    #[error("resource `{resource}` must map field names to arrays of values")]
    InvalidResource { resource: String },
}

/// In-memory record lookup (for tests and local fixtures).
///
/// Values are compared by their textual form, so `42` and `"42"` match.
#[derive(Debug, Clone, Default)]
pub struct MemoryLookup {
    records: Arc<RwLock<Records>>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records for `resource.field`.
    pub fn with_records<I>(self, resource: &str, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        for value in values {
            self.insert(resource, field, &value);
        }
        self
    }

    /// Add one record value. Clones of this lookup see the change.
    pub fn insert(&self, resource: &str, field: &str, value: &Value) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records
            .entry((resource.to_string(), field.to_string()))
            .or_default()
            .insert(textual(value));
    }

    /// Build a lookup from a fixture shaped `{resource: {field: [values]}}`.
    pub fn from_json(fixture: &Value) -> Result<Self, FixtureError> {
        let resources = fixture.as_object().ok_or(FixtureError::NotAnObject)?;
        let lookup = Self::new();

        for (resource, fields) in resources {
            let invalid = || FixtureError::InvalidResource {
                resource: resource.clone(),
            };
            for (field, values) in fields.as_object().ok_or_else(invalid)? {
                for value in values.as_array().ok_or_else(invalid)? {
                    lookup.insert(resource, field, value);
                }
            }
        }

        Ok(lookup)
    }

    /// Number of stored values across all resources.
    pub fn len(&self) -> usize {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExistenceLookup for MemoryLookup {
    async fn exists(&self, resource: &str, field: &str, value: &Value) -> Result<bool, String> {
        let records = self
            .records
            .read()
            .map_err(|_| "Lock poisoned".to_string())?;
        Ok(records
            .get(&(resource.to_string(), field.to_string()))
            .map_or(false, |values| values.contains(&textual(value))))
    }
}
