//! Record-existence collaborators for the `exists` rule.
//!
//! The engine never talks to a store directly. A lookup is injected through
//! [`ValidationContext`](crate::context::ValidationContext) and answers one
//! question: does a record of `resource` with `field == value` exist?

use async_trait::async_trait;
use serde_json::Value;

pub mod memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::{FixtureError, MemoryLookup};

#[cfg(feature = "postgres")]
pub use postgres::PostgresLookup;

/// Answers record-existence questions for asynchronous rules.
#[async_trait]
pub trait ExistenceLookup: Send + Sync {
    /// Check if a record of `resource` has `field` equal to `value`.
    ///
    /// `Err` means the store could not answer; it is reported to the caller as
    /// a collaborator error rather than a rule failure.
    async fn exists(&self, resource: &str, field: &str, value: &Value) -> Result<bool, String>;
}
