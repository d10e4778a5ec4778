//! # rulekit validation engine
//!
//! Validates JSON records against per-attribute rule strings and produces
//! templated, human-readable error messages.
//!
//! ## Features
//!
//! - Pipe-separated rule strings: `required|min:2|in:draft,published`
//! - Size rules that measure numbers, strings or arrays depending on the
//!   attribute's other rules
//! - Wildcard attributes (`tags.*`) with positional error lists
//! - Asynchronous `exists` checks through an injected record lookup
//! - Custom messages per call, per attribute, per rule or per wildcard group
//! - Custom sync and async rules
//!
//! ## Example
//!
//! ```rust
//! use rulekit_validate::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let data = json!({
//!     "firstName": "",
//!     "age": 16,
//!     "gender": "male",
//! });
//!
//! let err = rulekit_validate::validate(
//!     &data,
//!     [
//!         ("firstName", "required|min:2"),
//!         ("age", "required|numeric|min:18"),
//!         ("gender", "in:male,female"),
//!     ],
//! )
//! .await
//! .unwrap_err();
//!
//! let errors = err.errors().unwrap();
//! assert_eq!(errors.message("firstName"), Some("The first name field is required."));
//! assert_eq!(errors.message("age"), Some("The age must be at least 18."));
//! assert!(!errors.contains("gender"));
//! # }
//! ```
//!
//! ## Error Format
//!
//! A failed validation carries an [`ErrorMap`], which serializes as:
//!
//! ```json
//! {
//!   "firstName": "The first name field is required.",
//!   "ages": [null, "The ages must be at least 18."]
//! }
//! ```

mod context;
mod error;
mod evaluator;
mod grammar;
mod messages;
mod registry;
mod rules;
mod session;
mod size;
mod traits;
mod value;

pub mod lookup;


pub use context::{RuleContext, ValidationContext, ValidationContextBuilder};
pub use error::{AttributeErrors, CollaboratorError, ConfigurationError, ErrorMap, ValidateError};
pub use evaluator::AttributePath;
pub use grammar::{canonical_name, parse, Parameter, RuleInvocation, RuleSet};
pub use lookup::{ExistenceLookup, MemoryLookup};
pub use messages::{
    default_message, humanize, AttributeNames, CustomMessages, MessageCatalog, MessageEntry,
    FALLBACK_MESSAGE,
};
pub use registry::{BuiltinRule, Registry, RegistryBuilder, RuleEntry};
pub use rules::*;
pub use session::{default_validator, ParsedSession, Session, SessionState, Validator, ValidatorBuilder};
pub use size::{size_of, SizeClass};
pub use traits::{AsyncValidationRule, PendingCheck, ValidationRule};
pub use value::lookup as lookup_value;

#[cfg(feature = "postgres")]
pub use lookup::PostgresLookup;

/// Validate `data` against `rules` with the [default validator](default_validator).
pub async fn validate<I, K, V>(data: &serde_json::Value, rules: I) -> Result<(), ValidateError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    default_validator().validate(data, rules).await
}

/// Prelude module for validation
pub mod prelude {
    pub use crate::context::{RuleContext, ValidationContext, ValidationContextBuilder};
    pub use crate::error::{
        AttributeErrors, CollaboratorError, ConfigurationError, ErrorMap, ValidateError,
    };
    pub use crate::grammar::{Parameter, RuleInvocation, RuleSet};
    pub use crate::lookup::{ExistenceLookup, MemoryLookup};
    pub use crate::messages::{AttributeNames, CustomMessages, MessageEntry};
    pub use crate::registry::{Registry, RegistryBuilder};
    pub use crate::session::{Validator, ValidatorBuilder};
    pub use crate::size::SizeClass;
    pub use crate::traits::{AsyncValidationRule, ValidationRule};
    pub use async_trait::async_trait;
}
