//! Built-in validation rules.

mod async_rules;
mod sync_rules;

pub use async_rules::*;
pub use sync_rules::*;
