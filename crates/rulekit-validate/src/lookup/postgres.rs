use super::ExistenceLookup;
use crate::value::textual;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_REGEX.get_or_init(|| {
        // Optional schema prefix: `schema.table`
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?$").unwrap()
    })
}

/// Quote a table or column name, rejecting anything that is not a plain
/// identifier.
fn quote_identifier(name: &str) -> Result<String, String> {
    if !identifier_regex().is_match(name) {
        return Err(format!("Invalid identifier `{}`", name));
    }
    let quoted: Vec<String> = name.split('.').map(|part| format!("\"{}\"", part)).collect();
    Ok(quoted.join("."))
}

/// Postgres-backed record lookup.
///
/// `exists:users,email` becomes
/// `SELECT EXISTS (SELECT 1 FROM "users" WHERE "email"::text = $1)`, bound to
/// the value's textual form.
#[derive(Debug, Clone)]
pub struct PostgresLookup {
    pool: Pool<Postgres>,
}

impl PostgresLookup {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn query(resource: &str, field: &str) -> Result<String, String> {
        Ok(format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {}::text = $1)",
            quote_identifier(resource)?,
            quote_identifier(field)?
        ))
    }
}

#[async_trait]
impl ExistenceLookup for PostgresLookup {
    async fn exists(&self, resource: &str, field: &str, value: &Value) -> Result<bool, String> {
        let query = Self::query(resource, field)?;

        sqlx::query_scalar::<_, bool>(&query)
            .bind(textual(value))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| format!("Database error: {}", e))
    }
}
