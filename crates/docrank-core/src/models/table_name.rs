//! Validated SQL identifier for the storage table.
//!
//! Table names are spliced into statements, so they are checked once when
//! the config is built and never re-validated at query time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TABLE_NAME_LEN, RANKING_INDEX_SUFFIX};
use crate::errors::{DocrankError, DocrankResult};

/// An identifier safe to interpolate into SQL: ASCII letter or `_` first,
/// then ASCII alphanumerics or `_`, at most [`MAX_TABLE_NAME_LEN`] chars,
/// and not in SQLite's reserved `sqlite_` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> DocrankResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DocrankError::config("table name must not be empty"));
        }
        if name.len() > MAX_TABLE_NAME_LEN {
            return Err(DocrankError::config(format!(
                "table name {name:?} exceeds {MAX_TABLE_NAME_LEN} characters"
            )));
        }
        let mut chars = name.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DocrankError::config(format!(
                "table name {name:?} must match [A-Za-z_][A-Za-z0-9_]*"
            )));
        }
        if name.to_ascii_lowercase().starts_with("sqlite_") {
            return Err(DocrankError::config(format!(
                "table name {name:?} uses the reserved sqlite_ prefix"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the ranking index bound to this table.
    pub fn ranking_index(&self) -> String {
        format!("{}{RANKING_INDEX_SUFFIX}", self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TableName {
    type Error = DocrankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["docs", "_private", "Docs_2024", "a"] {
            assert!(TableName::new(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_injection_and_bad_shapes() {
        for name in [
            "",
            "1docs",
            "docs; DROP TABLE x",
            "docs-table",
            "dóçs",
            "sqlite_master",
            "SQLITE_stat1",
        ] {
            assert!(TableName::new(name).is_err(), "{name:?} should be rejected");
        }
        assert!(TableName::new("a".repeat(MAX_TABLE_NAME_LEN + 1)).is_err());
        assert!(TableName::new("a".repeat(MAX_TABLE_NAME_LEN)).is_ok());
    }

    #[test]
    fn ranking_index_name() {
        let t = TableName::new("docs").unwrap();
        assert_eq!(t.ranking_index(), "docs_bm25");
    }
}
