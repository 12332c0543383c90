//! Base embedded record fields.
//!
//! # Schema
//!
//! ```sql
//! id         INTEGER PRIMARY KEY AUTOINCREMENT,
//! created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
//! updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
//! deleted_at TIMESTAMP  -- soft delete marker, indexed
//! ```
//!
//! The matching column descriptors come from [`crate::schema::base_columns`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribute group shared by every persisted entity
///
/// Not a standalone entity: compose it into model structs with
/// `#[sqlx(flatten)]`.
///
/// # Example
///
/// ```
/// use dbkit::models::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
/// struct User {
///     #[sqlx(flatten)]
///     #[serde(flatten)]
///     base: Record,
///     email: String,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Primary key, assigned by the database
    pub id: i64,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; `None` means the row is live
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Whether the row has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// String-keyed map of arbitrarily-typed values, for ad-hoc query
/// conditions or partial updates
pub type Values = HashMap<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> Record {
        Record {
            id: 7,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("updatedAt"));
        assert!(obj.contains_key("deletedAt"));
    }

    #[test]
    fn test_is_deleted() {
        let mut record = sample_record();
        assert!(!record.is_deleted());
        record.deleted_at = Some(Utc::now());
        assert!(record.is_deleted());
    }

    #[test]
    fn test_values_holds_mixed_types() {
        let mut values = Values::new();
        values.insert("email".to_string(), json!("user@example.com"));
        values.insert("age".to_string(), json!(42));
        values.insert("active".to_string(), json!(true));
        assert_eq!(values.len(), 3);
        assert_eq!(values["age"], json!(42));
    }
}
