//! Audit entry data structures
//!
//! An entry records one change to a client, or to a service or payment
//! inside a client, with the JSON state before and after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// The whole client list was replaced (import, restore)
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Replace => write!(f, "REPLACE"),
        }
    }
}

/// What was changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Client,
    Service,
    Payment,
    /// The client document as a whole
    Ledger,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Client => write!(f, "Client"),
            EntityType::Service => write!(f, "Service"),
            EntityType::Payment => write!(f, "Payment"),
            EntityType::Ledger => write!(f, "Ledger"),
        }
    }
}

/// A single audit log line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change happened (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Client id, with `#position` appended for services and payments
    pub entity_id: String,

    /// Client name at the time of the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable list of changed fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Entry for a changed entity
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Entry for a removed entity
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Entry for replacing the whole client list; only counts are kept
    pub fn replace(source: impl Into<String>, before_count: usize, after_count: usize) -> Self {
        Self {
            diff_summary: Some(format!(
                "clients: {} -> {}",
                before_count, after_count
            )),
            ..Self::new(Operation::Replace, EntityType::Ledger, source.into(), None)
        }
    }

    /// One- or two-line rendering for `salon history`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(Operation::Replace.to_string(), "REPLACE");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"name": "Anna", "phone": "600100200"});
        let entry = AuditEntry::create(EntityType::Client, "17", Some("Anna".into()), &data);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Client);
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(data));
    }

    #[test]
    fn test_update_entry() {
        let before = json!({"price": 100});
        let after = json!({"price": 120});
        let entry = AuditEntry::update(
            EntityType::Service,
            "17#2",
            Some("Anna".into()),
            &before,
            &after,
            Some("price: 100 -> 120".into()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.before, Some(before));
        assert_eq!(entry.after, Some(after));
    }

    #[test]
    fn test_replace_entry() {
        let entry = AuditEntry::replace("import", 3, 5);
        assert_eq!(entry.entity_type, EntityType::Ledger);
        assert_eq!(entry.diff_summary.as_deref(), Some("clients: 3 -> 5"));
    }

    #[test]
    fn test_serialized_names() {
        let entry = AuditEntry::delete(EntityType::Payment, "17#1", None, &json!({}));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["operation"], "delete");
        assert_eq!(value["entity_type"], "payment");
        assert!(value.get("entity_name").is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            EntityType::Client,
            "1700000000000",
            Some("Anna Nowak".into()),
            &json!({"name": "Anna Nowak"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE Client 1700000000000 (Anna Nowak)"));
    }
}
