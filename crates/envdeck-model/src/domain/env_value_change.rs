use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Environment, ModelError, RecordId};

/// Audit entry recorded by the backend whenever an environment value changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvValueChange {
    pub id: RecordId,
    pub application_id: RecordId,
    pub environment: Environment,
    pub key: String,
    pub kind: ChangeKind,
    /// Absent for [`ChangeKind::Created`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// Absent for [`ChangeKind::Deleted`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// Whether the values are secret and must be masked.
    #[serde(default)]
    pub secret: bool,
    pub changed_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub changed_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl FromStr for ChangeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(ChangeKind::Created),
            "updated" => Ok(ChangeKind::Updated),
            "deleted" => Ok(ChangeKind::Deleted),
            _ => Err(ModelError::invalid(
                "change kind",
                s,
                "created, updated, deleted",
            )),
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_change_has_no_new_value() {
        let json = r#"{
            "id": "chg-1",
            "applicationId": "app-1",
            "environment": "production",
            "key": "DATABASE_URL",
            "kind": "deleted",
            "oldValue": "postgres://db",
            "changedBy": "alice",
            "changedAt": "2024-05-01T12:30:00Z"
        }"#;
        let change: EnvValueChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.kind, ChangeKind::Deleted);
        assert_eq!(change.old_value.as_deref(), Some("postgres://db"));
        assert!(change.new_value.is_none());
        assert!(!change.secret);
    }

    #[test]
    fn kind_parse() {
        assert_eq!("UPDATED".parse::<ChangeKind>(), Ok(ChangeKind::Updated));
        assert!("renamed".parse::<ChangeKind>().is_err());
    }
}
