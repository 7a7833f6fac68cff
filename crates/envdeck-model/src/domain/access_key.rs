use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{ModelError, RecordId};

/// API credential issued to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    pub id: RecordId,
    pub application_id: RecordId,
    pub name: String,
    /// Secret key material; masked when displayed.
    pub key: String,
    pub status: AccessKeyStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// `None` when the key has never been used.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_used_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessKeyStatus {
    Active,
    Revoked,
}

impl AccessKeyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessKeyStatus::Active => "active",
            AccessKeyStatus::Revoked => "revoked",
        }
    }
}

impl FromStr for AccessKeyStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(AccessKeyStatus::Active),
            "revoked" => Ok(AccessKeyStatus::Revoked),
            _ => Err(ModelError::invalid("access key status", s, "active, revoked")),
        }
    }
}

impl fmt::Display for AccessKeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_used_key_has_no_last_used() {
        let json = r#"{
            "id": "key-1",
            "applicationId": "app-1",
            "name": "ci",
            "key": "ak_live_0123456789",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let key: AccessKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.status, AccessKeyStatus::Active);
        assert!(key.last_used_at.is_none());
    }

    #[test]
    fn status_parse() {
        assert_eq!("Revoked".parse::<AccessKeyStatus>(), Ok(AccessKeyStatus::Revoked));
        let err = "paused".parse::<AccessKeyStatus>().unwrap_err();
        assert!(err.to_string().contains("access key status"));
    }
}
