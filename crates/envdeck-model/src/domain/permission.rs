use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ModelError, RecordId};

/// Grant of one action on one resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: RecordId,
    pub name: String,
    pub resource: PermissionResource,
    pub action: PermissionAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Kind of resource a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionResource {
    Application,
    Environment,
    AccessKey,
    Group,
    Role,
}

impl PermissionResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionResource::Application => "application",
            PermissionResource::Environment => "environment",
            PermissionResource::AccessKey => "accessKey",
            PermissionResource::Group => "group",
            PermissionResource::Role => "role",
        }
    }
}

impl FromStr for PermissionResource {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "application" => Ok(PermissionResource::Application),
            "environment" => Ok(PermissionResource::Environment),
            "accesskey" => Ok(PermissionResource::AccessKey),
            "group" => Ok(PermissionResource::Group),
            "role" => Ok(PermissionResource::Role),
            _ => Err(ModelError::invalid(
                "permission resource",
                s,
                "application, environment, accessKey, group, role",
            )),
        }
    }
}

impl fmt::Display for PermissionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation a permission allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionAction {
    Read,
    Write,
    Delete,
    Admin,
}

impl PermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::Read => "read",
            PermissionAction::Write => "write",
            PermissionAction::Delete => "delete",
            PermissionAction::Admin => "admin",
        }
    }
}

impl FromStr for PermissionAction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(PermissionAction::Read),
            "write" => Ok(PermissionAction::Write),
            "delete" => Ok(PermissionAction::Delete),
            "admin" => Ok(PermissionAction::Admin),
            _ => Err(ModelError::invalid(
                "permission action",
                s,
                "read, write, delete, admin",
            )),
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
