use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Environment, RecordId};

/// A configuration value of an application in one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVariable {
    pub id: RecordId,
    pub application_id: RecordId,
    pub environment: Environment,
    pub key: String,
    pub value: String,
    /// Secret values are masked when displayed.
    #[serde(default)]
    pub secret: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
