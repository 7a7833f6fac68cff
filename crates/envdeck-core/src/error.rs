use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    #[error(
        "unknown view: '{0}' (expected: applications, variables, access-keys, groups, roles, permissions, history)"
    )]
    UnknownView(String),

    #[error("invalid catalog snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
