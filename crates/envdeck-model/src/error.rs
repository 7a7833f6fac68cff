use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid {field}: '{value}' (expected: {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ModelError {
    pub(crate) fn invalid(field: &'static str, value: &str, expected: &'static str) -> Self {
        ModelError::InvalidValue {
            field,
            value: value.to_string(),
            expected,
        }
    }
}
