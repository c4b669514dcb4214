use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid cohort year: {0:?}")]
    InvalidCohortYear(String),
}
