use thiserror::Error;
use verifybot_types::AccountId;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("malformed submission: expected 6 fields, got {0}")]
    MalformedSubmission(usize),

    #[error("invalid {field} in submission: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("role not found: {0}")]
    RoleNotFound(String),

    #[error("account {0} is not a member of the guild")]
    MemberNotFound(AccountId),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("store error: {0}")]
    Store(#[from] verifybot_store::StoreError),
}

impl From<verifybot_config::ConfigError> for VerificationError {
    fn from(e: verifybot_config::ConfigError) -> Self {
        VerificationError::Configuration(e.to_string())
    }
}
