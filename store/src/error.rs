use thiserror::Error;
use verifybot_types::AccountId;

/// The unique column a rejected insert collided with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UniqueKey {
    AccountId(AccountId),
    Email(String),
    AltId(AccountId),
}

impl std::fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueKey::AccountId(id) => write!(f, "account id {id}"),
            UniqueKey::Email(email) => write!(f, "email {email}"),
            UniqueKey::AltId(id) => write!(f, "alt id {id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("uniqueness violation: {0} already exists")]
    UniquenessViolation(UniqueKey),

    #[error("referential integrity violation: owner {0} has no verification record")]
    ReferentialIntegrityViolation(AccountId),

    #[error("invalid link: account {0} cannot be its own alt")]
    InvalidLink(AccountId),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
