//! Verification record storage trait.

use crate::StoreError;
use verifybot_types::{AccountId, AltLink, VerificationRecord};

/// Durable storage of verification records and alt links.
///
/// Each call is its own transaction. Implementations must be safe to share
/// between concurrently running event handlers.
pub trait RecordStore: Send + Sync {
    /// Insert a new primary record.
    ///
    /// The email is stored in normalised form (trimmed, lowercased). Fails
    /// with [`StoreError::UniquenessViolation`] when the account id is already
    /// a record or a registered alt, or when the normalised email is taken.
    /// Never overwrites.
    fn add_user(&self, record: &VerificationRecord) -> Result<(), StoreError>;

    /// Link `alt_id` to the primary record of `owner_id`.
    ///
    /// Fails with [`StoreError::InvalidLink`] when the two ids are equal,
    /// [`StoreError::ReferentialIntegrityViolation`] when the owner has no
    /// record and [`StoreError::UniquenessViolation`] when `alt_id` is
    /// already linked or holds a primary record of its own.
    fn add_alt(&self, alt_id: AccountId, owner_id: AccountId) -> Result<AltLink, StoreError>;

    /// Resolve the effective record for an account.
    ///
    /// Either the primary record keyed by `account_id` or, when
    /// `account_id` is a registered alt, the owner's record.
    fn get_user(&self, account_id: AccountId) -> Result<Option<VerificationRecord>, StoreError>;
}
