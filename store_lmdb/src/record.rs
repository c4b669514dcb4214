//! LMDB implementation of RecordStore.
//!
//! Keys are big-endian account ids. Each operation runs in exactly one LMDB
//! transaction; the uniqueness and owner checks of an insert happen inside
//! the same write transaction as the insert itself, and LMDB allows only one
//! writer at a time, so concurrent callers cannot race between check and put.
//!
//! An account id is either a primary record or an alt, never both. Emails
//! are stored and indexed in normalised form.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, RoTxn};

use verifybot_store::{RecordStore, StoreError, UniqueKey};
use verifybot_types::{normalize_email, AccountId, AltLink, VerificationRecord};

use crate::LmdbError;

pub struct LmdbRecordStore {
    pub(crate) env: Arc<Env>,
    pub(crate) users_db: Database<Bytes, Bytes>,
    pub(crate) user_emails_db: Database<Bytes, Bytes>,
    pub(crate) alts_db: Database<Bytes, Bytes>,
}

fn decode_account(bytes: &[u8]) -> Result<AccountId, LmdbError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization("invalid account id length".into()))?;
    Ok(AccountId::from_be_bytes(arr))
}

impl LmdbRecordStore {
    fn read_record(
        &self,
        rtxn: &RoTxn,
        account_id: AccountId,
    ) -> Result<Option<VerificationRecord>, LmdbError> {
        let key = account_id.to_be_bytes();
        match self.users_db.get(rtxn, &key[..])? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    fn read_owner(&self, rtxn: &RoTxn, alt_id: AccountId) -> Result<Option<AccountId>, LmdbError> {
        let key = alt_id.to_be_bytes();
        self.alts_db
            .get(rtxn, &key[..])?
            .map(decode_account)
            .transpose()
    }

    /// Number of primary records.
    pub fn user_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.users_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    /// Number of alt links.
    pub fn alt_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.alts_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}

impl RecordStore for LmdbRecordStore {
    fn add_user(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let record = VerificationRecord {
            email: normalize_email(&record.email),
            ..record.clone()
        };
        let key = record.account_id.to_be_bytes();
        let value = bincode::serialize(&record).map_err(LmdbError::from)?;

        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .users_db
            .get(&wtxn, &key[..])
            .map_err(LmdbError::from)?
            .is_some()
            || self
                .alts_db
                .get(&wtxn, &key[..])
                .map_err(LmdbError::from)?
                .is_some()
        {
            return Err(StoreError::UniquenessViolation(UniqueKey::AccountId(
                record.account_id,
            )));
        }
        if self
            .user_emails_db
            .get(&wtxn, record.email.as_bytes())
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::UniquenessViolation(UniqueKey::Email(
                record.email.clone(),
            )));
        }

        self.users_db
            .put(&mut wtxn, &key[..], &value)
            .map_err(LmdbError::from)?;
        self.user_emails_db
            .put(&mut wtxn, record.email.as_bytes(), &key[..])
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;

        tracing::debug!(account = %record.account_id, "stored verification record");
        Ok(())
    }

    fn add_alt(&self, alt_id: AccountId, owner_id: AccountId) -> Result<AltLink, StoreError> {
        if alt_id == owner_id {
            return Err(StoreError::InvalidLink(alt_id));
        }

        let alt_key = alt_id.to_be_bytes();
        let owner_key = owner_id.to_be_bytes();

        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .users_db
            .get(&wtxn, &owner_key[..])
            .map_err(LmdbError::from)?
            .is_none()
        {
            return Err(StoreError::ReferentialIntegrityViolation(owner_id));
        }
        if self
            .alts_db
            .get(&wtxn, &alt_key[..])
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::UniquenessViolation(UniqueKey::AltId(alt_id)));
        }
        if self
            .users_db
            .get(&wtxn, &alt_key[..])
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::UniquenessViolation(UniqueKey::AltId(alt_id)));
        }

        self.alts_db
            .put(&mut wtxn, &alt_key[..], &owner_key[..])
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;

        tracing::debug!(alt = %alt_id, owner = %owner_id, "stored alt link");
        Ok(AltLink { alt_id, owner_id })
    }

    fn get_user(&self, account_id: AccountId) -> Result<Option<VerificationRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;

        if let Some(record) = self.read_record(&rtxn, account_id)? {
            return Ok(Some(record));
        }
        match self.read_owner(&rtxn, account_id)? {
            Some(owner_id) => Ok(self.read_record(&rtxn, owner_id)?),
            None => Ok(None),
        }
    }
}
