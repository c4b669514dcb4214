//! Nullable store: thread-safe in-memory record storage for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use verifybot_store::{RecordStore, StoreError, UniqueKey};
use verifybot_types::{normalize_email, AccountId, AltLink, VerificationRecord};

#[derive(Default)]
struct Tables {
    users: HashMap<AccountId, VerificationRecord>,
    emails: HashMap<String, AccountId>,
    alts: HashMap<AccountId, AccountId>,
}

/// An in-memory record store with the same constraints as the LMDB one.
/// One mutex guards all tables so each call is atomic.
#[derive(Default)]
pub struct NullRecordStore {
    tables: Mutex<Tables>,
}

impl NullRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn alt_count(&self) -> usize {
        self.tables.lock().unwrap().alts.len()
    }
}

impl RecordStore for NullRecordStore {
    fn add_user(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let record = VerificationRecord {
            email: normalize_email(&record.email),
            ..record.clone()
        };
        let mut tables = self.tables.lock().unwrap();
        if tables.users.contains_key(&record.account_id)
            || tables.alts.contains_key(&record.account_id)
        {
            return Err(StoreError::UniquenessViolation(UniqueKey::AccountId(
                record.account_id,
            )));
        }
        if tables.emails.contains_key(&record.email) {
            return Err(StoreError::UniquenessViolation(UniqueKey::Email(
                record.email.clone(),
            )));
        }
        tables
            .emails
            .insert(record.email.clone(), record.account_id);
        tables.users.insert(record.account_id, record);
        Ok(())
    }

    fn add_alt(&self, alt_id: AccountId, owner_id: AccountId) -> Result<AltLink, StoreError> {
        if alt_id == owner_id {
            return Err(StoreError::InvalidLink(alt_id));
        }
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.contains_key(&owner_id) {
            return Err(StoreError::ReferentialIntegrityViolation(owner_id));
        }
        if tables.alts.contains_key(&alt_id) || tables.users.contains_key(&alt_id) {
            return Err(StoreError::UniquenessViolation(UniqueKey::AltId(alt_id)));
        }
        tables.alts.insert(alt_id, owner_id);
        Ok(AltLink { alt_id, owner_id })
    }

    fn get_user(&self, account_id: AccountId) -> Result<Option<VerificationRecord>, StoreError> {
        let tables = self.tables.lock().unwrap();
        if let Some(record) = tables.users.get(&account_id) {
            return Ok(Some(record.clone()));
        }
        Ok(tables
            .alts
            .get(&account_id)
            .and_then(|owner| tables.users.get(owner))
            .cloned())
    }
}
