//! LMDB database integrity checks.
//!
//! Run on startup to detect inconsistent data early, before the bot begins
//! handling events. Problems are collected into the report rather than
//! failing the check.

use std::collections::HashSet;

use verifybot_types::VerificationRecord;

use crate::record::LmdbRecordStore;
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub users: u64,
    pub emails: u64,
    pub alts: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that the email index matches the records, that every alt link
/// points at an existing owner, and that no alt id has its own record.
pub fn check_integrity(store: &LmdbRecordStore) -> Result<IntegrityReport, LmdbError> {
    let rtxn = store.env.read_txn()?;
    let mut report = IntegrityReport {
        users: 0,
        emails: 0,
        alts: 0,
        errors: Vec::new(),
    };

    let mut owners = HashSet::new();
    for entry in store.users_db.iter(&rtxn)? {
        let (key, value) = entry?;
        report.users += 1;
        let record: VerificationRecord = match bincode::deserialize(value) {
            Ok(record) => record,
            Err(e) => {
                report.errors.push(format!("undecodable record: {e}"));
                continue;
            }
        };
        if key != &record.account_id.to_be_bytes()[..] {
            report
                .errors
                .push(format!("record {} stored under wrong key", record.account_id));
        }
        match store.user_emails_db.get(&rtxn, record.email.as_bytes())? {
            Some(indexed) if indexed == key => {}
            Some(_) => report.errors.push(format!(
                "email {} indexed to a different account than {}",
                record.email, record.account_id
            )),
            None => report
                .errors
                .push(format!("email {} missing from index", record.email)),
        }
        owners.insert(key.to_vec());
    }

    report.emails = store.user_emails_db.len(&rtxn)?;
    if report.emails != report.users {
        report.errors.push(format!(
            "email index has {} entries for {} records",
            report.emails, report.users
        ));
    }

    for entry in store.alts_db.iter(&rtxn)? {
        let (alt, owner) = entry?;
        report.alts += 1;
        if alt == owner {
            report.errors.push("alt linked to itself".to_string());
        }
        if !owners.contains(owner) {
            report.errors.push("alt link to a missing owner".to_string());
        }
        if owners.contains(alt) {
            report
                .errors
                .push("alt id also holds its own record".to_string());
        }
    }

    if report.is_healthy() {
        tracing::info!(
            users = report.users,
            alts = report.alts,
            "record store integrity check passed"
        );
    } else {
        tracing::warn!(
            errors = report.errors.len(),
            "record store integrity check found problems"
        );
    }
    Ok(report)
}
