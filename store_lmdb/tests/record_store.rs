//! Record store behaviour against a real LMDB environment.

use std::sync::Arc;
use std::thread;

use verifybot_store::{RecordStore, StoreError, UniqueKey};
use verifybot_store_lmdb::{check_integrity, LmdbEnvironment, LmdbRecordStore};
use verifybot_types::{AccountId, CohortYear, Timestamp, VerificationRecord};

fn temp_store() -> (tempfile::TempDir, LmdbRecordStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = LmdbEnvironment::open(dir.path(), 8, 16 * 1024 * 1024).expect("open env");
    (dir, env.record_store())
}

fn record(id: u64, email: &str) -> VerificationRecord {
    VerificationRecord {
        account_id: AccountId::new(id),
        name: "Jane Doe".into(),
        school: "Gunn".into(),
        cohort_year: CohortYear::new(2026),
        email: email.into(),
        joined_at: Timestamp::new(1_700_000_000),
    }
}

#[test]
fn add_then_get_primary() {
    let (_dir, store) = temp_store();
    let rec = record(555, "a@pausd.us");
    store.add_user(&rec).unwrap();
    assert_eq!(store.get_user(AccountId::new(555)).unwrap(), Some(rec));
    assert_eq!(store.user_count().unwrap(), 1);
}

#[test]
fn unknown_account_is_absent_not_error() {
    let (_dir, store) = temp_store();
    assert!(store.get_user(AccountId::new(1)).unwrap().is_none());
}

#[test]
fn add_user_twice_fails_on_account_id() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    let err = store.add_user(&record(555, "b@pausd.us")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UniquenessViolation(UniqueKey::AccountId(id)) if id == AccountId::new(555)
    ));
}

#[test]
fn duplicate_email_rejected_without_overwrite() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    let err = store.add_user(&record(556, "a@pausd.us")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UniquenessViolation(UniqueKey::Email(ref e)) if e == "a@pausd.us"
    ));
    assert!(store.get_user(AccountId::new(556)).unwrap().is_none());
}

#[test]
fn alt_resolves_to_owner_record() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    let link = store
        .add_alt(AccountId::new(999), AccountId::new(555))
        .unwrap();
    assert_eq!(link.owner_id, AccountId::new(555));
    assert_eq!(
        store.get_user(AccountId::new(999)).unwrap(),
        store.get_user(AccountId::new(555)).unwrap()
    );
    assert_eq!(store.alt_count().unwrap(), 1);
}

#[test]
fn alt_without_owner_record_is_referential_violation() {
    let (_dir, store) = temp_store();
    let err = store
        .add_alt(AccountId::new(999), AccountId::new(555))
        .unwrap_err();
    assert!(matches!(err, StoreError::ReferentialIntegrityViolation(id) if id == AccountId::new(555)));
}

#[test]
fn self_link_is_invalid_even_with_record() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    let err = store
        .add_alt(AccountId::new(555), AccountId::new(555))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidLink(_)));
}

#[test]
fn alt_cannot_be_linked_twice() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    store.add_user(&record(556, "b@pausd.us")).unwrap();
    store
        .add_alt(AccountId::new(999), AccountId::new(555))
        .unwrap();
    let err = store
        .add_alt(AccountId::new(999), AccountId::new(556))
        .unwrap_err();
    assert!(matches!(err, StoreError::UniquenessViolation(UniqueKey::AltId(_))));
    assert_eq!(
        store.get_user(AccountId::new(999)).unwrap().unwrap().account_id,
        AccountId::new(555)
    );
}

#[test]
fn registered_alt_cannot_become_primary() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    store
        .add_alt(AccountId::new(999), AccountId::new(555))
        .unwrap();
    let err = store.add_user(&record(999, "c@pausd.us")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UniquenessViolation(UniqueKey::AccountId(id)) if id == AccountId::new(999)
    ));
    assert_eq!(
        store.get_user(AccountId::new(999)).unwrap(),
        store.get_user(AccountId::new(555)).unwrap()
    );
    assert_eq!(store.user_count().unwrap(), 1);
}

#[test]
fn account_with_own_record_cannot_become_alt() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    store.add_user(&record(999, "c@pausd.us")).unwrap();
    let err = store
        .add_alt(AccountId::new(999), AccountId::new(555))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::UniquenessViolation(UniqueKey::AltId(id)) if id == AccountId::new(999)
    ));
    assert_eq!(store.alt_count().unwrap(), 0);
    assert_eq!(
        store.get_user(AccountId::new(999)).unwrap().unwrap().email,
        "c@pausd.us"
    );
}

#[test]
fn email_uniqueness_ignores_case_and_whitespace() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, " A@PAUSD.US")).unwrap();
    let err = store.add_user(&record(556, "a@pausd.us")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UniquenessViolation(UniqueKey::Email(ref e)) if e == "a@pausd.us"
    ));
    assert_eq!(
        store.get_user(AccountId::new(555)).unwrap().unwrap().email,
        "a@pausd.us"
    );
    assert!(check_integrity(&store).unwrap().is_healthy());
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let env = LmdbEnvironment::open(dir.path(), 8, 16 * 1024 * 1024).unwrap();
        env.record_store().add_user(&record(555, "a@pausd.us")).unwrap();
    }
    let env = LmdbEnvironment::open(dir.path(), 8, 16 * 1024 * 1024).unwrap();
    assert!(env
        .record_store()
        .get_user(AccountId::new(555))
        .unwrap()
        .is_some());
}

#[test]
fn concurrent_inserts_of_same_email_admit_exactly_one() {
    let (_dir, store) = temp_store();
    let store = Arc::new(store);
    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.add_user(&record(100 + i, "same@pausd.us")).is_ok())
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(store.user_count().unwrap(), 1);
}

#[test]
fn integrity_check_passes_on_consistent_store() {
    let (_dir, store) = temp_store();
    store.add_user(&record(555, "a@pausd.us")).unwrap();
    store
        .add_alt(AccountId::new(999), AccountId::new(555))
        .unwrap();
    let report = check_integrity(&store).unwrap();
    assert!(report.is_healthy(), "{:?}", report.errors);
    assert_eq!((report.users, report.emails, report.alts), (1, 1, 1));
}
