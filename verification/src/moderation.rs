//! Moderator-privileged operations.
//!
//! These bypass submission validation; only the store's own constraints
//! apply. Store failures are returned as typed errors so the caller can
//! report them back to the moderator.

use tracing::Instrument;
use verifybot_store::RecordStore;
use verifybot_types::{normalize_email, AccountId, CohortYear, Timestamp, VerificationRecord};

use crate::engine::VerificationEngine;
use crate::messages;
use crate::outcome::AltLinkOutcome;
use crate::platform::Platform;
use crate::spans;
use crate::VerificationError;

/// Fields a moderator supplies to verify someone by hand.
#[derive(Clone, Debug)]
pub struct ManualEntry {
    pub account_id: AccountId,
    pub name: String,
    pub school: String,
    pub cohort_year: CohortYear,
    pub email: String,
}

impl<S: RecordStore, P: Platform> VerificationEngine<S, P> {
    /// Store a record as given and grant roles.
    pub async fn manual_add(
        &self,
        entry: ManualEntry,
    ) -> Result<VerificationRecord, VerificationError> {
        async {
            let member = self.member(entry.account_id).await?;
            let record = VerificationRecord {
                account_id: entry.account_id,
                name: entry.name,
                school: entry.school,
                cohort_year: entry.cohort_year,
                email: normalize_email(&entry.email),
                joined_at: Timestamp::now(),
            };
            self.store.add_user(&record).inspect_err(|e| {
                tracing::warn!(account = %record.account_id, error = %e, "manual add rejected");
            })?;
            self.add_roles(&member, record.cohort_year).await?;
            Ok(record)
        }
        .instrument(spans::moderator_command_span("adduser"))
        .await
    }

    /// Link an alt to its owner's record and grant the alt the owner's roles.
    pub async fn manual_alt_link(
        &self,
        alt: AccountId,
        owner: AccountId,
    ) -> Result<AltLinkOutcome, VerificationError> {
        async {
            let member = self.member(alt).await?;
            self.store.add_alt(alt, owner).inspect_err(|e| {
                tracing::warn!(alt = %alt, owner = %owner, error = %e, "alt link rejected");
            })?;

            let Some(record) = self.store.get_user(alt)? else {
                self.notify_mods(&messages::alt_without_record(alt), true)
                    .await?;
                return Ok(AltLinkOutcome::Unresolved);
            };

            self.add_roles(&member, record.cohort_year).await?;
            let owner_notified = self.notify_user(owner, &messages::alt_added(alt)).await;
            Ok(AltLinkOutcome::Linked {
                record,
                owner_notified,
            })
        }
        .instrument(spans::moderator_command_span("addalt"))
        .await
    }

    /// The effective record of an account, `None` when unverified.
    pub fn lookup(
        &self,
        account: AccountId,
    ) -> Result<Option<VerificationRecord>, VerificationError> {
        Ok(self.store.get_user(account)?)
    }
}
