//! The verification engine.
//!
//! Checks a submission in a fixed order and stops at the first failure:
//! member lookup, email domain, cohort role, school. A failed check is
//! reported to moderators (always with the moderator role mentioned) and,
//! where the user can act on it, to the user. A passing submission is
//! stored and the verified and cohort roles are granted.

use std::sync::Arc;

use verifybot_config::BotConfig;
use verifybot_store::{RecordStore, StoreError, UniqueKey};
use verifybot_types::{AccountId, CohortYear, VerificationRecord};

use crate::messages;
use crate::outcome::{SubmissionOutcome, WelcomeDelivery};
use crate::platform::{Guild, Member, Platform};
use crate::submission::Submission;
use crate::VerificationError;

pub struct VerificationEngine<S, P> {
    pub(crate) store: Arc<S>,
    pub(crate) config: Arc<BotConfig>,
    pub(crate) platform: Arc<P>,
}

impl<S: RecordStore, P: Platform> VerificationEngine<S, P> {
    pub fn new(store: Arc<S>, config: Arc<BotConfig>, platform: Arc<P>) -> Self {
        Self {
            store,
            config,
            platform,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &Arc<BotConfig> {
        &self.config
    }

    /// Process one form submission.
    ///
    /// Returns `Err` only for malformed input, misconfiguration, platform
    /// failures and store conflicts other than a reused email.
    pub async fn verify<L: AsRef<str>>(
        &self,
        fields: &[L],
    ) -> Result<SubmissionOutcome, VerificationError> {
        let submission = Submission::parse(fields).inspect_err(|e| {
            tracing::warn!(error = %e, "rejecting malformed submission");
        })?;
        let account = submission.account_id;

        let guild = self.guild().await?;

        let Some(member) = self.platform.member(guild.id, account).await? else {
            self.notify_mods(&messages::invalid_account_id(account, &submission.email), true)
                .await?;
            return Ok(SubmissionOutcome::UnknownMember(account));
        };

        let domain = self.config.email_domain()?;
        if !submission.email.ends_with(&domain.to_lowercase()) {
            self.notify_mods(&messages::wrong_email_domain(account, &submission.email), true)
                .await?;
            self.notify_user(account, &messages::resubmit_with_school_account(&domain))
                .await;
            return Ok(SubmissionOutcome::WrongEmailDomain {
                account_id: account,
                email: submission.email,
            });
        }

        let cohort = match guild.role_named(&submission.cohort_year) {
            Some(_) => submission.cohort_year.parse::<CohortYear>().ok(),
            None => None,
        };
        let Some(cohort) = cohort else {
            self.notify_mods(&messages::unknown_cohort(account, &submission.cohort_year), true)
                .await?;
            self.notify_user(account, messages::MANUAL_REVIEW).await;
            return Ok(SubmissionOutcome::UnknownCohort {
                account_id: account,
                cohort_year: submission.cohort_year,
            });
        };

        let schools = self.config.accepted_schools()?;
        if !schools.iter().any(|s| *s == submission.school) {
            self.notify_mods(&messages::unknown_school(account, &submission.school), true)
                .await?;
            self.notify_user(account, messages::MANUAL_REVIEW).await;
            return Ok(SubmissionOutcome::UnknownSchool {
                account_id: account,
                school: submission.school,
            });
        }

        if let Some(existing) = self.store.get_user(account)? {
            tracing::info!(account = %account, "submission from an already verified account");
            self.grant_roles(&guild, &member, existing.cohort_year).await?;
            self.notify_mods(&messages::already_verified(account), false)
                .await?;
            return Ok(SubmissionOutcome::AlreadyVerified(existing));
        }

        let record = VerificationRecord {
            account_id: account,
            name: submission.name,
            school: submission.school,
            cohort_year: cohort,
            email: submission.email,
            joined_at: submission.submitted_at,
        };
        match self.store.add_user(&record) {
            Ok(()) => {}
            Err(StoreError::UniquenessViolation(UniqueKey::Email(email))) => {
                self.notify_mods(&messages::duplicate_email(account, &email), true)
                    .await?;
                self.notify_user(account, messages::MANUAL_REVIEW).await;
                return Ok(SubmissionOutcome::DuplicateEmail {
                    account_id: account,
                    email,
                });
            }
            Err(e) => return Err(e.into()),
        }

        self.grant_roles(&guild, &member, cohort).await?;
        Ok(SubmissionOutcome::Verified(record))
    }

    /// Grant the verified role and the cohort role to a member, then confirm
    /// to moderators and to the member.
    pub async fn add_roles(
        &self,
        member: &Member,
        cohort: CohortYear,
    ) -> Result<(), VerificationError> {
        let guild = self.guild().await?;
        self.grant_roles(&guild, member, cohort).await
    }

    /// Send the form link to an account, falling back to a ping in the user
    /// contact channel when DMs are refused.
    pub async fn welcome(&self, account: AccountId) -> Result<WelcomeDelivery, VerificationError> {
        let form_url = self.config.form_url()?;
        if self
            .platform
            .send_direct(account, &messages::welcome(&form_url, account))
            .await
        {
            tracing::info!(account = %account, "sent welcome message");
            return Ok(WelcomeDelivery::Direct);
        }

        let channel = self.config.user_contact_channel()?;
        tracing::info!(account = %account, channel = %channel, "DMs closed, pinging in contact channel");
        self.platform
            .post_channel(channel, &messages::enable_dms(account), None)
            .await?;
        Ok(WelcomeDelivery::ContactChannel)
    }

    /// Post to the moderator contact channel. Urgent notices mention the
    /// moderator role.
    pub async fn notify_mods(&self, text: &str, urgent: bool) -> Result<(), VerificationError> {
        let channel = self.config.mod_contact_channel()?;
        let mention = if urgent {
            tracing::warn!(notice = %text, "moderator attention required");
            Some(self.config.mod_role()?)
        } else {
            tracing::info!(notice = %text, "moderator notice");
            None
        };
        self.platform.post_channel(channel, text, mention).await?;
        Ok(())
    }

    /// DM a user. Delivery failure is logged and reported, never raised.
    pub async fn notify_user(&self, account: AccountId, text: &str) -> bool {
        let delivered = self.platform.send_direct(account, text).await;
        if !delivered {
            tracing::warn!(account = %account, "could not deliver direct message");
        }
        delivered
    }

    pub(crate) async fn guild(&self) -> Result<Guild, VerificationError> {
        let id = self.config.guild()?;
        self.platform.guild(id).await?.ok_or_else(|| {
            tracing::error!(guild = %id, "configured guild is unavailable");
            VerificationError::Configuration(format!("guild {id} is unavailable"))
        })
    }

    pub(crate) async fn member(&self, account: AccountId) -> Result<Member, VerificationError> {
        let guild = self.config.guild()?;
        self.platform
            .member(guild, account)
            .await?
            .ok_or(VerificationError::MemberNotFound(account))
    }

    async fn grant_roles(
        &self,
        guild: &Guild,
        member: &Member,
        cohort: CohortYear,
    ) -> Result<(), VerificationError> {
        let verified_id = self.config.verified_role()?;
        let verified = guild.role(verified_id).ok_or_else(|| {
            tracing::error!(role = %verified_id, "configured verified role does not exist");
            VerificationError::Configuration(format!("verified role {verified_id} does not exist"))
        })?;
        let cohort_name = cohort.role_name();
        let cohort_role = guild
            .role_named(&cohort_name)
            .ok_or(VerificationError::RoleNotFound(cohort_name))?;

        self.platform
            .add_roles(
                guild.id,
                member.id,
                &[verified.id, cohort_role.id],
                &messages::role_grant_reason(cohort),
            )
            .await?;
        tracing::info!(account = %member.id, cohort = %cohort, "granted verification roles");

        self.notify_mods(&messages::verified_mod_notice(member.id, cohort), false)
            .await?;
        self.notify_user(member.id, messages::VERIFIED).await;
        Ok(())
    }
}
