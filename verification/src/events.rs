//! Entry points for platform events.
//!
//! The platform adapter calls one of these per inbound event. Each runs in
//! its own span and may interleave with others.

use tracing::Instrument;
use verifybot_store::RecordStore;
use verifybot_types::{AccountId, ChannelId, WebhookId};

use crate::engine::VerificationEngine;
use crate::messages;
use crate::outcome::{JoinOutcome, SubmissionOutcome, WelcomeDelivery};
use crate::platform::Platform;
use crate::spans;
use crate::VerificationError;

impl<S: RecordStore, P: Platform> VerificationEngine<S, P> {
    /// A member joined. Returning members get their roles back; everyone
    /// else is sent the form.
    pub async fn on_member_join(&self, account: AccountId) -> Result<JoinOutcome, VerificationError> {
        async {
            match self.store.get_user(account)? {
                Some(record) => {
                    let member = self.member(account).await?;
                    self.add_roles(&member, record.cohort_year).await?;
                    tracing::info!(account = %account, "restored roles for returning member");
                    Ok(JoinOutcome::Restored(record))
                }
                None => Ok(JoinOutcome::Welcomed(self.welcome(account).await?)),
            }
        }
        .instrument(spans::member_join_span(account))
        .await
    }

    /// A form submission split into its ordered fields.
    pub async fn on_submission<L: AsRef<str>>(
        &self,
        fields: &[L],
    ) -> Result<SubmissionOutcome, VerificationError> {
        async {
            let outcome = self.verify(fields).await?;
            tracing::info!(outcome = outcome.label(), "submission processed");
            Ok(outcome)
        }
        .instrument(spans::submission_span(fields.len()))
        .await
    }

    /// A guild message posted by a webhook. Only the configured form
    /// webhook is processed; anything else yields `None`.
    pub async fn on_webhook_message(
        &self,
        webhook: WebhookId,
        content: &str,
    ) -> Result<Option<SubmissionOutcome>, VerificationError> {
        if webhook != self.config.form_webhook()? {
            tracing::debug!(webhook = %webhook, "ignoring message from unknown webhook");
            return Ok(None);
        }
        let lines: Vec<&str> = content.lines().collect();
        self.on_submission(&lines).await.map(Some)
    }

    /// `verifyme` sent in a channel. Only honoured in the user contact
    /// channel; returns `None` elsewhere.
    pub async fn on_self_service_request(
        &self,
        account: AccountId,
        channel: ChannelId,
    ) -> Result<Option<WelcomeDelivery>, VerificationError> {
        async {
            if channel != self.config.user_contact_channel()? {
                tracing::debug!("verifyme outside the user contact channel, ignoring");
                return Ok(None);
            }
            self.welcome(account).await.map(Some)
        }
        .instrument(spans::self_service_span(account, channel))
        .await
    }

    /// A DM to the bot. Relayed to moderators without pinging anyone, and
    /// acknowledged to the sender. Returns whether the acknowledgement was
    /// delivered.
    pub async fn on_direct_message(
        &self,
        author: AccountId,
        content: &str,
    ) -> Result<bool, VerificationError> {
        async {
            let channel = self.config.mod_contact_channel()?;
            self.platform
                .post_channel(channel, &messages::relayed_direct_message(author, content), None)
                .await?;
            Ok(self.notify_user(author, messages::RELAY_ACK).await)
        }
        .instrument(spans::direct_message_span(author))
        .await
    }
}
