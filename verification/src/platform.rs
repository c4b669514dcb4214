//! The chat platform as seen by the engine.
//!
//! The engine never talks to the platform directly; adapters implement
//! [`Community`] for guild state and role assignment, and [`Notifier`] for
//! outbound messages. Every call is a suspension point.

use std::future::Future;

use thiserror::Error;
use verifybot_types::{AccountId, ChannelId, GuildId, RoleId};

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("channel {0} is not a postable text channel")]
    UnknownChannel(ChannelId),

    #[error("account {0} is not a member of the guild")]
    UnknownMember(AccountId),

    #[error("missing permission: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// Snapshot of a guild's roles.
#[derive(Clone, Debug)]
pub struct Guild {
    pub id: GuildId,
    pub roles: Vec<Role>,
}

impl Guild {
    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// The first role whose name matches exactly.
    pub fn role_named(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: AccountId,
    pub roles: Vec<RoleId>,
}

impl Member {
    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

/// Guild state and role assignment.
pub trait Community: Send + Sync {
    /// Resolve a guild, `None` if the bot cannot see it.
    fn guild(
        &self,
        id: GuildId,
    ) -> impl Future<Output = Result<Option<Guild>, PlatformError>> + Send;

    /// Resolve a live member of a guild.
    fn member(
        &self,
        guild: GuildId,
        account: AccountId,
    ) -> impl Future<Output = Result<Option<Member>, PlatformError>> + Send;

    /// Assign all `roles` to a member in one request, with an audit reason.
    fn add_roles(
        &self,
        guild: GuildId,
        account: AccountId,
        roles: &[RoleId],
        reason: &str,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

/// Outbound messages.
pub trait Notifier: Send + Sync {
    /// Send a direct message. Returns `false` when the platform refuses
    /// delivery, e.g. because the user has DMs disabled.
    fn send_direct(&self, account: AccountId, text: &str) -> impl Future<Output = bool> + Send;

    /// Post to a guild channel, optionally mentioning a role.
    fn post_channel(
        &self,
        channel: ChannelId,
        text: &str,
        mention: Option<RoleId>,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

/// Everything the engine needs from the platform.
pub trait Platform: Community + Notifier {}

impl<T: Community + Notifier> Platform for T {}
