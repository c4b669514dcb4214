//! Nullable platform: a scripted guild that records outbound traffic.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use verifybot_types::{AccountId, ChannelId, GuildId, RoleId};
use verifybot_verification::{Community, Guild, Member, Notifier, PlatformError, Role};

/// A message posted to a guild channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelPost {
    pub channel: ChannelId,
    pub text: String,
    pub mention: Option<RoleId>,
}

/// One `add_roles` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleGrant {
    pub account: AccountId,
    pub roles: Vec<RoleId>,
    pub reason: String,
}

/// A test platform with one guild.
///
/// Members, roles, channels and closed DMs are set up through the builder
/// methods; every DM, channel post and role grant is recorded for assertions.
pub struct NullPlatform {
    guild: Mutex<Option<Guild>>,
    members: Mutex<HashMap<AccountId, Member>>,
    channels: Mutex<HashSet<ChannelId>>,
    dms_closed: Mutex<HashSet<AccountId>>,
    direct_messages: Mutex<Vec<(AccountId, String)>>,
    channel_posts: Mutex<Vec<ChannelPost>>,
    role_grants: Mutex<Vec<RoleGrant>>,
}

impl NullPlatform {
    pub fn new(guild: GuildId) -> Self {
        Self {
            guild: Mutex::new(Some(Guild {
                id: guild,
                roles: Vec::new(),
            })),
            members: Mutex::new(HashMap::new()),
            channels: Mutex::new(HashSet::new()),
            dms_closed: Mutex::new(HashSet::new()),
            direct_messages: Mutex::new(Vec::new()),
            channel_posts: Mutex::new(Vec::new()),
            role_grants: Mutex::new(Vec::new()),
        }
    }

    pub fn with_role(self, id: u64, name: &str) -> Self {
        if let Some(guild) = self.guild.lock().unwrap().as_mut() {
            guild.roles.push(Role {
                id: RoleId::new(id),
                name: name.to_string(),
            });
        }
        self
    }

    pub fn with_member(self, id: u64) -> Self {
        let account = AccountId::new(id);
        self.members.lock().unwrap().insert(
            account,
            Member {
                id: account,
                roles: Vec::new(),
            },
        );
        self
    }

    pub fn with_channel(self, id: u64) -> Self {
        self.channels.lock().unwrap().insert(ChannelId::new(id));
        self
    }

    /// Make direct messages to this account fail.
    pub fn with_closed_dms(self, id: u64) -> Self {
        self.dms_closed.lock().unwrap().insert(AccountId::new(id));
        self
    }

    /// Make the guild unresolvable.
    pub fn remove_guild(&self) {
        *self.guild.lock().unwrap() = None;
    }

    /// Roles a member currently holds.
    pub fn member_roles(&self, id: u64) -> Vec<RoleId> {
        self.members
            .lock()
            .unwrap()
            .get(&AccountId::new(id))
            .map(|m| m.roles.clone())
            .unwrap_or_default()
    }

    /// DMs delivered to one account.
    pub fn direct_messages_to(&self, id: u64) -> Vec<String> {
        self.direct_messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == AccountId::new(id))
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn channel_posts(&self) -> Vec<ChannelPost> {
        self.channel_posts.lock().unwrap().clone()
    }

    pub fn posts_in(&self, channel: u64) -> Vec<ChannelPost> {
        self.channel_posts()
            .into_iter()
            .filter(|p| p.channel == ChannelId::new(channel))
            .collect()
    }

    pub fn role_grants(&self) -> Vec<RoleGrant> {
        self.role_grants.lock().unwrap().clone()
    }
}

impl Community for NullPlatform {
    async fn guild(&self, id: GuildId) -> Result<Option<Guild>, PlatformError> {
        Ok(self
            .guild
            .lock()
            .unwrap()
            .as_ref()
            .filter(|g| g.id == id)
            .cloned())
    }

    async fn member(
        &self,
        guild: GuildId,
        account: AccountId,
    ) -> Result<Option<Member>, PlatformError> {
        let known_guild = self
            .guild
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|g| g.id == guild);
        if !known_guild {
            return Ok(None);
        }
        Ok(self.members.lock().unwrap().get(&account).cloned())
    }

    async fn add_roles(
        &self,
        _guild: GuildId,
        account: AccountId,
        roles: &[RoleId],
        reason: &str,
    ) -> Result<(), PlatformError> {
        let mut members = self.members.lock().unwrap();
        let member = members
            .get_mut(&account)
            .ok_or(PlatformError::UnknownMember(account))?;
        for role in roles {
            if !member.roles.contains(role) {
                member.roles.push(*role);
            }
        }
        self.role_grants.lock().unwrap().push(RoleGrant {
            account,
            roles: roles.to_vec(),
            reason: reason.to_string(),
        });
        Ok(())
    }
}

impl Notifier for NullPlatform {
    async fn send_direct(&self, account: AccountId, text: &str) -> bool {
        if self.dms_closed.lock().unwrap().contains(&account) {
            return false;
        }
        self.direct_messages
            .lock()
            .unwrap()
            .push((account, text.to_string()));
        true
    }

    async fn post_channel(
        &self,
        channel: ChannelId,
        text: &str,
        mention: Option<RoleId>,
    ) -> Result<(), PlatformError> {
        if !self.channels.lock().unwrap().contains(&channel) {
            return Err(PlatformError::UnknownChannel(channel));
        }
        self.channel_posts.lock().unwrap().push(ChannelPost {
            channel,
            text: text.to_string(),
            mention,
        });
        Ok(())
    }
}
