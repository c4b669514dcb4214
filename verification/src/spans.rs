//! Pre-built [`tracing::Span`] constructors for inbound events.
//!
//! Consistent span names and fields make it easy to follow a single
//! submission or join through the logs.

use tracing::{info_span, Span};
use verifybot_types::{AccountId, ChannelId};

/// Span covering the processing of one form submission.
pub fn submission_span(field_count: usize) -> Span {
    info_span!("submission", fields = field_count)
}

/// Span covering a member joining the guild.
pub fn member_join_span(account: AccountId) -> Span {
    info_span!("member_join", account = %account)
}

/// Span covering a `verifyme` request.
pub fn self_service_span(account: AccountId, channel: ChannelId) -> Span {
    info_span!("self_service", account = %account, channel = %channel)
}

/// Span covering the relay of a direct message to moderators.
pub fn direct_message_span(author: AccountId) -> Span {
    info_span!("direct_message", author = %author)
}

/// Span covering a moderator command.
pub fn moderator_command_span(command: &str) -> Span {
    info_span!("moderator_command", command = %command)
}
