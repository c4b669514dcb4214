//! Fundamental types for verifybot.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! platform identifiers, timestamps, verification records and alt links.

pub mod error;
pub mod id;
pub mod record;
pub mod text;
pub mod time;

pub use error::TypesError;
pub use id::{AccountId, ChannelId, GuildId, RoleId, WebhookId};
pub use record::{AltLink, CohortYear, VerificationRecord};
pub use text::{normalize_email, title_case};
pub use time::Timestamp;
