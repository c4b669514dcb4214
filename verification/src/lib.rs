//! Member verification for a school community server.
//!
//! New members are DMed a form link. The form's webhook posts each
//! submission as six lines, which the engine checks against the guild's
//! roles and the accepted schools before storing a [`VerificationRecord`]
//! and granting the verified and cohort roles. Anything that fails a check
//! is escalated to moderators instead.
//!
//! Moderators can also verify members by hand, link alt accounts to a
//! verified owner, and look records up.
//!
//! [`VerificationRecord`]: verifybot_types::VerificationRecord

pub mod engine;
pub mod error;
pub mod events;
pub mod messages;
pub mod moderation;
pub mod outcome;
pub mod platform;
pub mod spans;
pub mod submission;

pub use engine::VerificationEngine;
pub use error::VerificationError;
pub use moderation::ManualEntry;
pub use outcome::{AltLinkOutcome, JoinOutcome, SubmissionOutcome, WelcomeDelivery};
pub use platform::{Community, Guild, Member, Notifier, Platform, PlatformError, Role};
pub use submission::Submission;
