//! Results of the verification workflows.
//!
//! Expected branches (a bad email, an unknown school) are outcomes, not
//! errors; `VerificationError` is reserved for misconfiguration, platform
//! failures and store defects.

use verifybot_types::{AccountId, VerificationRecord};

/// What happened to a form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A record was created and roles granted.
    Verified(VerificationRecord),
    /// The account already had an effective record; roles were re-granted.
    AlreadyVerified(VerificationRecord),
    /// The submitted account id is not a member of the guild.
    UnknownMember(AccountId),
    /// The email does not end with the institutional domain.
    WrongEmailDomain { account_id: AccountId, email: String },
    /// No role is named after the submitted cohort year.
    UnknownCohort { account_id: AccountId, cohort_year: String },
    /// The school is not one of the accepted schools.
    UnknownSchool { account_id: AccountId, school: String },
    /// The email is already verified under another account.
    DuplicateEmail { account_id: AccountId, email: String },
}

impl SubmissionOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, SubmissionOutcome::Verified(_))
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionOutcome::Verified(_) => "verified",
            SubmissionOutcome::AlreadyVerified(_) => "already_verified",
            SubmissionOutcome::UnknownMember(_) => "unknown_member",
            SubmissionOutcome::WrongEmailDomain { .. } => "wrong_email_domain",
            SubmissionOutcome::UnknownCohort { .. } => "unknown_cohort",
            SubmissionOutcome::UnknownSchool { .. } => "unknown_school",
            SubmissionOutcome::DuplicateEmail { .. } => "duplicate_email",
        }
    }
}

/// Where the welcome message ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WelcomeDelivery {
    Direct,
    /// DMs were refused; the user was pinged in the contact channel.
    ContactChannel,
}

/// Result of a member joining the guild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A returning member whose roles were restored from their record.
    Restored(VerificationRecord),
    Welcomed(WelcomeDelivery),
}

/// Result of a moderator linking an alt account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AltLinkOutcome {
    Linked {
        record: VerificationRecord,
        owner_notified: bool,
    },
    /// The link was stored but resolves to no record; moderators were alerted.
    Unresolved,
}
