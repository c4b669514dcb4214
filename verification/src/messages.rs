//! User- and moderator-facing message texts.

use verifybot_types::{AccountId, CohortYear};

pub fn welcome(form_url: &str, account: AccountId) -> String {
    format!(
        "## Welcome to the Gunn Server!\n\
         Please fill out [this form]({form_url}{account}) to verify as PAUSD.\n\
         If you are unable to do so, please reply to this message."
    )
}

pub fn enable_dms(account: AccountId) -> String {
    format!(
        "{} Please enable DMs from this server and reply with `verifyme`.",
        account.mention()
    )
}

pub fn invalid_account_id(account: AccountId, email: &str) -> String {
    format!("Form submitted with invalid account id `{account}` (email {email}).")
}

pub fn wrong_email_domain(account: AccountId, email: &str) -> String {
    format!(
        "{} submitted the form with a non-school email ({email}).",
        account.mention()
    )
}

pub fn resubmit_with_school_account(domain: &str) -> String {
    format!(
        "Your verification form was submitted with an email that does not end in `{domain}`. \
         Please fill out the form again while signed in to your school account."
    )
}

pub fn unknown_cohort(account: AccountId, cohort: &str) -> String {
    format!(
        "{} submitted the form with year `{cohort}`, which has no matching role.",
        account.mention()
    )
}

pub fn unknown_school(account: AccountId, school: &str) -> String {
    format!(
        "{} submitted the form with unrecognised school `{school}`.",
        account.mention()
    )
}

pub fn duplicate_email(account: AccountId, email: &str) -> String {
    format!(
        "{} submitted the form with {email}, which is already verified on another account.",
        account.mention()
    )
}

pub fn already_verified(account: AccountId) -> String {
    format!(
        "{} submitted the form again but is already verified; roles re-applied.",
        account.mention()
    )
}

pub const MANUAL_REVIEW: &str =
    "Your verification needs to be reviewed by a moderator. You will be contacted shortly.";

pub fn verified_mod_notice(account: AccountId, cohort: CohortYear) -> String {
    format!("{} was verified with year {cohort}.", account.mention())
}

pub const VERIFIED: &str = "You have been verified. Welcome to the server!";

pub fn role_grant_reason(cohort: CohortYear) -> String {
    format!("Verified as class of {cohort}")
}

pub fn alt_without_record(alt: AccountId) -> String {
    format!("No info associated with alt account {}.", alt.mention())
}

pub fn alt_added(alt: AccountId) -> String {
    format!("{} was successfully added as your alt.", alt.mention())
}

pub fn relayed_direct_message(author: AccountId, content: &str) -> String {
    format!("Message from {}:\n{content}", author.mention())
}

pub const RELAY_ACK: &str = "Thank you for your message. A mod will contact you shortly.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_appends_account_to_form_url() {
        let text = welcome("https://forms.example/v?id=", AccountId::new(555));
        assert!(text.contains("(https://forms.example/v?id=555)"));
    }

    #[test]
    fn enable_dms_mentions_user() {
        assert!(enable_dms(AccountId::new(7)).starts_with("<@7> "));
    }
}
