//! Parsing of form submissions.
//!
//! The form webhook posts one message per submission with one field per
//! line, always in the order email, timestamp, name, school, cohort year,
//! account id.

use verifybot_types::{normalize_email, title_case, AccountId, Timestamp};

use crate::VerificationError;

pub const SUBMISSION_FIELDS: usize = 6;

/// A submission after boundary parsing, before any validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub email: String,
    pub submitted_at: Timestamp,
    /// Title-cased.
    pub name: String,
    /// Title-cased.
    pub school: String,
    /// Kept as text; it is matched against role names.
    pub cohort_year: String,
    pub account_id: AccountId,
}

impl Submission {
    /// Parse the six ordered fields. Any other field count, a non-integer
    /// account id or a non-integer timestamp is rejected outright.
    pub fn parse<S: AsRef<str>>(fields: &[S]) -> Result<Self, VerificationError> {
        let [email, timestamp, name, school, cohort_year, account_id] = fields else {
            return Err(VerificationError::MalformedSubmission(fields.len()));
        };

        let account_id =
            account_id
                .as_ref()
                .parse::<AccountId>()
                .map_err(|_| VerificationError::InvalidField {
                    field: "account_id",
                    value: account_id.as_ref().to_string(),
                })?;
        let submitted_at =
            timestamp
                .as_ref()
                .parse::<Timestamp>()
                .map_err(|_| VerificationError::InvalidField {
                    field: "timestamp",
                    value: timestamp.as_ref().to_string(),
                })?;

        Ok(Self {
            email: normalize_email(email.as_ref()),
            submitted_at,
            name: title_case(name.as_ref().trim()),
            school: title_case(school.as_ref().trim()),
            cohort_year: cohort_year.as_ref().trim().to_string(),
            account_id,
        })
    }

    /// Split a webhook message body into fields and parse them.
    pub fn from_message(content: &str) -> Result<Self, VerificationError> {
        let lines: Vec<&str> = content.lines().collect();
        Self::parse(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<&'static str> {
        vec!["a@pausd.us", "1700000000", "jane doe", "gunn", "2026", "555"]
    }

    #[test]
    fn parses_and_normalises() {
        let s = Submission::parse(&fields()).unwrap();
        assert_eq!(s.email, "a@pausd.us");
        assert_eq!(s.submitted_at, Timestamp::new(1_700_000_000));
        assert_eq!(s.name, "Jane Doe");
        assert_eq!(s.school, "Gunn");
        assert_eq!(s.cohort_year, "2026");
        assert_eq!(s.account_id, AccountId::new(555));
    }

    #[test]
    fn wrong_field_count_fails_fast() {
        let mut f = fields();
        f.pop();
        assert!(matches!(
            Submission::parse(&f),
            Err(VerificationError::MalformedSubmission(5))
        ));
        f.extend(["555", "extra"]);
        assert!(matches!(
            Submission::parse(&f),
            Err(VerificationError::MalformedSubmission(7))
        ));
    }

    #[test]
    fn non_numeric_account_id() {
        let mut f = fields();
        f[5] = "jane#1234";
        assert!(matches!(
            Submission::parse(&f),
            Err(VerificationError::InvalidField {
                field: "account_id",
                ..
            })
        ));
    }

    #[test]
    fn non_numeric_timestamp() {
        let mut f = fields();
        f[1] = "yesterday";
        assert!(matches!(
            Submission::parse(&f),
            Err(VerificationError::InvalidField {
                field: "timestamp",
                ..
            })
        ));
    }

    #[test]
    fn from_message_splits_lines() {
        let s = Submission::from_message("A@PAUSD.US\n1700000000\njane doe\ngunn\n2026\n555").unwrap();
        assert_eq!(s.email, "a@pausd.us");
        assert_eq!(s.account_id, AccountId::new(555));
    }
}
