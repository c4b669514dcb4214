//! Verification records and alt links.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{AccountId, Timestamp, TypesError};

/// A graduation/cohort year.
///
/// Stored as an integer; compared against guild roles by its decimal name
/// (`2026` selects the role named `"2026"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CohortYear(i32);

impl CohortYear {
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// The role name this cohort maps to.
    pub fn role_name(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for CohortYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CohortYear {
    type Err = TypesError;

    /// Only the canonical decimal form is accepted, so the parsed year
    /// always maps back to the same role name (`"02026"` and `"+2026"` are
    /// rejected).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i32>() {
            Ok(year) if year.to_string() == trimmed => Ok(Self(year)),
            _ => Err(TypesError::InvalidCohortYear(s.to_string())),
        }
    }
}

/// One verified primary identity.
///
/// `account_id` is the primary key; `email` is unique across all records
/// after [`normalize_email`](crate::normalize_email).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub account_id: AccountId,
    pub name: String,
    pub school: String,
    pub cohort_year: CohortYear,
    pub email: String,
    pub joined_at: Timestamp,
}

impl fmt::Display for VerificationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account {} | {} | {} {} | {} | joined {}",
            self.account_id,
            self.name,
            self.school,
            self.cohort_year,
            self.email,
            self.joined_at.as_secs()
        )
    }
}

/// A secondary account inheriting the verification of `owner_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltLink {
    pub alt_id: AccountId,
    pub owner_id: AccountId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohort_role_name_is_decimal() {
        assert_eq!("2026".parse::<CohortYear>().unwrap().role_name(), "2026");
        assert_eq!(CohortYear::new(2027).role_name(), "2027");
    }

    #[test]
    fn cohort_rejects_text() {
        assert!("twenty".parse::<CohortYear>().is_err());
    }

    #[test]
    fn cohort_rejects_non_canonical_numbers() {
        assert!("02026".parse::<CohortYear>().is_err());
        assert!("+2026".parse::<CohortYear>().is_err());
        assert!("-0".parse::<CohortYear>().is_err());
    }
}
