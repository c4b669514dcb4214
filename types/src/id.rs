//! Platform identifiers.
//!
//! The chat platform hands out 64-bit snowflake ids for accounts, guilds,
//! roles, channels and webhooks. Each kind gets its own newtype so an account
//! id can never be passed where a channel id is expected. Parsing from text
//! happens once at the boundary; everything past it works with integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }

            /// Big-endian bytes, so LMDB keys sort numerically.
            pub fn to_be_bytes(self) -> [u8; 8] {
                self.0.to_be_bytes()
            }

            pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
                Self(u64::from_be_bytes(bytes))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| TypesError::InvalidId(s.to_string()))
            }
        }
    };
}

snowflake!(
    /// A user account on the chat platform.
    AccountId
);
snowflake!(
    /// A guild (community server).
    GuildId
);
snowflake!(RoleId);
snowflake!(ChannelId);
snowflake!(
    /// The webhook that delivers form submissions.
    WebhookId
);

impl AccountId {
    /// Platform mention markup for this account.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

impl RoleId {
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(" 555 ".parse::<AccountId>().unwrap(), AccountId::new(555));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(
            "abc".parse::<AccountId>(),
            Err(TypesError::InvalidId("abc".into()))
        );
        assert!("-1".parse::<ChannelId>().is_err());
    }

    #[test]
    fn be_bytes_round_trip() {
        let id = AccountId::new(1_234_567_890_123);
        assert_eq!(AccountId::from_be_bytes(id.to_be_bytes()), id);
    }

    #[test]
    fn mentions() {
        assert_eq!(AccountId::new(7).mention(), "<@7>");
        assert_eq!(RoleId::new(9).mention(), "<@&9>");
    }
}
