//! The fixed set of recognised option names.

use std::fmt;
use std::str::FromStr;

use toml::Value;

use crate::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// The guild the bot verifies members of.
    Guild,
    VerifiedRole,
    ModRole,
    /// Where moderator notifications and relayed DMs are posted.
    ModContactChannel,
    /// Where users are pinged when their DMs are closed.
    UserContactChannel,
    FormWebhook,
    /// Form link prefix; the account id is appended.
    FormUrl,
    Token,
    EmailDomain,
    AcceptedSchools,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 10] = [
        ConfigKey::Guild,
        ConfigKey::VerifiedRole,
        ConfigKey::ModRole,
        ConfigKey::ModContactChannel,
        ConfigKey::UserContactChannel,
        ConfigKey::FormWebhook,
        ConfigKey::FormUrl,
        ConfigKey::Token,
        ConfigKey::EmailDomain,
        ConfigKey::AcceptedSchools,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Guild => "guild",
            ConfigKey::VerifiedRole => "verified_role",
            ConfigKey::ModRole => "mod_role",
            ConfigKey::ModContactChannel => "mod_contact_channel",
            ConfigKey::UserContactChannel => "user_contact_channel",
            ConfigKey::FormWebhook => "form_webhook",
            ConfigKey::FormUrl => "form_url",
            ConfigKey::Token => "token",
            ConfigKey::EmailDomain => "email_domain",
            ConfigKey::AcceptedSchools => "accepted_schools",
        }
    }

    /// Value used when the document does not carry the option.
    pub fn default_value(self) -> Option<Value> {
        match self {
            ConfigKey::EmailDomain => Some(Value::String("@pausd.us".to_string())),
            ConfigKey::AcceptedSchools => Some(Value::Array(vec![
                Value::String("Gunn".to_string()),
                Value::String("Paly".to_string()),
            ])),
            _ => None,
        }
    }

    /// The TOML type every value of this option must have.
    pub fn expected_type(self) -> &'static str {
        match self {
            ConfigKey::FormUrl | ConfigKey::Token | ConfigKey::EmailDomain => "string",
            ConfigKey::AcceptedSchools => "array",
            _ => "integer",
        }
    }

    /// Whether the value should be hidden from logs and listings.
    pub fn is_secret(self) -> bool {
        matches!(self, ConfigKey::Token)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownOption(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_name_rejected() {
        assert!(matches!(
            "prefix".parse::<ConfigKey>(),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn defaults_match_expected_types() {
        for key in ConfigKey::ALL {
            if let Some(value) = key.default_value() {
                assert_eq!(value.type_str(), key.expected_type());
            }
        }
    }
}
