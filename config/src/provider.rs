//! File-backed option provider.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use toml::{Table, Value};
use verifybot_types::{ChannelId, GuildId, RoleId, WebhookId};

use crate::{ConfigError, ConfigKey};

/// The live option document.
///
/// Reads always see the latest successful [`BotConfig::set`]. When the
/// provider was loaded from a file, every `set` rewrites that file.
#[derive(Debug)]
pub struct BotConfig {
    path: Option<PathBuf>,
    doc: RwLock<Table>,
}

impl BotConfig {
    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let doc = parse_document(&content)?;
        tracing::info!(path = %path.display(), options = doc.len(), "loaded bot config");
        Ok(Self {
            path: Some(path.to_path_buf()),
            doc: RwLock::new(doc),
        })
    }

    /// Parse options from a TOML string. Updates are kept in memory only.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            path: None,
            doc: RwLock::new(parse_document(s)?),
        })
    }

    /// The current value of an option by name.
    pub fn get(&self, name: &str) -> Result<Value, ConfigError> {
        self.value(name.parse()?)
    }

    /// Replace an option's value, keeping its type.
    pub fn set(&self, name: &str, value: Value) -> Result<(), ConfigError> {
        let key: ConfigKey = name.parse()?;
        let mut doc = self.doc.write().unwrap_or_else(PoisonError::into_inner);

        let expected = doc
            .get(key.as_str())
            .map(Value::type_str)
            .unwrap_or_else(|| key.expected_type());
        if value.type_str() != expected {
            return Err(ConfigError::TypeMismatch {
                option: key.as_str(),
                expected,
                actual: value.type_str(),
            });
        }

        let previous = doc.insert(key.as_str().to_string(), value);
        if let Some(path) = &self.path {
            let rendered =
                toml::to_string_pretty(&*doc).map_err(|e| ConfigError::Parse(e.to_string()));
            let written = rendered.and_then(|s| std::fs::write(path, s).map_err(ConfigError::from));
            if let Err(e) = written {
                match previous {
                    Some(old) => doc.insert(key.as_str().to_string(), old),
                    None => doc.remove(key.as_str()),
                };
                tracing::error!(option = %key, error = %e, "failed to persist config update");
                return Err(e);
            }
        }

        tracing::info!(option = %key, "config option updated");
        Ok(())
    }

    /// The current value of a recognised option, falling back to its default.
    pub fn value(&self, key: ConfigKey) -> Result<Value, ConfigError> {
        let doc = self.doc.read().unwrap_or_else(PoisonError::into_inner);
        doc.get(key.as_str())
            .cloned()
            .or_else(|| key.default_value())
            .ok_or(ConfigError::Missing(key.as_str()))
    }

    /// Every recognised option with its current value, secrets masked.
    pub fn entries(&self) -> Vec<(ConfigKey, Option<Value>)> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| {
                let value = self.value(key).ok().map(|v| {
                    if key.is_secret() {
                        Value::String("********".to_string())
                    } else {
                        v
                    }
                });
                (key, value)
            })
            .collect()
    }

    pub fn guild(&self) -> Result<GuildId, ConfigError> {
        self.snowflake(ConfigKey::Guild).map(GuildId::new)
    }

    pub fn verified_role(&self) -> Result<RoleId, ConfigError> {
        self.snowflake(ConfigKey::VerifiedRole).map(RoleId::new)
    }

    pub fn mod_role(&self) -> Result<RoleId, ConfigError> {
        self.snowflake(ConfigKey::ModRole).map(RoleId::new)
    }

    pub fn mod_contact_channel(&self) -> Result<ChannelId, ConfigError> {
        self.snowflake(ConfigKey::ModContactChannel)
            .map(ChannelId::new)
    }

    pub fn user_contact_channel(&self) -> Result<ChannelId, ConfigError> {
        self.snowflake(ConfigKey::UserContactChannel)
            .map(ChannelId::new)
    }

    pub fn form_webhook(&self) -> Result<WebhookId, ConfigError> {
        self.snowflake(ConfigKey::FormWebhook).map(WebhookId::new)
    }

    pub fn form_url(&self) -> Result<String, ConfigError> {
        self.string(ConfigKey::FormUrl)
    }

    pub fn token(&self) -> Result<String, ConfigError> {
        self.string(ConfigKey::Token)
    }

    pub fn email_domain(&self) -> Result<String, ConfigError> {
        self.string(ConfigKey::EmailDomain)
    }

    pub fn accepted_schools(&self) -> Result<Vec<String>, ConfigError> {
        let key = ConfigKey::AcceptedSchools;
        match self.value(key)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(ConfigError::Invalid {
                        option: key.as_str(),
                        reason: format!("expected strings, found {}", other.type_str()),
                    }),
                })
                .collect(),
            other => Err(mismatch(key, &other)),
        }
    }

    fn snowflake(&self, key: ConfigKey) -> Result<u64, ConfigError> {
        match self.value(key)? {
            Value::Integer(raw) => u64::try_from(raw).map_err(|_| ConfigError::Invalid {
                option: key.as_str(),
                reason: format!("{raw} is not a valid id"),
            }),
            other => Err(mismatch(key, &other)),
        }
    }

    fn string(&self, key: ConfigKey) -> Result<String, ConfigError> {
        match self.value(key)? {
            Value::String(s) => Ok(s),
            other => Err(mismatch(key, &other)),
        }
    }
}

fn mismatch(key: ConfigKey, actual: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        option: key.as_str(),
        expected: key.expected_type(),
        actual: actual.type_str(),
    }
}

fn parse_document(s: &str) -> Result<Table, ConfigError> {
    let doc: Table = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
    for (name, value) in &doc {
        let key: ConfigKey = name.parse()?;
        if value.type_str() != key.expected_type() {
            return Err(mismatch(key, value));
        }
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        guild = 100
        verified_role = 200
        mod_role = 300
        mod_contact_channel = 400
        user_contact_channel = 500
        form_webhook = 600
        form_url = "https://forms.example/verify?id="
        token = "secret"
    "#;

    #[test]
    fn typed_accessors_read_document() {
        let config = BotConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.guild().unwrap(), GuildId::new(100));
        assert_eq!(config.verified_role().unwrap(), RoleId::new(200));
        assert_eq!(config.user_contact_channel().unwrap(), ChannelId::new(500));
        assert_eq!(config.form_webhook().unwrap(), WebhookId::new(600));
        assert_eq!(
            config.form_url().unwrap(),
            "https://forms.example/verify?id="
        );
    }

    #[test]
    fn defaults_fill_missing_options() {
        let config = BotConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.email_domain().unwrap(), "@pausd.us");
        assert_eq!(config.accepted_schools().unwrap(), vec!["Gunn", "Paly"]);
    }

    #[test]
    fn missing_required_option() {
        let config = BotConfig::from_toml_str("").unwrap();
        assert!(matches!(config.guild(), Err(ConfigError::Missing("guild"))));
    }

    #[test]
    fn set_rejects_type_mismatch() {
        let config = BotConfig::from_toml_str(SAMPLE).unwrap();
        let err = config
            .set("guild", Value::String("100".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { option: "guild", .. }));
        assert_eq!(config.guild().unwrap(), GuildId::new(100));
    }

    #[test]
    fn set_updates_value() {
        let config = BotConfig::from_toml_str(SAMPLE).unwrap();
        config.set("mod_role", Value::Integer(301)).unwrap();
        assert_eq!(config.mod_role().unwrap(), RoleId::new(301));
        assert_eq!(config.get("mod_role").unwrap(), Value::Integer(301));
    }

    #[test]
    fn unknown_option_rejected_by_get_and_set() {
        let config = BotConfig::from_toml_str(SAMPLE).unwrap();
        assert!(matches!(
            config.get("prefix"),
            Err(ConfigError::UnknownOption(_))
        ));
        assert!(matches!(
            config.set("prefix", Value::String("v".into())),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn negative_id_is_invalid() {
        let config = BotConfig::from_toml_str("guild = -1").unwrap();
        assert!(matches!(config.guild(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn document_with_wrong_type_is_rejected() {
        assert!(matches!(
            BotConfig::from_toml_str("form_url = 5"),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn entries_mask_token() {
        let config = BotConfig::from_toml_str(SAMPLE).unwrap();
        let token = config
            .entries()
            .into_iter()
            .find(|(key, _)| *key == ConfigKey::Token)
            .and_then(|(_, value)| value)
            .unwrap();
        assert_eq!(token, Value::String("********".into()));
    }
}
