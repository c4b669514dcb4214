//! Runtime options for verifybot.
//!
//! Options live in a flat TOML document: one key per option, no tables.
//! [`BotConfig::get`] returns the stored value, [`BotConfig::set`] refuses
//! to change an option's type and writes the document back to disk.

pub mod error;
pub mod key;
pub mod provider;

pub use error::ConfigError;
pub use key::ConfigKey;
pub use provider::BotConfig;

pub use toml::Value;
