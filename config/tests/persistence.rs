//! Config updates persist to the backing file.

use std::io::Write;

use verifybot_config::{BotConfig, ConfigError, Value};
use verifybot_types::RoleId;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn set_is_visible_after_reload() {
    let file = write_config("mod_role = 1\nform_url = \"https://f/\"\n");
    let config = BotConfig::load(file.path()).unwrap();
    config.set("mod_role", Value::Integer(42)).unwrap();

    let reloaded = BotConfig::load(file.path()).unwrap();
    assert_eq!(reloaded.mod_role().unwrap(), RoleId::new(42));
    assert_eq!(reloaded.form_url().unwrap(), "https://f/");
}

#[test]
fn rejected_set_leaves_file_untouched() {
    let file = write_config("mod_role = 1\n");
    let config = BotConfig::load(file.path()).unwrap();
    assert!(config.set("mod_role", Value::Boolean(true)).is_err());

    let reloaded = BotConfig::load(file.path()).unwrap();
    assert_eq!(reloaded.mod_role().unwrap(), RoleId::new(1));
}

#[test]
fn missing_file_is_io_error() {
    let err = BotConfig::load(std::path::Path::new("/nonexistent/verifybot.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
