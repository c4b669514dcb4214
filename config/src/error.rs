use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("option {option} expects {expected}, got {actual}")]
    TypeMismatch {
        option: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("option {0} is not set")]
    Missing(&'static str),

    #[error("option {option} has an invalid value: {reason}")]
    Invalid {
        option: &'static str,
        reason: String,
    },

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(String),
}
