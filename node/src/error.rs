use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("store error: {0}")]
    Store(#[from] verifybot_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] verifybot_store_lmdb::LmdbError),

    #[error("bot config error: {0}")]
    BotConfig(#[from] verifybot_config::ConfigError),

    #[error("verification error: {0}")]
    Verification(#[from] verifybot_verification::VerificationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("record store failed integrity check: {0}")]
    Integrity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
