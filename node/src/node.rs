//! Opens the process-wide record store and bot config.
//!
//! One `VerifyNode` exists per process. The store and config it opens are
//! shared by reference counting with every engine built from it, so the
//! single LMDB environment lives until the node and all engines are dropped.

use std::sync::Arc;

use verifybot_config::BotConfig;
use verifybot_store_lmdb::{check_integrity, LmdbEnvironment, LmdbRecordStore};
use verifybot_verification::{Platform, VerificationEngine};

use crate::{NodeConfig, NodeError};

const MAX_DBS: u32 = 8;

pub struct VerifyNode {
    _env: LmdbEnvironment,
    store: Arc<LmdbRecordStore>,
    bot_config: Arc<BotConfig>,
}

impl VerifyNode {
    /// Open the record store and load the bot config.
    pub fn open(config: &NodeConfig) -> Result<Self, NodeError> {
        let bot_config = BotConfig::load(&config.bot_config)?;
        Self::open_with(config, bot_config)
    }

    /// Open the record store with an already loaded bot config.
    pub fn open_with(config: &NodeConfig, bot_config: BotConfig) -> Result<Self, NodeError> {
        let env = LmdbEnvironment::open(&config.data_dir, MAX_DBS, config.map_size)?;
        let store = env.record_store();

        let report = check_integrity(&store)?;
        if !report.is_healthy() {
            for problem in &report.errors {
                tracing::error!(%problem, "record store inconsistency");
            }
            if config.strict_integrity {
                return Err(NodeError::Integrity(report.errors.join("; ")));
            }
        }

        tracing::info!(
            data_dir = %config.data_dir.display(),
            users = report.users,
            alts = report.alts,
            "record store ready"
        );

        Ok(Self {
            _env: env,
            store: Arc::new(store),
            bot_config: Arc::new(bot_config),
        })
    }

    pub fn store(&self) -> &Arc<LmdbRecordStore> {
        &self.store
    }

    pub fn bot_config(&self) -> &Arc<BotConfig> {
        &self.bot_config
    }

    /// Build the verification engine for a platform adapter.
    pub fn engine<P: Platform>(&self, platform: Arc<P>) -> VerificationEngine<LmdbRecordStore, P> {
        VerificationEngine::new(
            Arc::clone(&self.store),
            Arc::clone(&self.bot_config),
            platform,
        )
    }
}
