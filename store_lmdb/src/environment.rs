//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::record::LmdbRecordStore;
use crate::LmdbError;

pub(crate) const USERS_DB: &str = "users";
pub(crate) const USER_EMAILS_DB: &str = "user_emails";
pub(crate) const ALTS_DB: &str = "alts";

/// Default map size: plenty for a single community's records.
pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    users_db: Database<Bytes, Bytes>,
    user_emails_db: Database<Bytes, Bytes>,
    alts_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if missing and all databases are created
    /// up front, so later read transactions never see a missing database.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process and per path;
        // nothing else maps the same file with conflicting options.
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(max_dbs)
                .map_size(map_size)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let users_db = env.create_database(&mut wtxn, Some(USERS_DB))?;
        let user_emails_db = env.create_database(&mut wtxn, Some(USER_EMAILS_DB))?;
        let alts_db = env.create_database(&mut wtxn, Some(ALTS_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            users_db,
            user_emails_db,
            alts_db,
        })
    }

    /// Shared handle to the raw environment.
    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }

    /// A record store sharing this environment.
    pub fn record_store(&self) -> LmdbRecordStore {
        LmdbRecordStore {
            env: Arc::clone(&self.env),
            users_db: self.users_db,
            user_emails_db: self.user_emails_db,
            alts_db: self.alts_db,
        }
    }
}
