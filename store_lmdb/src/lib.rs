//! LMDB storage backend for verifybot.
//!
//! Implements [`verifybot_store::RecordStore`] using the `heed` LMDB bindings.
//! Records, the email uniqueness index and alt links are separate databases
//! within a single environment.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod record;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_integrity, IntegrityReport};
pub use record::LmdbRecordStore;
