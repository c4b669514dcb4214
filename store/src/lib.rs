//! Abstract storage traits for verifybot.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The verification engine depends only on the traits.

pub mod error;
pub mod record;

pub use error::{StoreError, UniqueKey};
pub use record::RecordStore;
