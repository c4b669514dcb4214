//! verifybot node: opens the record store and bot config and builds the
//! verification engine for a platform adapter.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::VerifyNode;
