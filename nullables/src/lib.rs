//! Nullable infrastructure for deterministic testing.
//!
//! The record store and the chat platform are abstracted behind traits.
//! This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod platform;
pub mod store;

pub use platform::{ChannelPost, NullPlatform, RoleGrant};
pub use store::NullRecordStore;
