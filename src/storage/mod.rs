//! Durable local storage.
//!
//! The medium is a plain string key -> string value text store, so every
//! table is written as one JSON document under a fixed key. `FileStorage`
//! is the real backend (one file per key under a data directory);
//! `MemoryStorage` backs tests.

use anyhow::Result;

mod bridge;
mod file;
mod memory;

pub use bridge::PersistenceBridge;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key for the submitted-claims table.
pub const CLAIMS_KEY: &str = "claims";
/// Storage key for the in-progress (draft) claims table.
pub const DRAFTS_KEY: &str = "inProgressClaims";

/// A durable text medium. Reads and writes may fail (corrupt data, quota,
/// unavailable medium); the bridge treats every failure as recoverable.
pub trait StorageMedium: Send + Sync {
    fn read_key(&self, key: &str) -> Result<Option<String>>;
    fn write_key(&self, key: &str, value: &str) -> Result<()>;
}
