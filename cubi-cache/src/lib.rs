//! TTL store for ethercubi.
//!
//! Generic in-memory key-value store where every entry expires a fixed time
//! after it was written, plus the background task that sweeps expired
//! entries out of memory.

mod cache;
mod cleanup;

pub use cache::{StoreConfig, StoreStats, TtlStore};
pub use cleanup::{CleanupScheduler, Sweep};
