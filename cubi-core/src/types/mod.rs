//! Domain types for ethercubi.
//!
//! - [`Rig`]: A mining rig configuration, addressed by a word identifier
//! - [`CoinbaseAddress`]: The validated payout address a rig mines to

mod rig;

pub use rig::*;
