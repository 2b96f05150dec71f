//! # ethercubi core
//!
//! Core types, errors, and traits shared by every ethercubi crate.
//!
//! - **Types**: the [`Rig`] record and its [`CoinbaseAddress`]
//! - **Errors**: the [`CubiError`] taxonomy and the crate-wide [`Result`]
//! - **Constants**: address format, identifier shape, and service defaults
//! - **Traits**: the [`Renderer`] seam used to turn a rig into an install script
//!
//! ## Example
//!
//! ```rust
//! use cubi_core::Rig;
//!
//! let rig = Rig::from_json(br#"{"coinbase": "0x1111111111111111111111111111111111111111"}"#).unwrap();
//! assert!(rig.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{CubiError, Result};
pub use traits::*;
pub use types::*;
