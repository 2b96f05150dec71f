//! Error types for ethercubi.
//!
//! One `thiserror` enum covers request-path failures (which end a single
//! request) and startup failures (which end the process).

use thiserror::Error;

/// Result type alias using `CubiError`.
pub type Result<T> = std::result::Result<T, CubiError>;

/// Main error type for all ethercubi operations.
#[derive(Debug, Error)]
pub enum CubiError {
    // ═══════════════════════════════════════════════════════════════════════════
    // IDENTIFIER ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Sample size exceeds the population.
    #[error("Sample size {requested} larger than population of {available}")]
    InsufficientPopulation {
        /// Number of distinct elements asked for
        requested: usize,
        /// Number of distinct elements on offer
        available: usize,
    },

    /// Every candidate identifier was already taken.
    #[error("No free identifier after {attempts} attempts")]
    AllocationExhausted {
        /// Candidates drawn before giving up
        attempts: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // REQUEST ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed request body.
    #[error("Cannot decode request body: {0}")]
    DecodeError(String),

    /// Coinbase address does not match `0x` + 40 hex digits.
    #[error("Invalid coinbase address: {0}")]
    InvalidCoinbase(String),

    /// Identifier absent or expired.
    #[error("Rig not found: {0}")]
    NotFound(String),

    /// Unsupported HTTP verb.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STARTUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Install script template failed to parse or render.
    #[error("Template error: {0}")]
    RenderError(String),

    /// Word list missing or unusable.
    #[error("Word list error: {0}")]
    WordListError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CubiError {
    /// Returns true if the error is the client's fault and ends only its request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CubiError::DecodeError(_)
                | CubiError::InvalidCoinbase(_)
                | CubiError::NotFound(_)
                | CubiError::MethodNotAllowed(_)
        )
    }

    /// Returns true if this error should abort the process at startup.
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            CubiError::InsufficientPopulation { .. }
                | CubiError::RenderError(_)
                | CubiError::WordListError(_)
                | CubiError::ConfigError(_)
                | CubiError::IoError(_)
        )
    }
}
