//! App state: rig store, identifier allocator, renderer, config.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use cubi_cache::{StoreConfig, TtlStore};
use cubi_core::constants::*;
use cubi_core::error::{CubiError, Result};
use cubi_core::traits::Renderer;
use cubi_core::types::Rig;
use cubi_words::{IdAllocator, WordList};

use crate::render::TeraRenderer;

/// Service configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Listening address
    pub bind: SocketAddr,
    /// Lifetime of a stored rig
    pub rig_ttl: Duration,
    /// Period of the expired-rig sweep
    pub cleanup_interval: Duration,
    /// Words per rig identifier
    pub id_words: usize,
    /// Candidates tried before allocation gives up
    pub max_id_attempts: usize,
    /// Line-delimited word list
    pub wordlist_path: PathBuf,
    /// Install script template
    pub template_path: PathBuf,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            rig_ttl: Duration::from_secs(DEFAULT_RIG_TTL_SECS),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            id_words: DEFAULT_ID_WORDS,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            wordlist_path: DEFAULT_WORDLIST_PATH.into(),
            template_path: DEFAULT_TEMPLATE_PATH.into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            bind: env_or("CUBI_BIND", defaults.bind),
            rig_ttl: Duration::from_secs(env_or("CUBI_RIG_TTL_SECS", DEFAULT_RIG_TTL_SECS)),
            cleanup_interval: Duration::from_secs(env_or(
                "CUBI_CLEANUP_INTERVAL_SECS",
                DEFAULT_CLEANUP_INTERVAL_SECS,
            )),
            id_words: env_or("CUBI_ID_WORDS", defaults.id_words),
            max_id_attempts: env_or("CUBI_MAX_ID_ATTEMPTS", defaults.max_id_attempts),
            wordlist_path: env_or("CUBI_WORDLIST", defaults.wordlist_path),
            template_path: env_or("CUBI_INSTALL_TEMPLATE", defaults.template_path),
            max_body_bytes: env_or("CUBI_MAX_BODY_BYTES", defaults.max_body_bytes),
        }
    }

    /// Rejects settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.id_words == 0 {
            return Err(CubiError::ConfigError("id_words must be at least 1".into()));
        }
        if self.rig_ttl.is_zero() {
            return Err(CubiError::ConfigError("rig_ttl must be positive".into()));
        }
        if self.cleanup_interval.is_zero() {
            return Err(CubiError::ConfigError("cleanup_interval must be positive".into()));
        }
        if self.max_id_attempts == 0 {
            return Err(CubiError::ConfigError("max_id_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

/// Parses `key` from the environment, falling back to `default`.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "Ignoring unparseable setting");
            default
        }),
        Err(_) => default,
    }
}

/// Shared state behind every request.
pub struct AppState {
    pub config: ApiConfig,
    pub rigs: Arc<TtlStore<Rig>>,
    pub allocator: IdAllocator,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// Assembles state from already-loaded collaborators.
    ///
    /// The allocator must build identifiers of `config.id_words` words.
    pub fn new(config: ApiConfig, allocator: IdAllocator, renderer: Arc<dyn Renderer>) -> Result<Self> {
        config.validate()?;
        if allocator.id_len() != config.id_words {
            return Err(CubiError::ConfigError(format!(
                "allocator builds {}-word identifiers, configuration asks for {}",
                allocator.id_len(),
                config.id_words
            )));
        }
        let rigs = TtlStore::with_config(StoreConfig::default().with_ttl(config.rig_ttl));
        let allocator = allocator.with_max_attempts(config.max_id_attempts);

        Ok(Self {
            config,
            rigs: Arc::new(rigs),
            allocator,
            renderer,
        })
    }

    /// Loads the word list and template named in `config`.
    ///
    /// Any failure here is fatal: the service never runs partially configured.
    pub fn from_config(config: ApiConfig) -> Result<Self> {
        config.validate()?;

        let words = WordList::from_path(&config.wordlist_path)?;
        let allocator = IdAllocator::new(words, config.id_words)?;
        let renderer = TeraRenderer::from_path(&config.template_path)?;

        info!(
            words = allocator.words().len(),
            id_words = config.id_words,
            ttl_secs = config.rig_ttl.as_secs(),
            "Loaded rig service assets"
        );

        Self::new(config, allocator, Arc::new(renderer))
    }
}
