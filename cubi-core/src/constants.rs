//! Protocol constants for ethercubi.
//!
//! Address and identifier formats are fixed; the service defaults can be
//! overridden through configuration.

// ═══════════════════════════════════════════════════════════════════════════════
// COINBASE ADDRESS FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Literal prefix every coinbase address starts with.
pub const COINBASE_PREFIX: &str = "0x";

/// Size of a coinbase (Ethereum) address in bytes.
pub const COINBASE_ADDRESS_SIZE: usize = 20;

/// Number of hex digits following the prefix.
pub const COINBASE_HEX_LEN: usize = COINBASE_ADDRESS_SIZE * 2;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Separator placed between the sampled words of a rig identifier.
pub const ID_SEPARATOR: &str = "-";

/// Default number of words in a rig identifier.
pub const DEFAULT_ID_WORDS: usize = 3;

/// Default number of candidates tried before allocation gives up.
///
/// With a few hundred words and three-word identifiers the population is in
/// the millions, so hitting this cap means the store is pathologically full.
pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default lifetime of a rig configuration (15 minutes).
pub const DEFAULT_RIG_TTL_SECS: u64 = 15 * 60;

/// Default period of the expired-entry sweep (1 minute).
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default word list location.
pub const DEFAULT_WORDLIST_PATH: &str = "assets/wordlist";

/// Default install script template location.
pub const DEFAULT_TEMPLATE_PATH: &str = "assets/install_rig.sh";

/// Default upper bound for request bodies.
pub const DEFAULT_MAX_BODY_BYTES: usize = 4096;
