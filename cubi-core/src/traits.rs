//! Common traits for ethercubi.

use crate::error::Result;
use crate::types::Rig;

// ═══════════════════════════════════════════════════════════════════════════════
// RENDERER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Turns a rig configuration into the bytes served to the miner.
///
/// Implementations should surface template problems when they are built, so
/// that `render` failing on a request is an internal error rather than a
/// routine outcome.
pub trait Renderer: Send + Sync {
    /// Renders the install script for `rig`.
    fn render(&self, rig: &Rig) -> Result<Vec<u8>>;
}

impl<F> Renderer for F
where
    F: Fn(&Rig) -> Result<Vec<u8>> + Send + Sync,
{
    fn render(&self, rig: &Rig) -> Result<Vec<u8>> {
        self(rig)
    }
}
