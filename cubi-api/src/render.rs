//! Install script rendering with tera.

use std::path::Path;

use tera::{Context, Tera};

use cubi_core::error::{CubiError, Result};
use cubi_core::traits::Renderer;
use cubi_core::types::Rig;

const TEMPLATE_NAME: &str = "install_rig.sh";

/// Placeholder rig used to check a template renders before serving it.
const PROBE_COINBASE: &str = "0x0000000000000000000000000000000000000000";

/// Renders the install script template for a rig.
///
/// The template sees the record as `rig` (e.g. `{{ rig.coinbase }}`).
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Parses `source` and renders it once with a placeholder rig.
    ///
    /// Syntax errors and references to unknown variables both fail here.
    pub fn from_template(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(render_error)?;

        let renderer = Self { tera };
        renderer.render(&Rig::new(PROBE_COINBASE))?;
        Ok(renderer)
    }

    /// Loads the template from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| CubiError::RenderError(format!("{}: {}", path.display(), e)))?;
        Self::from_template(&source)
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, rig: &Rig) -> Result<Vec<u8>> {
        let mut context = Context::new();
        context.insert("rig", rig);
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map(String::into_bytes)
            .map_err(render_error)
    }
}

/// Flattens tera's nested error chain into one message.
fn render_error(err: tera::Error) -> CubiError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    CubiError::RenderError(message)
}
