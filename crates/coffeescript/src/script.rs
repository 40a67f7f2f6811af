//! The CoffeeScript compiler script
//!
//! The compiler ships as a single JavaScript file, `coffee-script.js`,
//! looked up in this crate's `js/` directory unless `COFFEESCRIPT_JS`
//! points elsewhere. It is read verbatim and never modified.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::source::{self, SourceEncoding};

/// Environment variable overriding the location of the compiler script.
pub const SCRIPT_ENV: &str = "COFFEESCRIPT_JS";

/// Location of the compiler script shipped with this crate
const BUNDLED_SCRIPT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/js/coffee-script.js");

/// JavaScript source of the CoffeeScript compiler.
///
/// Cheap to clone; the text is shared.
#[derive(Clone, PartialEq, Eq)]
pub struct CompilerScript {
    source: Arc<str>,
}

impl CompilerScript {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a compiler script from a UTF-8 file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = source::read_text(path.as_ref(), SourceEncoding::Whatwg(encoding_rs::UTF_8))?;
        debug!(path = %path.as_ref().display(), bytes = text.len(), "loaded compiler script");
        Ok(Self::new(text))
    }

    /// The compiler script shipped with this crate.
    pub fn bundled() -> Result<Self> {
        Self::from_file(bundled_path())
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl From<String> for CompilerScript {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl From<&str> for CompilerScript {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl fmt::Debug for CompilerScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerScript")
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Path the bundled compiler script is read from.
pub fn bundled_path() -> PathBuf {
    match std::env::var_os(SCRIPT_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(BUNDLED_SCRIPT),
    }
}

/// Returns the CoffeeScript compiler script used by [`crate::compile`] and
/// friends.
pub fn compiler_script() -> Result<CompilerScript> {
    CompilerScript::bundled()
}
