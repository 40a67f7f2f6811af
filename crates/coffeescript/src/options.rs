/// Options passed through to the compiler

use serde::{Deserialize, Serialize};

/// Options for a single compilation.
///
/// Serialized as the options object handed to `CoffeeScript.compile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Omit the top-level function safety wrapper, like `coffee --bare`.
    pub bare: bool,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bare mode
    pub fn bare(mut self, bare: bool) -> Self {
        self.bare = bare;
        self
    }
}
