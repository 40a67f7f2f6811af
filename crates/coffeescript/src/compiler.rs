//! CoffeeScript compiler wrapper
//!
//! Loads the compiler script into a JavaScript runtime on first use and
//! keeps the resulting context for every later compilation.

use std::path::Path;

use coffeescript_engine::{Context, Runtime, Value};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::options::CompileOptions;
use crate::script::CompilerScript;
use crate::source;

/// Entry point of the compiler script
const COMPILE_FUNCTION: &str = "CoffeeScript.compile";

/// Default encoding for source files
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Runs a CoffeeScript compiler script inside a JavaScript runtime.
///
/// The script is loaded lazily, at most once per `Compiler`. Concurrent
/// first calls race for the load; exactly one context wins and is shared
/// from then on. Calls against the loaded context are not serialized here,
/// so their thread safety is that of the runtime's context.
pub struct Compiler {
    script: CompilerScript,
    runtime: Box<dyn Runtime>,
    /// Set once, on the first successful load
    context: OnceCell<Box<dyn Context>>,
}

impl Compiler {
    /// Create a compiler that will load `script` into `runtime`.
    pub fn new(script: impl Into<CompilerScript>, runtime: Box<dyn Runtime>) -> Self {
        Self {
            script: script.into(),
            runtime,
            context: OnceCell::new(),
        }
    }

    pub fn script(&self) -> &CompilerScript {
        &self.script
    }

    pub fn runtime(&self) -> &dyn Runtime {
        &*self.runtime
    }

    /// Whether the compiler script has been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.context.get().is_some()
    }

    /// Compile CoffeeScript source to JavaScript.
    ///
    /// With `options.bare`, the output is not wrapped in the top-level
    /// function safety wrapper (like `coffee --bare`). The compiler's output
    /// is returned untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::Engine`] if the runtime cannot load the compiler script
    /// - [`Error::Compilation`] if the compiler rejects `source`
    pub fn compile(&self, source: &str, options: CompileOptions) -> Result<String> {
        let context = self.context()?;

        debug!(bytes = source.len(), bare = options.bare, "compiling CoffeeScript");
        let options = serde_json::to_value(options).map_err(|e| Error::Engine(e.to_string()))?;
        let output = context.call(COMPILE_FUNCTION, &[Value::String(source.to_string()), options])?;

        match output {
            Value::String(javascript) => Ok(javascript),
            other => Err(Error::Engine(format!(
                "{} returned {} instead of a string",
                COMPILE_FUNCTION, other
            ))),
        }
    }

    /// Compile a CoffeeScript file.
    pub fn compile_file(
        &self,
        path: impl AsRef<Path>,
        encoding: &str,
        options: CompileOptions,
    ) -> Result<String> {
        self.compile_files([path], encoding, options)
    }

    /// Compile several CoffeeScript files as one program.
    ///
    /// The files are read in order with the same `encoding` and joined with
    /// a blank line between each. Nothing is compiled unless every file
    /// decodes.
    pub fn compile_files<I, P>(
        &self,
        paths: I,
        encoding: &str,
        options: CompileOptions,
    ) -> Result<String>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let source = source::read_sources(paths, encoding)?;
        self.compile(&source, options)
    }

    fn context(&self) -> Result<&dyn Context> {
        let context = self.context.get_or_try_init(|| {
            info!(
                runtime = self.runtime.name(),
                bytes = self.script.as_str().len(),
                "loading CoffeeScript compiler"
            );
            // Anything thrown while loading the compiler is an engine error.
            self.runtime
                .load(self.script.as_str())
                .map_err(|e| Error::Engine(e.to_string()))
        })?;
        Ok(&**context)
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("script", &self.script)
            .field("runtime", &self.runtime.name())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
