//! The process-wide default compiler.
//!
//! Built on first use from [`compiler_script`] and [`get_runtime`], then
//! kept for the life of the process. A failed build is not cached, so a
//! later call tries again.

use std::path::Path;

use coffeescript_engine::Runtime;
use once_cell::sync::OnceCell;
use tracing::info;

use crate::compiler::Compiler;
use crate::error::Result;
use crate::options::CompileOptions;
use crate::script::compiler_script;

static DEFAULT_COMPILER: OnceCell<Compiler> = OnceCell::new();

/// Returns the runtime the default compiler uses: the one named by
/// `COFFEESCRIPT_RUNTIME`, or else the most preferred installed runtime.
pub fn get_runtime() -> Result<Box<dyn Runtime>> {
    Ok(coffeescript_engine::get()?)
}

/// The shared compiler behind [`compile`], [`compile_file`] and
/// [`compile_files`].
pub fn default_compiler() -> Result<&'static Compiler> {
    DEFAULT_COMPILER.get_or_try_init(|| {
        let script = compiler_script()?;
        let runtime = get_runtime()?;
        info!(runtime = runtime.name(), "created default CoffeeScript compiler");
        Ok(Compiler::new(script, runtime))
    })
}

/// Compile CoffeeScript source with the default compiler.
///
/// See [`Compiler::compile`].
pub fn compile(source: &str, options: CompileOptions) -> Result<String> {
    default_compiler()?.compile(source, options)
}

/// Compile a CoffeeScript file with the default compiler.
pub fn compile_file(
    path: impl AsRef<Path>,
    encoding: &str,
    options: CompileOptions,
) -> Result<String> {
    default_compiler()?.compile_file(path, encoding, options)
}

/// Compile several CoffeeScript files as one program with the default
/// compiler.
///
/// See [`Compiler::compile_files`].
pub fn compile_files<I, P>(paths: I, encoding: &str, options: CompileOptions) -> Result<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    default_compiler()?.compile_files(paths, encoding, options)
}
