//! A bridge to the JavaScript CoffeeScript compiler.
//!
//! The compiler itself is a JavaScript program. This crate loads it into a
//! JavaScript runtime once and forwards source text to its `compile` entry
//! point.
//!
//! ```no_run
//! use coffeescript::CompileOptions;
//!
//! let js = coffeescript::compile("add = (a, b) -> a + b", CompileOptions::new().bare(true))?;
//! println!("{}", js);
//! # Ok::<(), coffeescript::Error>(())
//! ```
//!
//! Callers that want their own runtime or compiler build construct a
//! [`Compiler`] directly; the free functions share one process-wide
//! instance built from [`compiler_script`] and [`get_runtime`].
//!
//! # Compiler script
//!
//! The CoffeeScript compiler (`coffee-script.js`, the browser build) does
//! not ship with this crate. The default functions read it from
//! `js/coffee-script.js` in the crate directory, or from the file named by
//! the `COFFEESCRIPT_JS` environment variable ([`SCRIPT_ENV`]). Until one
//! of those exists they fail with [`Error::Io`] naming the missing path.
//! A [`Compiler`] built with [`Compiler::new`] takes the script text
//! directly and has no such requirement.

pub mod compiler;
pub mod default;
pub mod error;
pub mod options;
pub mod script;
pub mod source;

pub use coffeescript_engine::{Context, Runtime};
pub use compiler::{Compiler, DEFAULT_ENCODING};
pub use default::{compile, compile_file, compile_files, default_compiler, get_runtime};
pub use error::{Error, Result};
pub use options::CompileOptions;
pub use script::{compiler_script, CompilerScript, SCRIPT_ENV};
