//! JavaScript runtimes for hosting the CoffeeScript compiler.
//!
//! A [`Runtime`] loads a script and hands back a [`Context`] that can call
//! functions defined by that script. Values cross the boundary as JSON.
//! [`get`] picks the preferred runtime installed on this machine.

mod error;
mod external;
mod locate;
mod protocol;
#[cfg(feature = "quickjs")]
mod quickjs;
mod runtime;

pub use error::Error;
pub use external::ExternalRuntime;
pub use locate::{available_runtimes, get, runtime_by_name, runtimes, RUNTIME_ENV};
#[cfg(feature = "quickjs")]
pub use quickjs::QuickJsRuntime;
pub use runtime::{Context, Runtime};
pub use serde_json::Value;

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
