//! Error types for JavaScript runtimes.

use thiserror::Error;

/// Errors raised while loading or running JavaScript.
#[derive(Debug, Error)]
pub enum Error {
    /// The runtime itself failed: it could not start, could not parse the
    /// loaded script, or produced output we could not understand.
    #[error("{0}")]
    Runtime(String),

    /// The JavaScript program ran and threw. Carries the thrown value as text.
    #[error("{0}")]
    Program(String),

    /// A runtime was requested by name but is not installed.
    #[error("JavaScript runtime `{name}` is not available")]
    Unavailable { name: String },

    /// No runtime at all could be found on this machine.
    #[error("could not find a JavaScript runtime")]
    NoRuntime,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the error was thrown by the JavaScript program rather than
    /// raised by the runtime hosting it.
    pub fn is_program_error(&self) -> bool {
        matches!(self, Error::Program(_))
    }
}
