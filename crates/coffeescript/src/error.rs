/// Error types for the CoffeeScript bridge

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The JavaScript runtime is missing, could not load the compiler, or
    /// failed for reasons unrelated to the source being compiled.
    #[error("JavaScript engine error: {0}")]
    Engine(String),

    /// The compiler ran and rejected the source. Carries its diagnostic.
    #[error("{0}")]
    Compilation(String),

    /// A file's bytes are not valid in the declared encoding.
    #[error("{path}: content is not valid {encoding}")]
    Decode { path: PathBuf, encoding: String },

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The source handed to the compiler is wrong.
    pub fn is_compilation_error(&self) -> bool {
        matches!(self, Error::Compilation(_))
    }

    /// The JavaScript runtime is unusable.
    pub fn is_engine_error(&self) -> bool {
        matches!(self, Error::Engine(_))
    }

    /// A source file could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}

impl From<coffeescript_engine::Error> for Error {
    fn from(err: coffeescript_engine::Error) -> Self {
        match err {
            coffeescript_engine::Error::Program(message) => Error::Compilation(message),
            other => Error::Engine(other.to_string()),
        }
    }
}
