//! Runtimes driven through an external interpreter process.
//!
//! Each call writes the loaded script plus the requested expression to a
//! temporary file and runs the interpreter on it. Nothing is kept alive
//! between calls, so a context can be shared freely across threads.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tracing::{debug, warn};

use crate::protocol;
use crate::runtime::{Context, Runtime};
use crate::{Error, Result};

/// A JavaScript interpreter found on `PATH`, such as Node.js.
#[derive(Debug, Clone)]
pub struct ExternalRuntime {
    name: String,
    binary: Option<PathBuf>,
}

impl ExternalRuntime {
    /// Look up `command` on `PATH`.
    ///
    /// The runtime is still constructed when the command is missing; it
    /// simply reports itself as unavailable.
    pub fn new(name: impl Into<String>, command: &str) -> Self {
        let binary = which::which(command).ok();
        Self {
            name: name.into(),
            binary,
        }
    }

    /// Use an interpreter at a known location.
    pub fn with_binary(name: impl Into<String>, binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        Self {
            name: name.into(),
            binary: binary.is_file().then_some(binary),
        }
    }

    /// Node.js installed as `node`.
    pub fn node() -> Self {
        Self::new("node", "node")
    }

    /// Node.js installed as `nodejs`, as some Linux distributions do.
    pub fn nodejs() -> Self {
        Self::new("nodejs", "nodejs")
    }

    /// Path of the interpreter, if it was found.
    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }
}

impl Runtime for ExternalRuntime {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn load(&self, source: &str) -> Result<Box<dyn Context>> {
        let binary = self.binary.clone().ok_or_else(|| Error::Unavailable {
            name: self.name.clone(),
        })?;

        let context = ExternalContext {
            name: self.name.clone(),
            binary,
            source: source.to_string(),
        };

        // Run the script once so parse errors surface here, not on first call.
        match context.run("undefined") {
            Ok(_) => Ok(Box::new(context)),
            Err(Error::Program(message)) => Err(Error::Runtime(format!(
                "script failed to load in {}: {}",
                self.name, message
            ))),
            Err(e) => Err(e),
        }
    }
}

struct ExternalContext {
    name: String,
    binary: PathBuf,
    source: String,
}

impl ExternalContext {
    fn run(&self, expression: &str) -> Result<Value> {
        let program = format!(
            "var result = {};\nprocess.stdout.write('\\n' + result + '\\n');\n",
            protocol::envelope(&protocol::program(&self.source, expression))
        );

        let mut file = tempfile::Builder::new()
            .prefix("coffeescript-")
            .suffix(".js")
            .tempfile()?;
        file.write_all(program.as_bytes())?;
        file.flush()?;

        debug!(runtime = %self.name, script = %file.path().display(), "running external runtime");
        let output = Command::new(&self.binary).arg(file.path()).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(runtime = %self.name, status = %output.status, "external runtime failed");
            return Err(Error::Runtime(format!(
                "{} exited with {}: {}",
                self.name,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            Error::Runtime(format!("{} produced output that is not UTF-8: {}", self.name, e))
        })?;
        protocol::decode(&stdout)
    }
}

impl Context for ExternalContext {
    fn call(&self, path: &str, args: &[Value]) -> Result<Value> {
        self.run(&protocol::call_expression(path, args)?)
    }

    fn eval(&self, expression: &str) -> Result<Value> {
        self.run(&protocol::eval_expression(expression)?)
    }
}
