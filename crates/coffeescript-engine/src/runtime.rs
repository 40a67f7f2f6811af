//! The runtime and context traits every backend implements.

use serde_json::Value;

use crate::Result;

/// A JavaScript engine able to load scripts.
///
/// Implementations must be shareable across threads. Whether a single
/// [`Context`] may be entered concurrently is up to the backend.
pub trait Runtime: Send + Sync {
    /// Short name used for selection, e.g. `"node"`.
    fn name(&self) -> &str;

    /// Whether the engine can be used on this machine.
    fn is_available(&self) -> bool;

    /// Load `source` and return a context in which its top-level
    /// definitions are visible.
    ///
    /// Fails with [`Error::Runtime`](crate::Error::Runtime) when the script
    /// cannot be parsed or throws while loading, and with
    /// [`Error::Unavailable`](crate::Error::Unavailable) when the engine is
    /// not installed.
    fn load(&self, source: &str) -> Result<Box<dyn Context>>;

    /// Evaluate a single expression in a fresh, empty context.
    fn eval(&self, expression: &str) -> Result<Value> {
        self.load("")?.eval(expression)
    }
}

/// A script loaded into a [`Runtime`].
pub trait Context: Send + Sync {
    /// Call the function at `path` (a dotted name such as
    /// `"CoffeeScript.compile"`) with JSON arguments.
    ///
    /// Returns `Value::Null` when the function returns `undefined`. A value
    /// thrown by the function is reported as
    /// [`Error::Program`](crate::Error::Program).
    fn call(&self, path: &str, args: &[Value]) -> Result<Value>;

    /// Evaluate an expression against the loaded script.
    fn eval(&self, expression: &str) -> Result<Value>;
}
