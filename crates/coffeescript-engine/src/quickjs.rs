//! Embedded QuickJS runtime.
//!
//! The script is evaluated once in its own QuickJS context and stays
//! resident, so calls do not pay for re-parsing it. QuickJS serializes
//! access to a context internally; concurrent calls queue on that lock.

use rquickjs::CatchResultExt;
use serde_json::Value;
use tracing::debug;

use crate::protocol;
use crate::runtime::{Context, Runtime};
use crate::{Error, Result};

/// In-process JavaScript runtime backed by QuickJS.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickJsRuntime;

impl QuickJsRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl Runtime for QuickJsRuntime {
    fn name(&self) -> &str {
        "quickjs"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn load(&self, source: &str) -> Result<Box<dyn Context>> {
        let runtime = rquickjs::Runtime::new().map_err(|e| Error::Runtime(e.to_string()))?;
        let context =
            rquickjs::Context::full(&runtime).map_err(|e| Error::Runtime(e.to_string()))?;

        debug!(bytes = source.len(), "loading script into quickjs");
        context.with(|ctx| {
            ctx.eval::<(), _>(source)
                .catch(&ctx)
                .map_err(|e| Error::Runtime(format!("script failed to load in quickjs: {e}")))
        })?;

        Ok(Box::new(QuickJsContext {
            _runtime: runtime,
            context,
        }))
    }
}

struct QuickJsContext {
    // Kept alive for the context's lifetime.
    _runtime: rquickjs::Runtime,
    context: rquickjs::Context,
}

impl QuickJsContext {
    fn run(&self, expression: &str) -> Result<Value> {
        let code = protocol::envelope(&format!("return {expression};"));
        let output = self.context.with(|ctx| {
            ctx.eval::<String, _>(code)
                .catch(&ctx)
                .map_err(|e| Error::Runtime(e.to_string()))
        })?;
        protocol::decode(&output)
    }
}

impl Context for QuickJsContext {
    fn call(&self, path: &str, args: &[Value]) -> Result<Value> {
        self.run(&protocol::call_expression(path, args)?)
    }

    fn eval(&self, expression: &str) -> Result<Value> {
        // Indirect eval: the script's definitions live in the global scope.
        self.run(&format!("(0, eval)({})", serde_json::to_string(expression)?))
    }
}
