//! Shared helpers for the CoffeeScript bridge integration tests.
//!
//! - [`CountingRuntime`] stands in for a JavaScript runtime and counts how
//!   often the compiler script is loaded and called
//! - [`fixture_script`] is a tiny JavaScript compiler for the subset of
//!   CoffeeScript the tests use, runnable under Node.js
//! - [`node`] returns Node.js when it is installed

#![allow(dead_code)]

use std::io::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use coffeescript::{CompilerScript, Context, Runtime};
use coffeescript_engine::{Error, ExternalRuntime, Value};
use tracing_subscriber::EnvFilter;

pub const FIXTURE_SCRIPT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/coffee-fixture.js");

/// Install a log subscriber honoring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn fixture_script() -> CompilerScript {
    CompilerScript::from_file(FIXTURE_SCRIPT).expect("fixture compiler script")
}

/// Node.js, or `None` when it is not installed on this machine
pub fn node() -> Option<ExternalRuntime> {
    let runtime = ExternalRuntime::node();
    if runtime.is_available() {
        Some(runtime)
    } else {
        eprintln!("node is not installed, skipping");
        None
    }
}

/// Write `bytes` to a fresh temporary file
pub fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".coffee")
        .tempfile()
        .expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file
}

/// Load and call counters shared between a test and its runtime
#[derive(Debug, Clone, Default)]
pub struct Counters {
    loads: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
}

impl Counters {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A runtime that "compiles" without any JavaScript.
///
/// Loading fails unless the script mentions `CoffeeScript`. Bare output is
/// the source behind a marker comment; wrapped output puts it inside a
/// safety wrapper. A line ending in `->` is a syntax error.
pub struct CountingRuntime {
    counters: Counters,
}

impl CountingRuntime {
    pub fn new() -> (Self, Counters) {
        let counters = Counters::default();
        (
            Self {
                counters: counters.clone(),
            },
            counters,
        )
    }

    pub fn boxed() -> (Box<dyn Runtime>, Counters) {
        let (runtime, counters) = Self::new();
        (Box::new(runtime), counters)
    }
}

impl Runtime for CountingRuntime {
    fn name(&self) -> &str {
        "counting"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn load(&self, source: &str) -> coffeescript_engine::Result<Box<dyn Context>> {
        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        if !source.contains("CoffeeScript") {
            return Err(Error::Runtime(
                "ReferenceError: CoffeeScript is not defined".to_string(),
            ));
        }
        Ok(Box::new(CountingContext {
            counters: self.counters.clone(),
        }))
    }
}

struct CountingContext {
    counters: Counters,
}

impl Context for CountingContext {
    fn call(&self, path: &str, args: &[Value]) -> coffeescript_engine::Result<Value> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        if path != "CoffeeScript.compile" {
            return Err(Error::Program(format!("TypeError: {} is not a function", path)));
        }

        let source = args[0].as_str().unwrap_or_default();
        let bare = args[1]["bare"].as_bool().unwrap_or(false);

        if let Some(lineno) = source.lines().position(|line| line.trim_end().ends_with("->")) {
            return Err(Error::Program(format!(
                "SyntaxError: [stdin]:{}: unexpected end of input",
                lineno + 1
            )));
        }

        let output = if bare {
            format!("// bare\n{}", source)
        } else {
            format!("(function() {{\n{}\n}}).call(this);\n", source)
        };
        Ok(Value::String(output))
    }

    fn eval(&self, expression: &str) -> coffeescript_engine::Result<Value> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Program(format!("ReferenceError: {} is not defined", expression)))
    }
}

/// A runtime that is never installed
pub struct MissingRuntime;

impl Runtime for MissingRuntime {
    fn name(&self) -> &str {
        "missing"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn load(&self, _source: &str) -> coffeescript_engine::Result<Box<dyn Context>> {
        Err(Error::Unavailable {
            name: "missing".to_string(),
        })
    }
}
