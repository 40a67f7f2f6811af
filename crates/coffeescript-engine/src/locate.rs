//! Discovery of the JavaScript runtimes installed on this machine.

use tracing::{debug, info};

use crate::external::ExternalRuntime;
#[cfg(feature = "quickjs")]
use crate::quickjs::QuickJsRuntime;
use crate::runtime::Runtime;
use crate::{Error, Result};

/// Environment variable naming the runtime [`get`] must use.
pub const RUNTIME_ENV: &str = "COFFEESCRIPT_RUNTIME";

/// Every runtime this crate knows about, most preferred first, whether or
/// not it is installed.
pub fn runtimes() -> Vec<Box<dyn Runtime>> {
    #[allow(unused_mut)]
    let mut runtimes: Vec<Box<dyn Runtime>> = vec![
        Box::new(ExternalRuntime::node()),
        Box::new(ExternalRuntime::nodejs()),
    ];
    #[cfg(feature = "quickjs")]
    runtimes.push(Box::new(QuickJsRuntime::new()));
    runtimes
}

/// The installed runtimes, most preferred first.
pub fn available_runtimes() -> Vec<Box<dyn Runtime>> {
    runtimes()
        .into_iter()
        .filter(|runtime| runtime.is_available())
        .collect()
}

/// Find a known runtime by name, installed or not.
pub fn runtime_by_name(name: &str) -> Option<Box<dyn Runtime>> {
    runtimes().into_iter().find(|runtime| runtime.name() == name)
}

/// The runtime to use by default.
///
/// Honors [`RUNTIME_ENV`] when it is set, failing if the named runtime is
/// unknown or not installed. Otherwise returns the most preferred installed
/// runtime.
pub fn get() -> Result<Box<dyn Runtime>> {
    if let Some(name) = std::env::var(RUNTIME_ENV).ok().filter(|name| !name.is_empty()) {
        debug!(runtime = %name, "runtime selected through {}", RUNTIME_ENV);
        return runtime_by_name(&name)
            .filter(|runtime| runtime.is_available())
            .ok_or(Error::Unavailable { name });
    }

    let runtime = available_runtimes()
        .into_iter()
        .next()
        .ok_or(Error::NoRuntime)?;
    info!(runtime = runtime.name(), "using JavaScript runtime");
    Ok(runtime)
}
