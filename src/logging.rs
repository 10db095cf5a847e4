//! Process-wide logging setup applied as a constructor side effect.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::types::LogLevel;

static INIT: Once = Once::new();

/// Install a `tracing` subscriber at the requested default verbosity.
///
/// `RUST_LOG` still wins when set. Only the first call in the process takes
/// effect; later binders (and host applications that installed their own
/// subscriber) keep whatever is already active.
pub(crate) fn init(level: LogLevel) {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(level.as_filter().into())
            .from_env_lossy();
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}
