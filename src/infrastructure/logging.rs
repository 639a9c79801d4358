//! Logging initialization
//!
//! Console tracing setup for binaries and tests embedding this crate. The
//! filter comes from `RUST_LOG` with a sane default; initialization is
//! idempotent so tests can call it freely.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,priceguard=debug";

/// Install the global tracing subscriber once. Later calls are no-ops.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // try_init: another subscriber may already be installed by the host
        // application; that is fine.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
