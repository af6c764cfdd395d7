//! Shared test utilities for the value graph and builder.
//!
//! Only compiled in test builds.

use std::sync::Once;

use crate::FieldAccessChain;

static TRACING_INIT: Once = Once::new();

/// Route `tracing` output to the test harness.
///
/// Safe to call from every test. Enable with `RUST_LOG=lumen_ir=trace`.
pub(crate) fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}

/// Shorthand for `FieldAccessChain::new(indices)`.
pub(crate) fn chain(indices: &[u32]) -> FieldAccessChain {
    FieldAccessChain::new(indices)
}
