use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV_VAR: &str = "PENNYDASH_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

static TRACING_INIT: Once = Once::new();

/// Installs the stderr subscriber once. stdout carries command output only.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // a subscriber set elsewhere (tests) wins
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
