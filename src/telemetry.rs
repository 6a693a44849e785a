//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Variable holding the log filter, e.g. `AUDIOGRAM_LOG=audiogram=debug`.
pub const ENV_LOG: &str = "AUDIOGRAM_LOG";

const DEFAULT_FILTER: &str = "audiogram=info,audiogram_form=info";

/// Installs the global subscriber. Falls back to `DEFAULT_FILTER` when
/// `AUDIOGRAM_LOG` is unset or invalid. Calling it again is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}
