use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

static INIT: Once = Once::new();

/// Install the process-wide subscriber (only once).
///
/// `RUST_LOG` overrides `default_filter`. Setting `CONTRACT_LOG_FORMAT=json`
/// switches to flattened JSON events with file and line numbers.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        let json = std::env::var("CONTRACT_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let result = if json {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_test_writer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true)
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_test_writer()
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Tracing subscriber already installed: {}", e);
        }
    });
}
