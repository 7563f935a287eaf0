use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "music_search_api=info,rocket=warn,warn";

static TELEMETRY_INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` overrides the filter and
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init() {
    TELEMETRY_INIT.call_once(|| {
        if let Err(err) = tracing_log::LogTracer::init() {
            eprintln!("failed to set log tracer: {err}");
        }

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let init_result = if json_output() {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer())
                .try_init()
        };

        if let Err(err) = init_result {
            eprintln!("failed to initialize tracing subscriber: {err}");
        }
    });
}

fn json_output() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
