use time::format_description;
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber};

const TRACE_ENV_VAR: &str = "TRACE";

// Sets up tracing. Goes to stderr, filtered by TRACE env var.
// Levels are: trace, debug, info, warn, error
//
// EnvFilter has a standard syntax, but basically can be boiled down to (for example):
//
// All targets, info level:               info
// Lot csv io only, debug level:          lotbook::lots::io=debug
// Global at warn, lot csv io as debug:   warn,lotbook::lots::io=debug
//
// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn setup_tracing() {
    // 5 digits of sub-second precision is plenty here.
    let time_format =
        match format_description::parse("[hour]:[minute]:[second].[subsecond digits:5]") {
            Ok(f) => f,
            Err(_) => return,
        };

    let time_offset = crate::util::date::local_utc_offset()
        .unwrap_or(time::UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(time_offset, time_format);

    // Off by default, unless TRACE is set.
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_env(TRACE_ENV_VAR))
        .with_timer(timer)
        .finish();

    // Tests call this repeatedly. Only the first one wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn enable_trace_env(trace_env: &str) {
    if let Ok(existing_env) = std::env::var(TRACE_ENV_VAR) {
        std::env::set_var(TRACE_ENV_VAR, existing_env + "," + trace_env);
    } else {
        std::env::set_var(TRACE_ENV_VAR, trace_env);
    }
}
