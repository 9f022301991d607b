//! Tracing setup for the `sprouts` binary.
//!
//! - `SPROUTS_LOG` holds the filter (e.g. `debug` or `info,sprouts_engine=trace`).
//! - `SPROUTS_LOG_FORMAT=json` switches to structured JSON lines.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPROUTS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match std::env::var("SPROUTS_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
