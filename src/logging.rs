use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ATLAS_DATAVIZ_LOG";

/// Installs the stderr subscriber. `ATLAS_DATAVIZ_LOG` wins over `RUST_LOG`;
/// without either, `-v` flags pick the level.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
