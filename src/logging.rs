use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// `RUST_LOG` wins over the configured level. Verbose mode turns on debug
/// output for this crate.
pub fn init_logger(settings: &LoggingSettings, verbose: bool) {
    let default_filter = if verbose {
        format!("weswings_menu=debug,{}", settings.level)
    } else {
        settings.level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    if settings.json {
        registry.with(fmt.json()).init();
    } else {
        registry.with(fmt.compact()).init();
    }
}
