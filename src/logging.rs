use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "debug,hyper=warn,hyper_util=warn,reqwest=warn"
    } else {
        "info,hyper=warn,reqwest=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout stays clean; the badge goes to a file, diagnostics to stderr.
    let console_layer = fmt::layer()
        .with_target(verbose)
        .with_thread_ids(verbose)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();

    tracing::debug!("steam-widget version: {}", env!("CARGO_PKG_VERSION"));
}
