use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Filter used when neither `RUST_LOG` nor `--log` is given. Transport
/// errors are already logged once by the transport, so reqwest stays quiet.
pub const DEFAULT_FILTER: &str = "info,catalogo=info,reqwest=warn,hyper=warn";

/// Sets up the global tracing subscriber with a fmt formatter and env filter.
///
/// Precedence: `RUST_LOG`, then the caller's explicit filter, then
/// [`DEFAULT_FILTER`].
pub fn init_tracing(explicit_filter: Option<&str>) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(explicit_filter.unwrap_or(DEFAULT_FILTER)))
        .map_err(|e| anyhow::anyhow!("invalid log filter: {}", e))?;

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
