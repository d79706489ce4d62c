use tracing_subscriber::{fmt, EnvFilter};

/// Installs the fmt subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,site_interactions=debug"));

    if fmt().with_env_filter(filter).with_target(false).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
