use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn init_observability(component: &str) -> Result<()> {
    // RUST_LOG wins; otherwise info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    let environment = std::env::var("STAGE")
        .ok()
        .filter(|stage| !stage.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    info!(component, environment = %environment, "Observability initialized");

    Ok(())
}
