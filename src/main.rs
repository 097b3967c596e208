use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kube_topology_reporter::{load_config, run_cycle, DryRunSink, JsonLinesSink};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(false);
            error!("Configuration error, nothing reported: {}", e);
            return Err(e.into());
        }
    };
    init_tracing(cfg.debug_enabled);
    info!(
        "cluster = {} url = {} metrics = {} dev = {}",
        cfg.id,
        cfg.url,
        cfg.metric_definitions.len(),
        cfg.dev_mode
    );

    let outcome = if cfg.dev_mode {
        run_cycle(&cfg, &mut DryRunSink).await
    } else {
        let mut sink = JsonLinesSink::new(std::io::stdout().lock());
        run_cycle(&cfg, &mut sink).await
    };
    let summary = outcome.context("Failed to start reporting cycle")?;

    info!(
        "Cycle summary: {} elements, {} metrics reported",
        summary.elements,
        summary.total_metrics()
    );
    Ok(())
}

fn init_tracing(debug: bool) {
    // RUST_LOG takes precedence over the DEBUG switch.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Without DEBUG only warnings and errors are written.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "info,kube_topology_reporter=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_follows_debug_switch() {
        assert_eq!(default_filter(false), "warn");
        assert!(default_filter(true).contains("kube_topology_reporter=debug"));
    }
}
