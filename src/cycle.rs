use std::time::Instant;
use tracing::info;

use crate::collector::TopologyCollector;
use crate::error::FetchError;
use crate::kubernetes::KubeApiClient;
use crate::report::{report_topology, ReportSummary};
use crate::sink::TopologySink;
use crate::types::Config;

/// One discovery + report pass. Only failing to build the HTTP client is an
/// error; everything downstream degrades to partial data.
pub async fn run_cycle<S: TopologySink>(config: &Config, sink: &mut S) -> Result<ReportSummary, FetchError> {
    let started = Instant::now();
    let client = KubeApiClient::new(config)?;

    let snapshot = TopologyCollector::new(&client, config).discover().await;
    let summary = report_topology(sink, &snapshot);

    info!("Cycle for {} finished in {:.2?}", snapshot.cluster.display_name, started.elapsed());
    Ok(summary)
}
