pub mod derived;
pub mod ownership;

use tracing::{debug, info, warn};

use crate::error::SinkError;
use crate::sink::{ElementHandle, TopologySink};
use crate::types::*;

pub use derived::derive_element_metrics;
pub use ownership::is_reportable;

/// Counts of what one report pass handed to the sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub elements: usize,
    pub properties: usize,
    pub metrics: usize,
    pub derived_metrics: usize,
    pub sink_failures: usize,
}

impl ReportSummary {
    pub fn total_metrics(&self) -> usize {
        self.metrics + self.derived_metrics
    }

    pub fn has_failures(&self) -> bool {
        self.sink_failures > 0
    }
}

/// Walks a snapshot and sends it to a sink: one group for the cluster, one
/// element per node, pod metrics attributed to the node they belong to.
pub struct TopologyReporter<'a, S: TopologySink> {
    sink: &'a mut S,
    summary: ReportSummary,
}

impl<'a, S: TopologySink> TopologyReporter<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            summary: ReportSummary::default(),
        }
    }

    /// Sink errors are logged and counted, never returned.
    pub fn report(mut self, snapshot: &ClusterSnapshot) -> ReportSummary {
        let cluster = &snapshot.cluster;
        let group = match self.sink.create_group(&cluster.id, &cluster.display_name) {
            Ok(group) => group,
            Err(e) => {
                warn!("Cannot create group {}: {}", cluster.id, e);
                self.summary.sink_failures += 1;
                return self.summary;
            }
        };

        for node in &snapshot.nodes {
            debug!("Element {} ({}) external IP {}", node.element_name(), node.id, node.external_ip);
            let element = match self.sink.create_element(&group, &node.id, &node.element_name()) {
                Ok(element) => element,
                Err(e) => {
                    warn!("Cannot create element for node {}: {}", node.name, e);
                    self.summary.sink_failures += 1;
                    continue;
                }
            };
            self.summary.elements += 1;

            for (name, value) in node.properties() {
                let result = self.sink.report_property(&element, name, value);
                if self.record(result, "property", name) {
                    self.summary.properties += 1;
                }
            }

            let reported = self.report_pod_metrics(&element, node, &snapshot.pods);
            for metric in derive_element_metrics(&reported) {
                if self.send_metric(&element, &metric) {
                    self.summary.derived_metrics += 1;
                }
            }
        }

        info!(
            "Reported {} elements, {} metrics, {} derived metrics ({} sink failures)",
            self.summary.elements, self.summary.metrics, self.summary.derived_metrics, self.summary.sink_failures
        );
        self.summary
    }

    /// Send every pod metric that belongs on `node`; returns what was sent.
    fn report_pod_metrics(&mut self, element: &ElementHandle, node: &Node, pods: &[Pod]) -> Vec<ReportableMetric> {
        let mut reported = Vec::new();
        for pod in pods {
            for metric in &pod.metrics {
                if !is_reportable(metric, &node.name, &pod.name, pods) {
                    continue;
                }
                if self.send_metric(element, metric) {
                    self.summary.metrics += 1;
                    reported.push(metric.clone());
                }
            }
        }
        reported
    }

    fn send_metric(&mut self, element: &ElementHandle, metric: &ReportableMetric) -> bool {
        let result = if metric.is_relative {
            self.sink.report_relative_metric(element, &metric.key, &metric.value, &metric.dimensions)
        } else {
            self.sink.report_absolute_metric(element, &metric.key, &metric.value, &metric.dimensions)
        };
        self.record(result, "metric", &metric.key)
    }

    fn record(&mut self, result: Result<(), SinkError>, what: &str, name: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("Cannot report {} {}: {}", what, name, e);
                self.summary.sink_failures += 1;
                false
            }
        }
    }
}

/// Report `snapshot` into `sink`.
pub fn report_topology<S: TopologySink>(sink: &mut S, snapshot: &ClusterSnapshot) -> ReportSummary {
    TopologyReporter::new(sink).report(snapshot)
}
