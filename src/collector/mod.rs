use k8s_openapi::api::core::v1::{Pod as PodObject, Service as ServiceObject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::kubernetes::KubeApiClient;
use crate::parsing::parse_exposition;
use crate::topology::base::{resolve_self_link, ObjectKind, ObjectList};
use crate::topology::{node_from_object, pod_from_object, select_metrics, service_from_object, NodeObject};
use crate::types::*;

/// Walks the cluster API and builds the snapshot for one cycle.
///
/// Failures are contained per resource: a collection that cannot be listed
/// yields an empty list, a service or pod detail that cannot be read is skipped, and a
/// metrics endpoint that cannot be read yields no metrics for that pod.
pub struct TopologyCollector<'a> {
    client: &'a KubeApiClient,
    config: &'a Config,
}

impl<'a> TopologyCollector<'a> {
    pub fn new(client: &'a KubeApiClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    pub async fn discover(&self) -> ClusterSnapshot {
        let cluster = Cluster::new(&self.config.id, &self.config.url);
        let nodes = self.collect_nodes().await;
        let services = self.collect_services().await;
        let pods = self.collect_pods().await;

        info!(
            "Discovered {} nodes, {} services, {} pods in {}",
            nodes.len(),
            services.len(),
            pods.len(),
            cluster.display_name
        );

        ClusterSnapshot {
            cluster,
            nodes,
            services,
            pods,
        }
    }

    /// A node whose detail cannot be read is still kept, built from its list
    /// entry with every status field left empty.
    pub async fn collect_nodes(&self) -> Vec<Node> {
        let mut nodes = Vec::new();
        for (link, listed) in self.list_entries(ObjectKind::Node).await {
            let obj: NodeObject = match self.client.get_json(&link).await {
                Ok(obj) => obj,
                Err(e) => {
                    warn!("Node detail {} unavailable, using list entry: {}", link, e);
                    NodeObject { metadata: listed, status: None }
                }
            };
            match node_from_object(obj) {
                Ok(node) => nodes.push(node),
                Err(field) => warn!("Skipping node {}: missing {}", link, field),
            }
        }
        nodes
    }

    pub async fn collect_services(&self) -> Vec<Service> {
        let mut services = Vec::new();
        for link in self.list_links(ObjectKind::Service).await {
            let obj: ServiceObject = match self.client.get_json(&link).await {
                Ok(obj) => obj,
                Err(e) => {
                    warn!("Skipping service {}: {}", link, e);
                    continue;
                }
            };
            match service_from_object(&obj, &link) {
                Ok(service) => services.push(service),
                Err(field) => warn!("Skipping service {}: missing {}", link, field),
            }
        }
        services
    }

    /// Pods are mapped and their metrics fetched in the same pass.
    pub async fn collect_pods(&self) -> Vec<Pod> {
        let mut pods = Vec::new();
        for link in self.list_links(ObjectKind::Pod).await {
            let obj: PodObject = match self.client.get_json(&link).await {
                Ok(obj) => obj,
                Err(e) => {
                    warn!("Skipping pod {}: {}", link, e);
                    continue;
                }
            };
            let mut pod = match pod_from_object(&obj, self.client.base_url(), &link) {
                Ok(pod) => pod,
                Err(field) => {
                    warn!("Skipping pod {}: missing {}", link, field);
                    continue;
                }
            };
            pod.metrics = self.metrics_for(&pod).await;
            pods.push(pod);
        }
        pods
    }

    /// Catalogue metrics exposed by `pod`; empty when the endpoint is unreachable.
    pub async fn metrics_for(&self, pod: &Pod) -> Vec<ReportableMetric> {
        match self.client.fetch(&pod.metrics_endpoint).await {
            Ok(text) => {
                let samples = parse_exposition(&text);
                let metrics = select_metrics(&samples, &self.config.metric_definitions);
                debug!(
                    "Pod {}: {} samples parsed, {} in catalogue",
                    pod.name,
                    samples.len(),
                    metrics.len()
                );
                metrics
            }
            Err(e) => {
                debug!("No metrics for pod {}: {}", pod.name, e);
                Vec::new()
            }
        }
    }

    async fn list_links(&self, kind: ObjectKind) -> Vec<String> {
        self.list_entries(kind).await.into_iter().map(|(link, _)| link).collect()
    }

    /// Detail path and list metadata of every object in a collection.
    async fn list_entries(&self, kind: ObjectKind) -> Vec<(String, ObjectMeta)> {
        let path = kind.collection_path();
        let list: Result<ObjectList, FetchError> = self.client.get_json(path).await;
        match list {
            Ok(list) => list
                .items
                .into_iter()
                .filter_map(|item| resolve_self_link(kind, &item.metadata).map(|link| (link, item.metadata)))
                .collect(),
            Err(e) => {
                warn!("Cannot list {}: {}", path, e);
                Vec::new()
            }
        }
    }
}
