use k8s_openapi::api::core::v1::Pod as PodObject;

use crate::topology::base::{identity, resolve_self_link, ObjectKind};
use crate::types::{MetricDefinition, MetricSample, Pod, ReportableMetric};

/// URL of the metrics a pod exposes, reached through the API server proxy.
pub fn metrics_endpoint_for(base_url: &str, self_link: &str) -> String {
    format!("{}{}/proxy/metrics", base_url, self_link)
}

/// Map a pod detail object. `fetched_link` is the path the object was read
/// from and stands in when the object carries no usable self-link.
pub fn pod_from_object(obj: &PodObject, base_url: &str, fetched_link: &str) -> Result<Pod, &'static str> {
    let (id, name) = identity(&obj.metadata)?;
    let self_link = resolve_self_link(ObjectKind::Pod, &obj.metadata)
        .unwrap_or_else(|| fetched_link.to_string());
    let node_name = obj
        .spec
        .as_ref()
        .and_then(|s| s.node_name.clone())
        .filter(|n| !n.is_empty());

    Ok(Pod {
        id,
        name,
        metrics_endpoint: metrics_endpoint_for(base_url, &self_link),
        self_link,
        node_name,
        metrics: Vec::new(),
    })
}

/// Keep the samples whose key is in the catalogue, tagged with their definition.
pub fn select_metrics(samples: &[MetricSample], definitions: &[MetricDefinition]) -> Vec<ReportableMetric> {
    samples
        .iter()
        .flat_map(|sample| {
            definitions
                .iter()
                .filter(move |d| d.key == sample.key)
                .map(move |d| ReportableMetric::from_sample(sample, d))
        })
        .collect()
}
