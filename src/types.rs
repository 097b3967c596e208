use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dimension set attached to a sample, keyed by label name.
pub type Dimensions = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Config {
    pub id: String,
    pub url: String,
    pub token: String,
    pub debug_enabled: bool,
    pub dev_mode: bool,
    pub metric_definitions: Vec<MetricDefinition>,
}

/// A metric the operator wants reported, as declared in the plugin descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDefinition {
    pub key: String,
    pub dimension_names: Vec<String>,
    pub source_type: String,
    pub is_relative: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: String,
    pub url: String,
    pub display_name: String,
}

impl Cluster {
    pub fn new(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            display_name: format!("{} ({})", id, url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub role: String,
    pub external_ip: String,
    pub instance_type: String,
    pub hostname: String,
    pub creation_timestamp: String,
    pub machine_id: String,
    pub system_uuid: String,
    pub boot_id: String,
    pub kernel_version: String,
    pub os_image: String,
    pub container_runtime_version: String,
    pub kubelet_version: String,
    pub kube_proxy_version: String,
    pub operating_system: String,
    pub architecture: String,
}

impl Node {
    /// Name of the topology element created for this node.
    pub fn element_name(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }

    /// Static properties attached to the node's element, in reporting order.
    pub fn properties(&self) -> [(&'static str, &str); 13] {
        [
            ("node_instance_type", self.instance_type.as_str()),
            ("node_hostname", self.hostname.as_str()),
            ("node_creation_timestamp", self.creation_timestamp.as_str()),
            ("node_info_machine_id", self.machine_id.as_str()),
            ("node_info_system_uuid", self.system_uuid.as_str()),
            ("node_info_boot_id", self.boot_id.as_str()),
            ("node_info_kernel_version", self.kernel_version.as_str()),
            ("node_info_os_image", self.os_image.as_str()),
            ("node_info_container_runtime_version", self.container_runtime_version.as_str()),
            ("node_info_kubelet_version", self.kubelet_version.as_str()),
            ("node_info_kube_proxy_version", self.kube_proxy_version.as_str()),
            ("node_info_operating_system", self.operating_system.as_str()),
            ("node_info_architecture", self.architecture.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: String,
    pub self_link: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pod {
    pub id: String,
    pub name: String,
    pub self_link: String,
    /// Unset until the scheduler has placed the pod.
    pub node_name: Option<String>,
    pub metrics_endpoint: String,
    /// Samples from the pod's metrics endpoint that matched the catalogue.
    pub metrics: Vec<ReportableMetric>,
}

impl Pod {
    pub fn is_scheduled_on(&self, node_name: &str) -> bool {
        self.node_name.as_deref() == Some(node_name)
    }
}

/// Everything discovered in one cycle. Built once, then only read.
#[derive(Debug, Clone)]
pub struct ClusterSnapshot {
    pub cluster: Cluster,
    pub nodes: Vec<Node>,
    pub services: Vec<Service>,
    pub pods: Vec<Pod>,
}

/// One line of exposition text, untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    pub key: String,
    pub dimensions: Dimensions,
    pub raw_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportableMetric {
    pub key: String,
    pub source_type: String,
    pub is_relative: bool,
    pub dimensions: Dimensions,
    pub value: String,
}

impl ReportableMetric {
    pub fn from_sample(sample: &MetricSample, definition: &MetricDefinition) -> Self {
        Self {
            key: definition.key.clone(),
            source_type: definition.source_type.clone(),
            is_relative: definition.is_relative,
            dimensions: sample.dimensions.clone(),
            value: sample.raw_value.clone(),
        }
    }

    /// Numeric view of the value; `None` when the text is not a number.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }
}
