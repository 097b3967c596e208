use chrono::SecondsFormat;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Deserialize;

use crate::topology::base::identity;
use crate::types::Node;

const ROLE_LABEL: &str = "kubernetes.io/role";
const HOSTNAME_LABEL: &str = "kubernetes.io/hostname";
const INSTANCE_TYPE_LABELS: [&str; 2] = ["beta.kubernetes.io/instance-type", "node.kubernetes.io/instance-type"];
const DEFAULT_ROLE: &str = "node";

// Node status is decoded leniently: every field defaults on its own instead of
// failing the whole object, which k8s-openapi's NodeSystemInfo would do.

#[derive(Debug, Default, Deserialize)]
pub struct NodeObject {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: Option<NodeStatusFields>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStatusFields {
    pub addresses: Vec<NodeAddressFields>,
    pub node_info: Option<NodeInfoFields>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NodeAddressFields {
    #[serde(rename = "type")]
    pub type_: String,
    pub address: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeInfoFields {
    #[serde(rename = "machineID")]
    pub machine_id: String,
    #[serde(rename = "systemUUID")]
    pub system_uuid: String,
    #[serde(rename = "bootID")]
    pub boot_id: String,
    pub kernel_version: String,
    pub os_image: String,
    pub container_runtime_version: String,
    pub kubelet_version: String,
    pub kube_proxy_version: String,
    pub operating_system: String,
    pub architecture: String,
}

/// Map a node detail object; fails only when `uid` or `name` is missing.
pub fn node_from_object(obj: NodeObject) -> Result<Node, &'static str> {
    let (id, name) = identity(&obj.metadata)?;
    let status = obj.status.unwrap_or_default();
    let info = status.node_info.unwrap_or_default();

    Ok(Node {
        id,
        name,
        role: label(&obj.metadata, ROLE_LABEL).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        external_ip: external_ip(&status.addresses),
        instance_type: INSTANCE_TYPE_LABELS
            .iter()
            .find_map(|l| label(&obj.metadata, l))
            .unwrap_or_default(),
        hostname: label(&obj.metadata, HOSTNAME_LABEL).unwrap_or_default(),
        creation_timestamp: obj
            .metadata
            .creation_timestamp
            .as_ref()
            .map(|t| t.0.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default(),
        machine_id: info.machine_id,
        system_uuid: info.system_uuid,
        boot_id: info.boot_id,
        kernel_version: info.kernel_version,
        os_image: info.os_image,
        container_runtime_version: info.container_runtime_version,
        kubelet_version: info.kubelet_version,
        kube_proxy_version: info.kube_proxy_version,
        operating_system: info.operating_system,
        architecture: info.architecture,
    })
}

/// The `ExternalIP` address when the node has one, otherwise the last address listed.
fn external_ip(addresses: &[NodeAddressFields]) -> String {
    addresses
        .iter()
        .find(|a| a.type_ == "ExternalIP")
        .or_else(|| addresses.last())
        .map(|a| a.address.clone())
        .unwrap_or_default()
}

fn label(meta: &ObjectMeta, key: &str) -> Option<String> {
    meta.labels
        .as_ref()
        .and_then(|l| l.get(key))
        .filter(|v| !v.is_empty())
        .cloned()
}
