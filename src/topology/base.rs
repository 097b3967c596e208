use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Deserialize;

pub const NODES_PATH: &str = "/api/v1/nodes";
pub const SERVICES_PATH: &str = "/api/v1/services";
pub const PODS_PATH: &str = "/api/v1/pods";

/// Collection response; only item metadata is needed to locate each detail resource.
#[derive(Debug, Default, Deserialize)]
pub struct ObjectList {
    #[serde(default)]
    pub items: Vec<ListItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub metadata: ObjectMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Node,
    Service,
    Pod,
}

impl ObjectKind {
    pub fn collection_path(self) -> &'static str {
        match self {
            ObjectKind::Node => NODES_PATH,
            ObjectKind::Service => SERVICES_PATH,
            ObjectKind::Pod => PODS_PATH,
        }
    }
}

/// Path of an object's detail resource.
///
/// API servers since 1.20 leave `selfLink` empty, so the path is rebuilt
/// from namespace and name when it is missing.
pub fn resolve_self_link(kind: ObjectKind, meta: &ObjectMeta) -> Option<String> {
    if let Some(link) = meta.self_link.as_ref().filter(|l| !l.is_empty()) {
        return Some(link.clone());
    }

    let name = meta.name.as_ref().filter(|n| !n.is_empty())?;
    match kind {
        ObjectKind::Node => Some(format!("{}/{}", NODES_PATH, name)),
        ObjectKind::Service | ObjectKind::Pod => {
            let namespace = meta.namespace.as_ref().filter(|n| !n.is_empty())?;
            let resource = if kind == ObjectKind::Pod { "pods" } else { "services" };
            Some(format!("/api/v1/namespaces/{}/{}/{}", namespace, resource, name))
        }
    }
}

/// `uid` and `name`, both mandatory for every mapped object.
pub fn identity(meta: &ObjectMeta) -> Result<(String, String), &'static str> {
    let uid = meta.uid.clone().filter(|u| !u.is_empty()).ok_or("metadata.uid")?;
    let name = meta.name.clone().filter(|n| !n.is_empty()).ok_or("metadata.name")?;
    Ok((uid, name))
}
