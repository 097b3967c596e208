use k8s_openapi::api::core::v1::Service as ServiceObject;

use crate::topology::base::{identity, resolve_self_link, ObjectKind};
use crate::types::Service;

pub fn service_from_object(obj: &ServiceObject, fetched_link: &str) -> Result<Service, &'static str> {
    let (id, _) = identity(&obj.metadata)?;
    let self_link = resolve_self_link(ObjectKind::Service, &obj.metadata)
        .unwrap_or_else(|| fetched_link.to_string());
    Ok(Service { id, self_link })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_from_object() {
        let obj: ServiceObject = serde_json::from_str(
            r#"{"metadata": {"name": "kubernetes", "namespace": "default", "uid": "u-svc"},
                "spec": {"clusterIP": "10.96.0.1"}}"#,
        )
        .unwrap();
        let svc = service_from_object(&obj, "/fallback").unwrap();
        assert_eq!(svc.id, "u-svc");
        assert_eq!(svc.self_link, "/api/v1/namespaces/default/services/kubernetes");
    }

    #[test]
    fn test_service_without_uid() {
        let obj: ServiceObject = serde_json::from_str(r#"{"metadata": {"name": "x"}}"#).unwrap();
        assert!(service_from_object(&obj, "/fallback").is_err());
    }
}
