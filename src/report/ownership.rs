use crate::types::{Pod, ReportableMetric};

const POD_DIMENSION: &str = "pod";
const DEPLOYMENT_DIMENSION: &str = "deployment";

/// Whether `metric`, exposed by `reporting_pod`, belongs on the element of `reporting_node`.
///
/// A `pod` dimension attributes the metric to the pod it names, which lets
/// cluster-level exporters report gauges about pods scheduled elsewhere. A
/// `deployment` dimension is not node-scoped and is accepted anywhere. Both
/// grants are checked independently. Without dimensions the metric belongs to
/// the pod that exposed it.
pub fn is_reportable(metric: &ReportableMetric, reporting_node: &str, reporting_pod: &str, pods: &[Pod]) -> bool {
    if metric.dimensions.is_empty() {
        return pods
            .iter()
            .any(|p| p.name == reporting_pod && p.is_scheduled_on(reporting_node));
    }

    let pod_grant = metric
        .dimensions
        .get(POD_DIMENSION)
        .map(|named| pods.iter().any(|p| &p.name == named && p.is_scheduled_on(reporting_node)))
        .unwrap_or(false);

    pod_grant || metric.dimensions.contains_key(DEPLOYMENT_DIMENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    fn pod(name: &str, node: Option<&str>) -> Pod {
        Pod {
            id: format!("uid-{}", name),
            name: name.to_string(),
            self_link: format!("/api/v1/namespaces/default/pods/{}", name),
            node_name: node.map(String::from),
            metrics_endpoint: String::new(),
            metrics: Vec::new(),
        }
    }

    fn metric(dims: &[(&str, &str)]) -> ReportableMetric {
        ReportableMetric {
            key: "kube_pod_container_status_ready".to_string(),
            source_type: "KubernetesStats".to_string(),
            is_relative: false,
            dimensions: dims.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<Dimensions>(),
            value: "1".to_string(),
        }
    }

    fn cluster() -> Vec<Pod> {
        vec![pod("p1", Some("n1")), pod("p2", Some("n2")), pod("pending", None)]
    }

    #[test]
    fn test_pod_dimension_follows_named_pod() {
        let pods = cluster();
        let m = metric(&[("pod", "p1")]);
        assert!(is_reportable(&m, "n1", "p1", &pods));
        assert!(!is_reportable(&m, "n2", "p1", &pods));
    }

    #[test]
    fn test_pod_dimension_ignores_reporting_pod() {
        // An exporter running as p2 reports about p1; the metric lands on p1's node.
        let pods = cluster();
        let m = metric(&[("namespace", "default"), ("pod", "p1")]);
        assert!(is_reportable(&m, "n1", "p2", &pods));
        assert!(!is_reportable(&m, "n2", "p2", &pods));
    }

    #[test]
    fn test_pod_dimension_unknown_or_unscheduled_pod() {
        let pods = cluster();
        assert!(!is_reportable(&metric(&[("pod", "ghost")]), "n1", "p1", &pods));
        assert!(!is_reportable(&metric(&[("pod", "pending")]), "n1", "p1", &pods));
    }

    #[test]
    fn test_bare_metric_requires_reporting_pod_on_node() {
        let pods = cluster();
        let m = metric(&[]);
        assert!(is_reportable(&m, "n1", "p1", &pods));
        assert!(!is_reportable(&m, "n2", "p1", &pods));
        assert!(!is_reportable(&m, "n1", "pending", &pods));
        assert!(!is_reportable(&m, "n1", "ghost", &pods));
    }

    #[test]
    fn test_deployment_dimension_always_reportable() {
        let pods = cluster();
        let m = metric(&[("deployment", "web")]);
        assert!(is_reportable(&m, "n1", "p1", &pods));
        assert!(is_reportable(&m, "n2", "p1", &pods));
        assert!(is_reportable(&m, "elsewhere", "ghost", &[]));
    }

    #[test]
    fn test_deployment_grant_independent_of_pod_mismatch() {
        let pods = cluster();
        let m = metric(&[("deployment", "web"), ("pod", "p2")]);
        assert!(is_reportable(&m, "n1", "p1", &pods));
    }

    #[test]
    fn test_unrelated_dimensions_not_reportable() {
        let pods = cluster();
        let m = metric(&[("namespace", "default")]);
        assert!(!is_reportable(&m, "n1", "p1", &pods));
    }
}
