use crate::types::{Dimensions, ReportableMetric};

pub const POD_READY_KEY: &str = "kube_pod_container_status_ready";
pub const DEPLOYMENT_AVAILABLE_KEY: &str = "kube_deployment_status_replicas_available";
pub const DEPLOYMENT_UNAVAILABLE_KEY: &str = "kube_deployment_status_replicas_unavailable";

pub const DERIVED_SOURCE_TYPE: &str = "KubernetesStats";

/// Rollups for one element, computed from the metrics reported on it.
///
/// Nothing is derived unless at least one pod readiness sample is present;
/// the deployment counts share that gate.
pub fn derive_element_metrics(reported: &[ReportableMetric]) -> Vec<ReportableMetric> {
    let readiness: Vec<&ReportableMetric> = reported.iter().filter(|m| m.key == POD_READY_KEY).collect();
    if readiness.is_empty() {
        return Vec::new();
    }

    let total = readiness.len();
    let ready = readiness.iter().filter(|m| is_one(m)).count();

    vec![
        derived("custom_pods_ready", ready),
        derived("custom_pods_not_ready", total - ready),
        derived("custom_pods_total", total),
        derived("custom_deployments_available", count_ones(reported, DEPLOYMENT_AVAILABLE_KEY)),
        derived("custom_deployments_unavailable", count_ones(reported, DEPLOYMENT_UNAVAILABLE_KEY)),
    ]
}

fn count_ones(reported: &[ReportableMetric], key: &str) -> usize {
    reported.iter().filter(|m| m.key == key && is_one(m)).count()
}

fn is_one(metric: &ReportableMetric) -> bool {
    metric.numeric_value() == Some(1.0)
}

fn derived(key: &str, count: usize) -> ReportableMetric {
    ReportableMetric {
        key: key.to_string(),
        source_type: DERIVED_SOURCE_TYPE.to_string(),
        is_relative: false,
        dimensions: Dimensions::new(),
        value: count.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(key: &str, value: &str) -> ReportableMetric {
        ReportableMetric {
            key: key.to_string(),
            source_type: "KubernetesStats".to_string(),
            is_relative: false,
            dimensions: Dimensions::new(),
            value: value.to_string(),
        }
    }

    fn value_of<'a>(derived: &'a [ReportableMetric], key: &str) -> &'a str {
        &derived.iter().find(|m| m.key == key).unwrap().value
    }

    #[test]
    fn test_pod_readiness_counts() {
        let reported = vec![
            metric(POD_READY_KEY, "1"),
            metric(POD_READY_KEY, "1"),
            metric(POD_READY_KEY, "0"),
        ];
        let derived = derive_element_metrics(&reported);
        assert_eq!(derived.len(), 5);
        assert_eq!(value_of(&derived, "custom_pods_ready"), "2");
        assert_eq!(value_of(&derived, "custom_pods_not_ready"), "1");
        assert_eq!(value_of(&derived, "custom_pods_total"), "3");
        assert_eq!(value_of(&derived, "custom_deployments_available"), "0");
        assert_eq!(value_of(&derived, "custom_deployments_unavailable"), "0");
    }

    #[test]
    fn test_derived_metrics_shape() {
        let derived = derive_element_metrics(&[metric(POD_READY_KEY, "1")]);
        for m in &derived {
            assert!(!m.is_relative);
            assert_eq!(m.source_type, "KubernetesStats");
            assert!(m.dimensions.is_empty());
        }
    }

    #[test]
    fn test_no_readiness_means_no_rollups() {
        let reported = vec![
            metric(DEPLOYMENT_AVAILABLE_KEY, "1"),
            metric(DEPLOYMENT_UNAVAILABLE_KEY, "1"),
        ];
        assert!(derive_element_metrics(&reported).is_empty());
        assert!(derive_element_metrics(&[]).is_empty());
    }

    #[test]
    fn test_deployment_counts_under_readiness_gate() {
        let reported = vec![
            metric(POD_READY_KEY, "1"),
            metric(DEPLOYMENT_AVAILABLE_KEY, "1"),
            metric(DEPLOYMENT_AVAILABLE_KEY, "1"),
            metric(DEPLOYMENT_AVAILABLE_KEY, "3"),
            metric(DEPLOYMENT_UNAVAILABLE_KEY, "1"),
            metric(DEPLOYMENT_UNAVAILABLE_KEY, "0"),
        ];
        let derived = derive_element_metrics(&reported);
        assert_eq!(value_of(&derived, "custom_deployments_available"), "2");
        assert_eq!(value_of(&derived, "custom_deployments_unavailable"), "1");
    }

    #[test]
    fn test_non_numeric_readiness_counts_as_not_ready() {
        let reported = vec![metric(POD_READY_KEY, "1.0"), metric(POD_READY_KEY, "NaN"), metric(POD_READY_KEY, "x")];
        let derived = derive_element_metrics(&reported);
        assert_eq!(value_of(&derived, "custom_pods_ready"), "1");
        assert_eq!(value_of(&derived, "custom_pods_not_ready"), "2");
        assert_eq!(value_of(&derived, "custom_pods_total"), "3");
    }

    #[test]
    fn test_order_independent() {
        let mut reported = vec![
            metric(POD_READY_KEY, "0"),
            metric(DEPLOYMENT_AVAILABLE_KEY, "1"),
            metric(POD_READY_KEY, "1"),
        ];
        let forward = derive_element_metrics(&reported);
        reported.reverse();
        assert_eq!(forward, derive_element_metrics(&reported));
    }
}
