use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kube_topology_reporter::parsing::{parse_exposition, parse_line};

fn kube_state_metrics_payload(pods: usize) -> String {
    let mut text = String::from(
        "# HELP kube_pod_container_status_ready Describes whether the containers readiness check succeeded.\n\
         # TYPE kube_pod_container_status_ready gauge\n",
    );
    for i in 0..pods {
        text.push_str(&format!(
            "kube_pod_container_status_ready{{namespace=\"default\",pod=\"app-{i}\",container=\"app\"}} {}\n",
            i % 2
        ));
        text.push_str(&format!(
            "kube_deployment_status_replicas_available{{namespace=\"default\",deployment=\"app-{i}\"}} 1\n"
        ));
    }
    text
}

fn line_parsing_benchmark(c: &mut Criterion) {
    let test_lines = vec![
        "process_open_fds 12",
        "kube_pod_container_status_ready{namespace=\"default\",pod=\"p1\",container=\"app\"} 1",
        "http_requests_total{method=\"post\",code=\"200\"} 1027 1395066363000",
        "# TYPE http_requests_total counter",
        "orphan_metric",
    ];

    c.bench_function("parse_line", |b| {
        b.iter(|| {
            for line in &test_lines {
                black_box(parse_line(black_box(line)));
            }
        })
    });
}

fn payload_parsing_benchmark(c: &mut Criterion) {
    let payload = kube_state_metrics_payload(500);

    c.bench_function("parse_exposition_500_pods", |b| {
        b.iter(|| black_box(parse_exposition(black_box(&payload))))
    });
}

criterion_group!(benches, line_parsing_benchmark, payload_parsing_benchmark);
criterion_main!(benches);
