use crate::plan::Plan;

pub const WAIT_TIMEOUT: &str = "600s";

/// `(condition, namespace, kind, name)` in wait order. Statefulsets cannot be
/// waited on directly, so their pods are listed instead.
const TARGETS: &[(&str, &str, &str, &str)] = &[
    ("available", "knative-serving", "deployment", "3scale-kourier-control"),
    ("available", "kourier-system", "deployment", "3scale-kourier-gateway"),
    ("available", "knative-serving", "deployment", "activator"),
    ("available", "knative-serving", "deployment", "autoscaler"),
    ("available", "knative-serving", "deployment", "autoscaler-hpa"),
    ("available", "knative-serving", "deployment", "webhook"),
    ("available", "knative-eventing", "deployment", "mt-broker-controller"),
    ("available", "knative-eventing", "deployment", "eventing-controller"),
    ("available", "knative-eventing", "deployment", "eventing-webhook"),
    ("available", "knative-eventing", "deployment", "natss-ch-controller"),
    ("available", "knative-eventing", "deployment", "natss-ch-dispatcher"),
    ("available", "default", "deployment", "nats-operator"),
    ("available", "default", "deployment", "nats-streaming-operator"),
    ("available", "loki", "deployment", "loki-stack-grafana"),
    ("ready", "default", "pod", "nats-1"),
    ("ready", "default", "pod", "nats-2"),
    ("ready", "default", "pod", "nats-3"),
    ("ready", "default", "pod", "nats-streaming-1"),
    ("ready", "default", "pod", "nats-streaming-2"),
    ("ready", "default", "pod", "nats-streaming-3"),
    ("ready", "redis", "pod", "redis-master-0"),
    ("ready", "redis", "pod", "redis-slave-0"),
    ("ready", "redis", "pod", "redis-slave-1"),
    ("ready", "minio", "pod", "minio-zone-0-0"),
    ("ready", "minio", "pod", "minio-zone-0-1"),
    ("ready", "minio", "pod", "minio-zone-0-2"),
    ("ready", "minio", "pod", "minio-zone-0-3"),
    ("ready", "loki", "pod", "loki-stack-0"),
];

pub fn plan() -> Plan {
    let mut plan = Plan::new("wait-install");
    for (condition, namespace, kind, name) in TARGETS {
        plan.kubectl(
            format!("{namespace}/{kind}/{name}"),
            [
                "wait".to_string(),
                format!("--for=condition={condition}"),
                "-n".to_string(),
                namespace.to_string(),
                kind.to_string(),
                name.to_string(),
                format!("--timeout={WAIT_TIMEOUT}"),
            ],
        );
    }
    plan
}
