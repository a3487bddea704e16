use crate::error::Result;
use crate::manifest::{DocumentFamily, NatsStreamingInstanceRecord};
use crate::plan::Plan;
use crate::submit::Verb;

const OPERATOR_RELEASE: &str = "https://github.com/nats-io/nats-operator/releases/download/v0.7.2";
const STREAMING_OPERATOR_RELEASE: &str =
    "https://github.com/nats-io/nats-streaming-operator/releases/download/v0.3.0";

/// Replicas for both the NATS and the streaming cluster.
const CLUSTER_SIZE: u32 = 3;

pub fn operator_plan() -> Plan {
    let mut plan = Plan::new("nats-operator");
    plan.apply_url("prereqs", &format!("{OPERATOR_RELEASE}/00-prereqs.yaml"));
    plan.apply_url("deployment", &format!("{OPERATOR_RELEASE}/10-deployment.yaml"));
    plan
}

/// The streaming operator is namespaced; it lands in `default`.
pub fn streaming_operator_plan() -> Plan {
    let mut plan = Plan::new("nats-streaming-operator");
    for (step, file) in [("rbac", "default-rbac.yaml"), ("deployment", "deployment.yaml")] {
        let url = format!("{STREAMING_OPERATOR_RELEASE}/{file}");
        plan.kubectl(step, ["apply", "-n", "default", "-f", url.as_str()]);
    }
    plan
}

pub fn streaming_instance_plan() -> Result<Plan> {
    let mut plan = Plan::new("nats-streaming-instance");
    let record = NatsStreamingInstanceRecord {
        size: CLUSTER_SIZE.to_string(),
    };
    plan.render(
        "nats-streaming",
        DocumentFamily::NatsStreamingInstance,
        &record,
        Verb::Apply,
    )?;
    Ok(plan)
}
