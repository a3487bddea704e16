use crate::config;
use crate::error::Result;
use crate::manifest::{DocumentFamily, EmptyRecord, KnativeServingConfigRecord};
use crate::plan::Plan;
use crate::submit::Verb;

use clap::Args;

const SERVING_RELEASE: &str = "https://github.com/knative/serving/releases/download/v0.15.0";
const KOURIER_RELEASE: &str =
    "https://github.com/knative/net-kourier/releases/download/v0.15.0/kourier.yaml";
const EVENTING_RELEASE: &str = "https://github.com/knative/eventing/releases/download/v0.18.0";
const NATSS_RELEASE: &str =
    "https://github.com/knative-sandbox/eventing-natss/releases/download/v0.18.0/eventing-natss.yaml";

const KOURIER_INGRESS_CLASS: &str = "kourier.ingress.networking.knative.dev";
const DEFAULT_NATSS_URL: &str = "nats://nats.default.svc.cluster.local:4222";
const DEFAULT_CLUSTER_ID: &str = "nats-streaming";

/// Public ip meaning "no external load balancer".
const LOCALHOST: &str = "localhost";

#[derive(Debug, Clone, Args)]
pub struct KnativeServingArgs {
    /// Custom domain template
    #[arg(short = 'd', long, default_value = "\"{{.Name}}-{{.Namespace}}.{{.Domain}}\"")]
    pub domain_template: String,

    /// Custom domain name
    #[arg(short = 'n', long, default_value = "example.com")]
    pub domain: String,

    /// Public ip for dns for domain
    #[arg(short = 'i', long, default_value = LOCALHOST)]
    pub public_ip: String,

    /// Enable scale to zero
    #[arg(short = 'z', long, default_value = "true")]
    pub enable_scale_to_zero: String,
}

pub fn serving_plan(args: &KnativeServingArgs) -> Result<Plan> {
    let public_ip = config::strip_quotes(&args.public_ip);
    let record = KnativeServingConfigRecord {
        domain_template: config::ensure_quoted(&args.domain_template),
        domain: args.domain.clone(),
        enable_scale_to_zero: config::strip_quotes(&args.enable_scale_to_zero).to_string(),
    };

    let mut plan = Plan::new("knative-serving");
    for file in ["serving-crds.yaml", "serving-core.yaml", "serving-hpa.yaml"] {
        plan.apply_url(
            file.trim_end_matches(".yaml"),
            &format!("{SERVING_RELEASE}/{file}"),
        );
    }
    plan.apply_url("kourier", KOURIER_RELEASE);

    let ingress = serde_json::json!({ "data": { "ingress.class": KOURIER_INGRESS_CLASS } });
    plan.kubectl(
        "ingress-class",
        [
            "-n",
            "knative-serving",
            "patch",
            "cm",
            "config-network",
            "--type",
            "merge",
            "--patch",
            ingress.to_string().as_str(),
        ],
    );

    if public_ip != LOCALHOST {
        tracing::info!(public_ip, "exposing kourier with tls");
        for env in ["CERTS_SECRET_NAMESPACE=kourier-system", "CERTS_SECRET_NAME=tls"] {
            plan.kubectl(
                format!("kourier-env {env}"),
                [
                    "-n",
                    "kourier-system",
                    "set",
                    "env",
                    "deployment/3scale-kourier-control",
                    env,
                ],
            );
        }

        let lb = serde_json::json!({ "spec": { "loadBalancerIP": public_ip } });
        plan.kubectl(
            "kourier-load-balancer",
            [
                "-n",
                "kourier-system",
                "patch",
                "svc",
                "kourier",
                "--patch",
                lb.to_string().as_str(),
            ],
        );
    }

    plan.render(
        "config-maps",
        DocumentFamily::KnativeServingConfig,
        &record,
        Verb::Apply,
    )?;
    Ok(plan)
}

pub fn eventing_plan() -> Result<Plan> {
    let mut plan = Plan::new("knative-eventing");
    for file in [
        "eventing-crds.yaml",
        "eventing-core.yaml",
        "mt-channel-broker.yaml",
        "eventing-sugar-controller.yaml",
    ] {
        plan.apply_url(
            file.trim_end_matches(".yaml"),
            &format!("{EVENTING_RELEASE}/{file}"),
        );
    }
    plan.apply_url("eventing-natss", NATSS_RELEASE);

    let natss_url = format!("DEFAULT_NATSS_URL={DEFAULT_NATSS_URL}");
    let cluster_id = format!("DEFAULT_CLUSTER_ID={DEFAULT_CLUSTER_ID}");
    for env in [&natss_url, &cluster_id] {
        for deployment in ["natss-ch-controller", "natss-ch-dispatcher"] {
            let target = format!("deployment/{deployment}");
            plan.kubectl(
                format!("{deployment} {env}"),
                ["-n", "knative-eventing", "set", "env", target.as_str(), env.as_str()],
            );
        }
    }

    plan.render(
        "default-channel",
        DocumentFamily::KnativeEventingNatssChannel,
        &EmptyRecord::default(),
        Verb::Apply,
    )?;
    Ok(plan)
}
