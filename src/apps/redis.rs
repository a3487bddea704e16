use crate::config;
use crate::error::Result;
use crate::plan::Plan;

use clap::{ArgAction, Args};

const BITNAMI_REPO: &str = "https://charts.bitnami.com/bitnami";
const CHART: &str = "bitnami/redis";
const RELEASE: &str = "redis";

#[derive(Debug, Clone, Args)]
pub struct RedisArgs {
    /// Update the helm repo
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub update_repo: bool,

    /// Kubernetes namespace for the application
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Use custom flags or override existing flags (example --set persistence.enabled=true)
    #[arg(long = "set")]
    pub set: Vec<String>,
}

pub fn plan(args: &RedisArgs) -> Result<Plan> {
    let overrides = config::parse_overrides(&args.set)?;

    let mut plan = Plan::new("redis");
    plan.helm("repo-add", ["repo", "add", "bitnami", BITNAMI_REPO]);
    if args.update_repo {
        plan.helm("repo-update", ["repo", "update"]);
    }
    plan.kubectl_tolerant("create-namespace", ["create", "namespace", args.namespace.as_str()]);

    let mut install: Vec<String> = ["upgrade", "--install", RELEASE, CHART, "--namespace"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    install.push(args.namespace.clone());
    for (key, value) in &overrides {
        install.push("--set".to_string());
        install.push(format!("{key}={value}"));
    }
    plan.helm("chart", install);

    Ok(plan)
}
