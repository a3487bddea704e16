use crate::config;
use crate::error::{InstallError, Result};
use crate::manifest::{DocumentFamily, MinioInstanceRecord};
use crate::plan::Plan;
use crate::submit::Verb;

use clap::Args;

pub const OPERATOR_RELEASE: &str =
    "https://raw.githubusercontent.com/minio/minio-operator/2.0.9/minio-operator.yaml";

#[derive(Debug, Clone, Args)]
pub struct MinioInstanceArgs {
    /// Minio instance install namespace
    #[arg(short = 'n', long, default_value = "minio")]
    pub namespace: String,

    /// Minio access key
    #[arg(short = 'a', long, default_value = "")]
    pub minio_access_key: String,

    /// Minio secret key
    #[arg(short = 's', long, default_value = "")]
    pub minio_secret_key: String,
}

pub fn operator_plan() -> Plan {
    let mut plan = Plan::new("minio-operator");
    plan.apply_url("minio-operator", OPERATOR_RELEASE);
    plan
}

/// Credentials secret plus the tenant that mounts it.
pub fn instance_plan(args: &MinioInstanceArgs) -> Result<Plan> {
    if args.minio_access_key.is_empty() || args.minio_secret_key.is_empty() {
        return Err(InstallError::validation(
            "both --minio-access-key and --minio-secret-key must be set and not empty",
        ));
    }

    let record = MinioInstanceRecord {
        namespace: args.namespace.clone(),
        minio_access_key_base64: config::encode(&args.minio_access_key),
        minio_secret_key_base64: config::encode(&args.minio_secret_key),
    };

    let mut plan = Plan::new("minio-instance");
    plan.render("tenant", DocumentFamily::MinioInstance, &record, Verb::Apply)?;
    Ok(plan)
}
