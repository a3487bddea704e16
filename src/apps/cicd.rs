use crate::config::{self, DockerCredentials};
use crate::error::Result;
use crate::manifest::{
    CicdRecord, CicdServiceAccountRecord, DocumentFamily, NamespaceRecord, SshGitRecord,
    TlsRecord,
};
use crate::pipeline::{DEPLOY_PIPELINE, FULL_INSTALL_PIPELINE, parse_application_list};
use crate::plan::Plan;
use crate::submit::Verb;

use clap::Args;
use std::path::PathBuf;

/// Token used for both webservices when no token file is given.
const DEFAULT_WEBSERVICE_TOKEN: &str = "dev_token";

pub const INFO: &str = "# Go to tekton dashboard";

#[derive(Debug, Clone, Args)]
pub struct CicdArgs {
    /// Custom docker server
    #[arg(short = 's', long, default_value = "index.docker.io")]
    pub docker_server: String,

    /// Docker server username
    #[arg(short = 'u', long, default_value = "")]
    pub docker_username: String,

    /// Docker server password
    #[arg(short = 'p', long, default_value = "")]
    pub docker_password: String,

    /// Cicd install namespace
    #[arg(short = 'n', long, default_value = "cicd")]
    pub namespace: String,

    /// Token webservice 1 filename
    #[arg(short = 'd', long = "token-webservice-1-filename")]
    pub token_webservice_1_filename: Option<PathBuf>,

    /// Token webservice 2 filename
    #[arg(short = 'e', long = "token-webservice-2-filename")]
    pub token_webservice_2_filename: Option<PathBuf>,

    /// Ssh private key filename
    #[arg(short = 'y', long)]
    pub ssh_private_key_filename: Option<PathBuf>,

    /// Tls certificate (unix line endings) filename
    #[arg(long)]
    pub tls_crt_filename: Option<PathBuf>,

    /// Tls key filename
    #[arg(long)]
    pub tls_key_filename: Option<PathBuf>,

    /// Ssh git server
    #[arg(short = 'g', long)]
    pub ssh_git_server: Option<String>,

    /// Knative serving domain template
    #[arg(short = 't', long, default_value = "{{.Name}}.{{.Namespace}}.{{.Domain}}")]
    pub knative_serving_domain_template: String,

    /// Knative serving domain name
    #[arg(short = 'w', long, default_value = "example.com")]
    pub domain: String,

    /// Namespace where the api will be accessible
    #[arg(short = 'a', long, default_value = "api-ns")]
    pub namespace_api: String,

    /// Minio access key
    #[arg(long, default_value = "minio")]
    pub minio_access_key: String,

    /// Minio secret key
    #[arg(long, default_value = "minio123")]
    pub minio_secret_key: String,

    /// Docker image running coolknative inside the install pipeline
    #[arg(long, default_value = "eqqe/coolknative:latest")]
    pub cool_knative_docker_image: String,

    /// Public ip for dns for domain
    #[arg(long, default_value = "localhost")]
    pub public_ip: String,

    /// Git repository holding the applications
    #[arg(
        long,
        default_value = "https://github.com/eskersoftware/example-coolknative-webservices.git"
    )]
    pub apps_git: String,

    /// Git repository holding files copied to object storage
    #[arg(
        long,
        default_value = "https://github.com/eskersoftware/example-coolknative-file-resources.git"
    )]
    pub file_resources_git: String,

    /// Add a namespace for your application (repeatable)
    #[arg(long = "add-application-namespace")]
    pub application_namespaces: Vec<String>,

    /// Add a namespace with the knative eventing injection label (repeatable)
    #[arg(short = 'i', long = "add-application-namespace-knative-injection")]
    pub application_namespaces_knative_injection: Vec<String>,

    /// Application deployed by the pipelines, as <namespace>-<folder> (repeatable)
    #[arg(short = 'f', long = "skaffold-application")]
    pub skaffold_applications: Vec<String>,
}

/// Build every step of the install. All validation, file reads and
/// rendering happen here, before anything touches the cluster.
pub fn plan(args: &CicdArgs) -> Result<Plan> {
    let docker = DockerCredentials::new(
        &args.docker_server,
        &args.docker_username,
        &args.docker_password,
    )?;
    let applications = parse_application_list(&args.skaffold_applications)?;

    let docker_config_json_base64 = docker.config_json_base64();
    let minio_access_key_base64 = config::encode(&args.minio_access_key);
    let minio_secret_key_base64 = config::encode(&args.minio_secret_key);
    let token_webservice1_data_base64 = token(args.token_webservice_1_filename.as_deref())?;
    let token_webservice2_data_base64 = token(args.token_webservice_2_filename.as_deref())?;

    let mut plan = Plan::new("cicd");

    // The namespace may already exist; the service-account document declares
    // it again anyway.
    plan.kubectl_tolerant("create-namespace", ["create", "namespace", args.namespace.as_str()]);

    let service_account = CicdServiceAccountRecord {
        namespace: args.namespace.clone(),
        namespace_api: args.namespace_api.clone(),
    };
    plan.render(
        "service-account",
        DocumentFamily::CicdServiceAccount,
        &service_account,
        Verb::Apply,
    )?;

    // Created, never reconciled: a second run stops here with AlreadyExists.
    plan.render(
        "cluster-role-binding",
        DocumentFamily::CicdClusterRoleBinding,
        &service_account,
        Verb::Create,
    )?;

    let cicd = CicdRecord {
        docker_server: docker.server.clone(),
        docker_username: docker.username.clone(),
        docker_username_base64: config::encode(&docker.username),
        docker_password_base64: config::encode(&docker.password),
        namespace: args.namespace.clone(),
        docker_config_json_base64: docker_config_json_base64.clone(),
        minio_access_key_base64: minio_access_key_base64.clone(),
        minio_secret_key_base64: minio_secret_key_base64.clone(),
        token_webservice1_data_base64,
        token_webservice2_data_base64,
        knative_serving_domain_template: args.knative_serving_domain_template.clone(),
        domain: args.domain.clone(),
        namespace_api: args.namespace_api.clone(),
        cool_knative_docker_image: args.cool_knative_docker_image.clone(),
        public_ip: args.public_ip.clone(),
        apps_git: args.apps_git.clone(),
        file_resources_git: args.file_resources_git.clone(),
    };
    plan.render("cicd", DocumentFamily::Cicd, &cicd, Verb::Apply)?;

    let namespaces = args
        .application_namespaces
        .iter()
        .map(|ns| (ns, "disabled"))
        .chain(
            args.application_namespaces_knative_injection
                .iter()
                .map(|ns| (ns, "enabled")),
        );
    for (namespace, injection) in namespaces {
        let record = NamespaceRecord {
            namespace: namespace.clone(),
            minio_access_key_base64: minio_access_key_base64.clone(),
            minio_secret_key_base64: minio_secret_key_base64.clone(),
            knative_eventing_injection: injection.to_string(),
            docker_config_json_base64: docker_config_json_base64.clone(),
        };
        plan.render(
            format!("namespace {}", namespace),
            DocumentFamily::ApplicationNamespace,
            &record,
            Verb::Apply,
        )?;
    }

    if let (Some(server), Some(key)) = (&args.ssh_git_server, &args.ssh_private_key_filename) {
        let record = SshGitRecord {
            namespace: args.namespace.clone(),
            ssh_git_server: server.clone(),
            ssh_private_key_data_base64: config::file_to_base64(key)?,
        };
        plan.render("ssh-git", DocumentFamily::SshGit, &record, Verb::Apply)?;
    }

    if let (Some(crt), Some(key)) = (&args.tls_crt_filename, &args.tls_key_filename) {
        let record = TlsRecord {
            tls_crt_data_base64: config::file_to_base64(crt)?,
            tls_key_data_base64: config::file_to_base64(key)?,
        };
        plan.render("tls", DocumentFamily::Tls, &record, Verb::Apply)?;
    }

    plan.pipeline(
        "deploy-ws-pipeline",
        DEPLOY_PIPELINE,
        &service_account,
        &applications,
    )?;
    plan.pipeline(
        "full-install-pipeline",
        FULL_INSTALL_PIPELINE,
        &service_account,
        &applications,
    )?;

    Ok(plan)
}

fn token(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => config::file_to_base64(path),
        None => Ok(config::encode(DEFAULT_WEBSERVICE_TOKEN)),
    }
}
