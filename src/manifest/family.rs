use crate::error::RenderError;
use crate::render::{self, RenderedDocument, Template};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentFamily {
    ApplicationNamespace,
    CicdServiceAccount,
    CicdClusterRoleBinding,
    Cicd,
    SshGit,
    Tls,
    DeployPipelineHeader,
    FullInstallPipelineHeader,
    PipelineApplicationNode,
    PipelineFanIn,
    MinioInstance,
    NatsStreamingInstance,
    KnativeServingConfig,
    KnativeEventingNatssChannel,
    Fluentd,
}

impl DocumentFamily {
    #[cfg(test)]
    pub const ALL: [DocumentFamily; 15] = [
        DocumentFamily::ApplicationNamespace,
        DocumentFamily::CicdServiceAccount,
        DocumentFamily::CicdClusterRoleBinding,
        DocumentFamily::Cicd,
        DocumentFamily::SshGit,
        DocumentFamily::Tls,
        DocumentFamily::DeployPipelineHeader,
        DocumentFamily::FullInstallPipelineHeader,
        DocumentFamily::PipelineApplicationNode,
        DocumentFamily::PipelineFanIn,
        DocumentFamily::MinioInstance,
        DocumentFamily::NatsStreamingInstance,
        DocumentFamily::KnativeServingConfig,
        DocumentFamily::KnativeEventingNatssChannel,
        DocumentFamily::Fluentd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DocumentFamily::ApplicationNamespace => "namespace",
            DocumentFamily::CicdServiceAccount => "cicd-service-account",
            DocumentFamily::CicdClusterRoleBinding => "cicd-cluster-role-binding",
            DocumentFamily::Cicd => "cicd",
            DocumentFamily::SshGit => "ssh-git",
            DocumentFamily::Tls => "tls",
            DocumentFamily::DeployPipelineHeader => "pipeline-deploy-header",
            DocumentFamily::FullInstallPipelineHeader => "pipeline-full-install-header",
            DocumentFamily::PipelineApplicationNode => "pipeline-application-node",
            DocumentFamily::PipelineFanIn => "pipeline-fan-in",
            DocumentFamily::MinioInstance => "minio-instance",
            DocumentFamily::NatsStreamingInstance => "nats-streaming-instance",
            DocumentFamily::KnativeServingConfig => "knative-serving-config",
            DocumentFamily::KnativeEventingNatssChannel => "knative-eventing-natss-channel",
            DocumentFamily::Fluentd => "fluentd",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            DocumentFamily::ApplicationNamespace => include_str!("../../templates/namespace.yaml"),
            DocumentFamily::CicdServiceAccount => {
                include_str!("../../templates/cicd-service-account.yaml")
            }
            DocumentFamily::CicdClusterRoleBinding => {
                include_str!("../../templates/cicd-cluster-role-binding.yaml")
            }
            DocumentFamily::Cicd => include_str!("../../templates/cicd.yaml"),
            DocumentFamily::SshGit => include_str!("../../templates/ssh-git.yaml"),
            DocumentFamily::Tls => include_str!("../../templates/tls.yaml"),
            DocumentFamily::DeployPipelineHeader => {
                include_str!("../../templates/pipeline-deploy-header.yaml")
            }
            DocumentFamily::FullInstallPipelineHeader => {
                include_str!("../../templates/pipeline-full-install-header.yaml")
            }
            DocumentFamily::PipelineApplicationNode => {
                include_str!("../../templates/pipeline-application-node.yaml")
            }
            DocumentFamily::PipelineFanIn => include_str!("../../templates/pipeline-fan-in.yaml"),
            DocumentFamily::MinioInstance => include_str!("../../templates/minio-instance.yaml"),
            DocumentFamily::NatsStreamingInstance => {
                include_str!("../../templates/nats-streaming-instance.yaml")
            }
            DocumentFamily::KnativeServingConfig => {
                include_str!("../../templates/knative-serving-config.yaml")
            }
            DocumentFamily::KnativeEventingNatssChannel => {
                include_str!("../../templates/knative-eventing-natss-channel.yaml")
            }
            DocumentFamily::Fluentd => include_str!("../../templates/fluentd.yaml"),
        }
    }

    /// Fixed file name under the scratch directory. Files are overwritten on
    /// every run; both pipeline graphs share one file.
    pub fn scratch_file(self) -> &'static str {
        match self {
            DocumentFamily::ApplicationNamespace => "temp_namespace.yaml",
            DocumentFamily::CicdServiceAccount => "temp_cicd_sa.yaml",
            DocumentFamily::CicdClusterRoleBinding => "temp_cicd_cluster_role_binding.yaml",
            DocumentFamily::Cicd => "temp_cicd.yaml",
            DocumentFamily::SshGit => "temp_git_ssh.yaml",
            DocumentFamily::Tls => "temp_tls.yaml",
            DocumentFamily::DeployPipelineHeader
            | DocumentFamily::FullInstallPipelineHeader
            | DocumentFamily::PipelineApplicationNode
            | DocumentFamily::PipelineFanIn => "temp_applications_skaffold.yaml",
            DocumentFamily::MinioInstance => "temp_minio_instance.yaml",
            DocumentFamily::NatsStreamingInstance => "temp_nats_streaming.yaml",
            DocumentFamily::KnativeServingConfig => "temp_knative_serving_cm.yaml",
            DocumentFamily::KnativeEventingNatssChannel => {
                "temp_knative_eventing_natss_channel.yaml"
            }
            DocumentFamily::Fluentd => "temp_fluentd.yaml",
        }
    }

    pub fn parse_template(self) -> Result<Template<'static>, RenderError> {
        Template::parse(self.name(), self.template())
    }

    pub fn render<R: Serialize + ?Sized>(self, record: &R) -> Result<RenderedDocument, RenderError> {
        render::render(record, self.name(), self.template())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_embedded_template_parses() {
        for family in DocumentFamily::ALL {
            let parsed = family.parse_template();
            assert!(parsed.is_ok(), "{}: {:?}", family.name(), parsed.err());
        }
    }

    #[test]
    fn only_pipeline_families_share_a_scratch_file() {
        let mut seen = std::collections::BTreeMap::new();
        for family in DocumentFamily::ALL {
            if let Some(prev) = seen.insert(family.scratch_file(), family) {
                assert_eq!(
                    prev.scratch_file(),
                    "temp_applications_skaffold.yaml",
                    "{:?} and {:?} collide",
                    prev,
                    family
                );
            }
        }
    }

    #[test]
    fn pipeline_fragments_bind_run_after() {
        for family in [DocumentFamily::PipelineApplicationNode, DocumentFamily::PipelineFanIn] {
            let template = family.parse_template().unwrap();
            assert!(template.fields().any(|f| f == "RunAfter"), "{}", family.name());
        }
    }
}
