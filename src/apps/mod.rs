pub mod cicd;
pub mod fluentd;
pub mod knative;
pub mod minio;
pub mod nats;
pub mod redis;
pub mod tekton;
pub mod wait;

use crate::error::Result;
use crate::messages;
use crate::plan::Plan;

use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum InstallCommand {
    /// Install the CI/CD tasks, secrets and pipelines
    Cicd(cicd::CicdArgs),
    /// Install tekton pipelines and dashboard
    Tekton,
    /// Install nats-operator
    NatsOperator,
    /// Install nats-streaming-operator
    NatsStreamingOperator,
    /// Install nats-streaming-instance
    NatsStreamingInstance,
    /// Install minio-operator
    MinioOperator,
    /// Install minio-instance
    MinioInstance(minio::MinioInstanceArgs),
    /// Install knative-serving
    KnativeServing(knative::KnativeServingArgs),
    /// Install knative-eventing
    KnativeEventing,
    /// Install redis
    Redis(redis::RedisArgs),
    /// Install fluentd
    #[command(alias = "fluent")]
    Fluentd(fluentd::FluentdArgs),
    /// Wait for the platform workloads to become ready
    WaitInstall,
}

impl InstallCommand {
    pub fn name(&self) -> &'static str {
        match self {
            InstallCommand::Cicd(_) => "cicd",
            InstallCommand::Tekton => "tekton",
            InstallCommand::NatsOperator => "nats-operator",
            InstallCommand::NatsStreamingOperator => "nats-streaming-operator",
            InstallCommand::NatsStreamingInstance => "nats-streaming-instance",
            InstallCommand::MinioOperator => "minio-operator",
            InstallCommand::MinioInstance(_) => "minio-instance",
            InstallCommand::KnativeServing(_) => "knative-serving",
            InstallCommand::KnativeEventing => "knative-eventing",
            InstallCommand::Redis(_) => "redis",
            InstallCommand::Fluentd(_) => "fluentd",
            InstallCommand::WaitInstall => "wait-install",
        }
    }

    /// Validate flags, read input files and render every document.
    pub fn plan(&self) -> Result<Plan> {
        match self {
            InstallCommand::Cicd(args) => cicd::plan(args),
            InstallCommand::Tekton => Ok(tekton::plan()),
            InstallCommand::NatsOperator => Ok(nats::operator_plan()),
            InstallCommand::NatsStreamingOperator => Ok(nats::streaming_operator_plan()),
            InstallCommand::NatsStreamingInstance => nats::streaming_instance_plan(),
            InstallCommand::MinioOperator => Ok(minio::operator_plan()),
            InstallCommand::MinioInstance(args) => minio::instance_plan(args),
            InstallCommand::KnativeServing(args) => knative::serving_plan(args),
            InstallCommand::KnativeEventing => knative::eventing_plan(),
            InstallCommand::Redis(args) => redis::plan(args),
            InstallCommand::Fluentd(args) => fluentd::plan(args),
            InstallCommand::WaitInstall => Ok(wait::plan()),
        }
    }

    pub fn installed_message(&self) -> String {
        let component = component(self.name());
        let (title, info) = component.map(|c| (c.title, c.info)).unwrap_or(("", ""));
        messages::installed(title, info)
    }
}

pub struct Component {
    pub name: &'static str,
    pub title: &'static str,
    pub info: &'static str,
}

/// Listed by `install` without a component, in this order.
pub const COMPONENTS: &[Component] = &[
    Component {
        name: "cicd",
        title: "Cicd has been installed",
        info: cicd::INFO,
    },
    Component {
        name: "fluentd",
        title: "Fluentd has been installed.",
        info: "#",
    },
    Component {
        name: "knative-eventing",
        title: "Knative Eventing has been installed.",
        info: "#",
    },
    Component {
        name: "knative-serving",
        title: "Knative serving has been installed.",
        info: "#",
    },
    Component {
        name: "minio-instance",
        title: "Minio Instance has been installed.",
        info: "#",
    },
    Component {
        name: "minio-operator",
        title: "Minio Operator has been installed.",
        info: "#",
    },
    Component {
        name: "nats-operator",
        title: "Nats operator installed to default namespace.",
        info: "#",
    },
    Component {
        name: "nats-streaming-instance",
        title: "Nats Streaming Instance has been installed.",
        info: "#",
    },
    Component {
        name: "nats-streaming-operator",
        title: "Nats streaming operator installed to default namespace.",
        info: "#",
    },
    Component {
        name: "redis",
        title: "Redis has been installed.",
        info: "#",
    },
    Component {
        name: "tekton",
        title: "Tekton Dashboard has been installed.",
        info: tekton::INFO,
    },
    Component {
        name: "wait-install",
        title: "Infrastructure installation finished.",
        info: "#",
    },
];

pub fn component(name: &str) -> Option<&'static Component> {
    COMPONENTS.iter().find(|c| c.name == name)
}

/// `install` with no component.
pub fn usage() -> String {
    let list: Vec<String> = COMPONENTS.iter().map(|c| format!(" - {}", c.name)).collect();
    format!(
        "You can install:\n{}\n\nRun coolknative install NAME --help to see configuration options.",
        list.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        install: InstallCommand,
    }

    fn parse(argv: &[&str]) -> InstallCommand {
        let mut full = vec!["install"];
        full.extend_from_slice(argv);
        Cli::try_parse_from(full).unwrap().install
    }

    #[test]
    fn every_subcommand_has_a_component_entry() {
        let commands = [
            parse(&["cicd"]),
            parse(&["tekton"]),
            parse(&["nats-operator"]),
            parse(&["nats-streaming-operator"]),
            parse(&["nats-streaming-instance"]),
            parse(&["minio-operator"]),
            parse(&["minio-instance"]),
            parse(&["knative-serving"]),
            parse(&["knative-eventing"]),
            parse(&["redis"]),
            parse(&["fluentd"]),
            parse(&["wait-install"]),
        ];
        for command in &commands {
            assert!(component(command.name()).is_some(), "{}", command.name());
        }
        assert_eq!(commands.len(), COMPONENTS.len());
    }

    #[test]
    fn fluent_alias_is_accepted() {
        assert_eq!(parse(&["fluent"]).name(), "fluentd");
    }

    #[test]
    fn plans_are_named_after_their_component() {
        for argv in [
            vec!["tekton"],
            vec!["knative-serving"],
            vec!["knative-eventing"],
            vec!["redis"],
            vec!["fluentd"],
            vec!["wait-install"],
            vec!["minio-instance", "-a", "k", "-s", "s"],
            vec!["cicd", "-u", "u", "-p", "p"],
        ] {
            let command = parse(&argv);
            assert_eq!(command.plan().unwrap().component(), command.name());
        }
    }

    #[test]
    fn installed_message_uses_component_info() {
        let message = parse(&["tekton"]).installed_message();
        assert!(message.contains("= Tekton Dashboard has been installed."));
        assert!(message.contains("kubectl proxy"));
    }

    #[test]
    fn usage_lists_components() {
        let usage = usage();
        assert!(usage.starts_with("You can install:\n - cicd\n - fluentd\n"));
        assert!(usage.contains(" - wait-install\n\nRun coolknative install NAME --help"));
    }
}
