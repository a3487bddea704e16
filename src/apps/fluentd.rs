use crate::error::Result;
use crate::manifest::{DocumentFamily, FluentdRecord};
use crate::plan::Plan;
use crate::submit::Verb;

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct FluentdArgs {
    /// Fluentd install namespace
    #[arg(short = 'n', long, default_value = "fluent")]
    pub namespace: String,

    /// Fluentd image, usually one bundling the s3 output plugin
    #[arg(short = 'i', long, default_value = "fluent/fluentd:v1.9-1")]
    pub fluentd_custom_image: String,
}

/// Namespace, config, RBAC, service and deployment in one document.
pub fn plan(args: &FluentdArgs) -> Result<Plan> {
    let record = FluentdRecord {
        namespace: args.namespace.clone(),
        fluentd_custom_image: args.fluentd_custom_image.clone(),
    };
    let mut plan = Plan::new("fluentd");
    plan.render("fluentd", DocumentFamily::Fluentd, &record, Verb::Apply)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Action;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_yaml::Value as YamlValue;

    #[test]
    fn every_namespaced_object_lands_in_the_namespace() {
        let args = FluentdArgs {
            namespace: "logging".to_string(),
            fluentd_custom_image: "registry.local/fluentd:s3".to_string(),
        };
        let plan = plan(&args).unwrap();
        let Action::Submit { document, .. } = &plan.steps()[0].action else {
            panic!("expected a submit step");
        };

        let docs: Vec<YamlValue> = serde_yaml::Deserializer::from_str(document.as_str())
            .map(|d| YamlValue::deserialize(d).unwrap())
            .collect();
        assert_eq!(docs[0]["kind"].as_str(), Some("Namespace"));
        assert_eq!(docs[0]["metadata"]["name"].as_str(), Some("logging"));
        for doc in &docs[1..] {
            if let Some(ns) = doc["metadata"]["namespace"].as_str() {
                assert_eq!(ns, "logging", "{:?}", doc["kind"]);
            }
        }
        assert!(document.as_str().contains("image: registry.local/fluentd:s3\n"));
    }
}
