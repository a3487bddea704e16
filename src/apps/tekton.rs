use crate::plan::Plan;

pub const PIPELINE_RELEASE: &str =
    "https://github.com/tektoncd/pipeline/releases/download/v0.15.1/release.yaml";
pub const DASHBOARD_RELEASE: &str =
    "https://github.com/tektoncd/dashboard/releases/download/v0.8.2/tekton-dashboard-release.yaml";

pub const INFO: &str = "#To forward the dashboard to your local machine
kubectl proxy

# Once Proxying you can navigate to the below
http://localhost:8001/api/v1/namespaces/tekton-pipelines/services/tekton-dashboard:http/proxy/#/";

pub fn plan() -> Plan {
    let mut plan = Plan::new("tekton");
    plan.apply_url("tekton-pipelines", PIPELINE_RELEASE);
    plan.apply_url("tekton-dashboard", DASHBOARD_RELEASE);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::execute;
    use crate::submit::fake::FakeRunner;
    use crate::submit::{ScratchDir, Submitter};
    use pretty_assertions::assert_eq;

    #[test]
    fn dashboard_is_not_applied_when_pipelines_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = FakeRunner::new().failing_on("pipeline/releases", 1, "connection refused");
        let submitter = Submitter::new(runner, ScratchDir::new(tmp.path()));

        let report = execute(plan(), &submitter);
        assert_eq!(report.not_attempted(), vec!["tekton-dashboard"]);
        assert_eq!(
            submitter.runner().calls()[0].args,
            vec!["apply", "-f", PIPELINE_RELEASE]
        );
    }
}
