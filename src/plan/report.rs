use crate::error::{InstallError, Result};
use crate::plan::{Action, Plan};
use crate::submit::{HELM, KUBECTL, SubmitResult, Submitter, ToolRunner};

/// What happened to one step.
#[derive(Debug)]
pub enum StepStatus {
    Applied,
    /// Ran, exited non-zero, and the step allows that.
    Tolerated(SubmitResult),
    Failed(InstallError),
    /// An earlier step failed.
    NotAttempted,
}

impl StepStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepStatus::Applied | StepStatus::Tolerated(_))
    }
}

/// Per-step ledger of one plan execution.
#[derive(Debug)]
pub struct Report {
    pub component: &'static str,
    pub steps: Vec<(String, StepStatus)>,
}

impl Report {
    /// Names of steps whose effects reached the cluster, in order.
    pub fn applied(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|(_, status)| status.is_applied())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn not_attempted(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|(_, status)| matches!(status, StepStatus::NotAttempted))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn failure(&self) -> Option<(&str, &InstallError)> {
        self.steps.iter().find_map(|(name, status)| match status {
            StepStatus::Failed(e) => Some((name.as_str(), e)),
            _ => None,
        })
    }

    /// The first failure, if any, as the install's result.
    pub fn into_result(self) -> Result<()> {
        for (_, status) in self.steps {
            if let StepStatus::Failed(e) = status {
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Run `plan` step by step, stopping at the first failure.
pub fn execute<R: ToolRunner>(plan: Plan, submitter: &Submitter<R>) -> Report {
    let component = plan.component();
    let mut steps = Vec::with_capacity(plan.steps.len());
    let mut failed = false;

    for step in plan.steps {
        if failed {
            steps.push((step.name, StepStatus::NotAttempted));
            continue;
        }

        tracing::debug!(component, step = %step.name, "running step");
        let status = match run_action(&step.action, submitter) {
            Ok(StepStatus::Tolerated(result)) => {
                tracing::warn!(
                    component,
                    step = %step.name,
                    exit_code = result.exit_code,
                    "continuing: {}",
                    result.stderr.trim()
                );
                StepStatus::Tolerated(result)
            }
            Ok(status) => status,
            Err(e) => {
                tracing::debug!(component, step = %step.name, error = %e, "step failed");
                failed = true;
                StepStatus::Failed(e)
            }
        };
        steps.push((step.name, status));
    }

    Report { component, steps }
}

fn run_action<R: ToolRunner>(action: &Action, submitter: &Submitter<R>) -> Result<StepStatus> {
    match action {
        Action::Submit {
            document,
            scratch_file,
            verb,
        } => submitter
            .submit(document, scratch_file, *verb)
            .map(|_| StepStatus::Applied),
        Action::Kubectl {
            args,
            tolerate_failure: false,
        } => submitter.kubectl(args).map(|_| StepStatus::Applied),
        Action::Kubectl {
            args,
            tolerate_failure: true,
        } => {
            let result = submitter.invoke(KUBECTL, args)?;
            if result.exit_code == 0 {
                Ok(StepStatus::Applied)
            } else {
                Ok(StepStatus::Tolerated(result))
            }
        }
        Action::Helm { args } => {
            tracing::debug!(program = HELM, args = ?args, "helm");
            submitter.helm(args).map(|_| StepStatus::Applied)
        }
    }
}
