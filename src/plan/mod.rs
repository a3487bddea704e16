pub mod report;

pub use report::execute;

#[cfg(test)]
pub use report::StepStatus;

use crate::error::Result;
use crate::manifest::DocumentFamily;
use crate::pipeline::{ApplicationSpec, PipelineHeader, assemble_graph};
use crate::render::RenderedDocument;
use crate::submit::Verb;

use serde::Serialize;

#[derive(Debug, Clone)]
pub enum Action {
    /// Write the document to its scratch file and run `kubectl <verb> -f`.
    Submit {
        document: RenderedDocument,
        scratch_file: &'static str,
        verb: Verb,
    },
    /// Run kubectl directly. With `tolerate_failure`, a non-zero exit is
    /// logged and the plan continues.
    Kubectl {
        args: Vec<String>,
        tolerate_failure: bool,
    },
    Helm { args: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct Step {
    pub name: String,
    pub action: Action,
}

/// Ordered steps of one install, every document already rendered. `execute`
/// stops at the first failure and never rolls back.
#[derive(Debug, Clone)]
pub struct Plan {
    component: &'static str,
    steps: Vec<Step>,
}

impl Plan {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            steps: Vec::new(),
        }
    }

    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn push(&mut self, name: impl Into<String>, action: Action) {
        self.steps.push(Step {
            name: name.into(),
            action,
        });
    }

    /// Render `family` with `record` now; submit it with `verb` when executed.
    pub fn render<R: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        family: DocumentFamily,
        record: &R,
        verb: Verb,
    ) -> Result<()> {
        let document = family.render(record)?;
        self.push(
            name,
            Action::Submit {
                document,
                scratch_file: family.scratch_file(),
                verb,
            },
        );
        Ok(())
    }

    /// Assemble a pipeline graph now; apply it when executed.
    pub fn pipeline<S: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        header: PipelineHeader,
        shared: &S,
        applications: &[ApplicationSpec],
    ) -> Result<()> {
        let document = assemble_graph(shared, applications, header)?;
        self.push(
            name,
            Action::Submit {
                document,
                scratch_file: header.family.scratch_file(),
                verb: Verb::Apply,
            },
        );
        Ok(())
    }

    pub fn kubectl<I, S>(&mut self, name: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(
            name,
            Action::Kubectl {
                args: args.into_iter().map(Into::into).collect(),
                tolerate_failure: false,
            },
        );
    }

    /// Like `kubectl`, but a non-zero exit does not stop the plan.
    pub fn kubectl_tolerant<I, S>(&mut self, name: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(
            name,
            Action::Kubectl {
                args: args.into_iter().map(Into::into).collect(),
                tolerate_failure: true,
            },
        );
    }

    /// `kubectl apply -f <url>` for a published release manifest.
    pub fn apply_url(&mut self, name: impl Into<String>, url: &str) {
        self.kubectl(name, ["apply", "-f", url]);
    }

    pub fn helm<I, S>(&mut self, name: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(
            name,
            Action::Helm {
                args: args.into_iter().map(Into::into).collect(),
            },
        );
    }
}
