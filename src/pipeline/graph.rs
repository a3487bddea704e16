//! Pipeline task graph assembly.
//!
//! The graph is never materialized: it is written straight into the Tekton
//! `Pipeline` document as `runAfter` edges.
//!
//! Shape:
//! - header tasks (fixed per pipeline kind)
//! - one task per application, each `runAfter: [app_gate]`
//! - a trailing fan-in task, `runAfter: [fan_in_gate, app1, app2, ...]`
//!
//! Edges only point at tasks declared earlier in the document, so the graph
//! is acyclic by construction. Application tasks share one dependency and are
//! free to run in parallel; their list order is kept but not enforced.

use crate::error::RenderError;
use crate::manifest::{ApplicationNodeRecord, DocumentFamily, FanInRecord};
use crate::pipeline::ApplicationSpec;
use crate::render::RenderedDocument;

use serde::Serialize;

/// Fixed preamble of a pipeline and the header tasks the generated tasks hang
/// off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineHeader {
    pub family: DocumentFamily,
    /// Header task every application task runs after.
    pub app_gate: &'static str,
    /// Header task listed first in the fan-in's `runAfter`.
    pub fan_in_gate: &'static str,
}

/// `deploy-ws-pipeline`: unit tests, api deploy, applications, automated tests.
pub const DEPLOY_PIPELINE: PipelineHeader = PipelineHeader {
    family: DocumentFamily::DeployPipelineHeader,
    app_gate: "unit-tests",
    fan_in_gate: "skaffold-api",
};

/// `full-install-pipeline`: infra install and file resources first, then the
/// same tail as the deploy pipeline.
pub const FULL_INSTALL_PIPELINE: PipelineHeader = PipelineHeader {
    family: DocumentFamily::FullInstallPipelineHeader,
    app_gate: "unit-tests",
    fan_in_gate: "skaffold-api",
};

/// Render header, application tasks and fan-in into one document.
///
/// Any rendering failure aborts; nothing partial is returned.
pub fn assemble_graph<S: Serialize + ?Sized>(
    shared: &S,
    applications: &[ApplicationSpec],
    header: PipelineHeader,
) -> Result<RenderedDocument, RenderError> {
    let node_template = DocumentFamily::PipelineApplicationNode.parse_template()?;
    let fan_in_template = DocumentFamily::PipelineFanIn.parse_template()?;

    // 1) Header.
    let mut document = header.family.render(shared)?;

    // 2) Application tasks, in input order.
    for app in applications {
        let record = ApplicationNodeRecord {
            namespace: app.namespace.clone(),
            folder: app.folder.clone(),
            run_after: header.app_gate.to_string(),
        };
        document.push(node_template.render(&record)?);
    }

    // 3) Fan-in over the gate and every application task.
    let mut run_after = vec![header.fan_in_gate.to_string()];
    run_after.extend(applications.iter().map(ApplicationSpec::node_name));
    let fan_in = FanInRecord {
        run_after: run_after.join(", "),
    };
    document.push(fan_in_template.render(&fan_in)?);

    tracing::debug!(
        pipeline = header.family.name(),
        applications = applications.len(),
        "assembled pipeline graph"
    );

    Ok(document)
}
