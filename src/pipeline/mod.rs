pub mod app;
pub mod graph;

pub use app::{ApplicationSpec, parse_application_list};
pub use graph::{DEPLOY_PIPELINE, FULL_INSTALL_PIPELINE, PipelineHeader, assemble_graph};
