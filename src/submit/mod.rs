pub mod runner;
pub mod scratch;

#[cfg(test)]
pub mod fake;

pub use runner::{ProcessRunner, ToolRunner};
pub use scratch::ScratchDir;

use crate::error::{InstallError, Result};
use crate::render::RenderedDocument;

use std::fmt;
use std::path::PathBuf;

pub const KUBECTL: &str = "kubectl";
pub const HELM: &str = "helm";

/// How kubectl should treat a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Fails if the resource already exists. The only verb that accepts
    /// `metadata.generateName`.
    Create,
    /// Idempotent create-or-update.
    Apply,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Apply => "apply",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit status and stderr of one successful external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub exit_code: i32,
    pub stderr: String,
}

pub struct Submitter<R> {
    runner: R,
    scratch: ScratchDir,
    kubeconfig: Option<PathBuf>,
}

impl<R: ToolRunner> Submitter<R> {
    pub fn new(runner: R, scratch: ScratchDir) -> Self {
        Self {
            runner,
            scratch,
            kubeconfig: None,
        }
    }

    /// Pass `--kubeconfig <path>` to every kubectl and helm invocation.
    pub fn with_kubeconfig(mut self, kubeconfig: Option<PathBuf>) -> Self {
        self.kubeconfig = kubeconfig;
        self
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Persist `document` as `scratch_file` and run `kubectl <verb> -f <file>`.
    pub fn submit(
        &self,
        document: &RenderedDocument,
        scratch_file: &str,
        verb: Verb,
    ) -> Result<SubmitResult> {
        let path = self
            .scratch
            .write(scratch_file, document.as_bytes())
            .map_err(|e| {
                InstallError::transport(format!(
                    "write {} under {}: {}",
                    scratch_file,
                    self.scratch.root().display(),
                    e
                ))
            })?;

        tracing::debug!(verb = %verb, file = %path.display(), "submitting document");
        self.kubectl(&[
            verb.as_str().to_string(),
            "-f".to_string(),
            path.display().to_string(),
        ])
    }

    /// Run kubectl; non-zero exit is an `ExternalFailure`.
    pub fn kubectl(&self, args: &[String]) -> Result<SubmitResult> {
        check(KUBECTL, self.invoke(KUBECTL, args)?)
    }

    /// Run helm; non-zero exit is an `ExternalFailure`.
    pub fn helm(&self, args: &[String]) -> Result<SubmitResult> {
        check(HELM, self.invoke(HELM, args)?)
    }

    /// Run `program` and report its exit status without judging it. Only a
    /// failure to start the program is an error.
    pub fn invoke(&self, program: &str, args: &[String]) -> Result<SubmitResult> {
        let mut full: Vec<String> = args.to_vec();
        if let Some(kubeconfig) = &self.kubeconfig {
            full.push("--kubeconfig".to_string());
            full.push(kubeconfig.display().to_string());
        }

        let output = self
            .runner
            .run(program, &full)
            .map_err(|e| InstallError::transport(format!("run {}: {}", program, e)))?;
        tracing::trace!(program, exit_code = output.exit_code, stdout = %output.stdout.trim_end());

        Ok(SubmitResult {
            exit_code: output.exit_code,
            stderr: output.stderr,
        })
    }
}

fn check(program: &str, result: SubmitResult) -> Result<SubmitResult> {
    if result.exit_code != 0 {
        return Err(InstallError::ExternalFailure {
            program: program.to_string(),
            exit_code: result.exit_code,
            stderr: result.stderr,
        });
    }
    Ok(result)
}
