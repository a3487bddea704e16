use std::process::Command;

/// Captured result of one external tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Everything that touches the cluster goes through here.
pub trait ToolRunner {
    /// Run `program` with `args` to completion. `Err` means the program could
    /// not be started at all; a non-zero exit is reported in `ToolOutput`.
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ToolOutput>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ToolOutput> {
        (**self).run(program, args)
    }
}

/// Runs tools as blocking child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ToolOutput> {
        tracing::trace!(program = %program, args = ?args, "spawn");

        let output = Command::new(program).args(args).output()?;

        Ok(ToolOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
