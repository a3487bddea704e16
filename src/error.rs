use thiserror::Error;

/// Failures produced while rendering a template against an input record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("template {template}: unbound placeholder {{{{.{field}}}}}")]
    Binding { template: String, field: String },

    #[error("template {template}: malformed template at byte {offset}: {reason}")]
    Syntax {
        template: String,
        offset: usize,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("binding error: {0}")]
    Binding(RenderError),

    #[error("syntax error: {0}")]
    Syntax(RenderError),

    /// The external tool could not be invoked, or its input could not be written.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The external tool ran and exited non-zero. `stderr` is kept verbatim.
    #[error("{program} exited with code {exit_code}: {stderr}")]
    ExternalFailure {
        program: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("validation error: {message}")]
    Validation { message: String },
}

impl InstallError {
    pub fn transport(message: impl Into<String>) -> Self {
        InstallError::Transport {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        InstallError::Validation {
            message: message.into(),
        }
    }
}

impl From<RenderError> for InstallError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Binding { .. } => InstallError::Binding(e),
            RenderError::Syntax { .. } => InstallError::Syntax(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
