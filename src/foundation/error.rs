pub type NewsreelResult<T> = Result<T, NewsreelError>;

#[derive(thiserror::Error, Debug)]
pub enum NewsreelError {
    #[error("validation error: {0}")]
    Validation(String),

    /// Topic feed or image service failure. Absorbed by the component that hits it.
    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("missing dependency: '{program}' was not found on PATH")]
    DependencyMissing { program: String },

    #[error("'{program}' failed ({status}): {stderr}")]
    ExecutionFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NewsreelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    pub fn dependency_missing(program: impl Into<String>) -> Self {
        Self::DependencyMissing {
            program: program.into(),
        }
    }

    pub fn execution_failed(
        program: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ExecutionFailed {
            program: program.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
