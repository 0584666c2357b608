use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownstreamError {
    #[error("worker for '{declaration}' failed: {message}")]
    WorkerFailed {
        declaration: String,
        message: String,
    },

    #[error("declaration '{declaration}' is not tracked by this consumer")]
    Untracked { declaration: String },
}

impl DownstreamError {
    pub fn worker_failed(declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WorkerFailed {
            declaration: declaration.into(),
            message: message.into(),
        }
    }

    pub fn untracked(declaration: impl Into<String>) -> Self {
        Self::Untracked {
            declaration: declaration.into(),
        }
    }
}
