mod directive;
mod downstream;
mod hierarchy;
mod index;
mod loader;

pub use directive::DirectiveError;
pub use downstream::DownstreamError;
pub use hierarchy::HierarchyError;
pub use index::IndexError;
pub use loader::LoaderError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Directive(#[from] DirectiveError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    #[error("internal invariant violated: {message}")]
    Invariant { message: String },
}

impl Error {
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
