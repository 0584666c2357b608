use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("cyclic hierarchy at '{declaration}': {}", .path.join(" -> "))]
    Cyclic {
        declaration: String,
        path: Vec<String>,
    },

    #[error("derivation chain below '{declaration}' exceeds the maximum depth of {limit}")]
    DepthExceeded { declaration: String, limit: usize },
}

impl HierarchyError {
    pub fn cyclic(declaration: impl Into<String>, path: Vec<String>) -> Self {
        Self::Cyclic {
            declaration: declaration.into(),
            path,
        }
    }

    pub fn depth_exceeded(declaration: impl Into<String>, limit: usize) -> Self {
        Self::DepthExceeded {
            declaration: declaration.into(),
            limit,
        }
    }
}
