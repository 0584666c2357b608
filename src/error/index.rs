use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("unresolved reference '{reference}' from '{from}'")]
    UnresolvedReference { reference: String, from: String },

    #[error("declaration '{declaration}' is reachable more than once through containment")]
    DuplicateDeclaration { declaration: String },

    #[error("unknown declaration path: {path}")]
    UnknownPath { path: String },
}

impl IndexError {
    pub fn unresolved_reference(reference: impl Into<String>, from: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
            from: from.into(),
        }
    }

    pub fn duplicate_declaration(declaration: impl Into<String>) -> Self {
        Self::DuplicateDeclaration {
            declaration: declaration.into(),
        }
    }

    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownPath { path: path.into() }
    }
}
