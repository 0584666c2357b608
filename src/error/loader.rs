use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to read '{path}': {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported document format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },

    #[error("module '{name}' is defined more than once")]
    DuplicateModule { name: String },

    #[error("invalid declaration reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },
}

impl LoaderError {
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn duplicate_module(name: impl Into<String>) -> Self {
        Self::DuplicateModule { name: name.into() }
    }

    pub fn invalid_reference(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.into(),
            message: message.into(),
        }
    }
}
