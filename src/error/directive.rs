use thiserror::Error;

/// Raised while turning a raw annotation into a directive.
///
/// Every variant names the declaration carrying the annotation so the host can
/// point its diagnostic at the offending source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("malformed directive on '{origin}': missing required argument '{argument}'")]
    MissingArgument { origin: String, argument: String },

    #[error("malformed directive on '{origin}': argument '{argument}' {message}")]
    InvalidArgument {
        origin: String,
        argument: String,
        message: String,
    },

    #[error("malformed directive on '{origin}': invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        origin: String,
        pattern: String,
        message: String,
    },

    #[error("malformed directive on '{origin}': {message}")]
    Malformed { origin: String, message: String },
}

impl DirectiveError {
    pub fn missing_argument(origin: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            origin: origin.into(),
            argument: argument.into(),
        }
    }

    pub fn invalid_argument(
        origin: impl Into<String>,
        argument: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            origin: origin.into(),
            argument: argument.into(),
            message: message.into(),
        }
    }

    pub fn invalid_pattern(
        origin: impl Into<String>,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidPattern {
            origin: origin.into(),
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn malformed(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            Self::MissingArgument { origin, .. }
            | Self::InvalidArgument { origin, .. }
            | Self::InvalidPattern { origin, .. }
            | Self::Malformed { origin, .. } => origin,
        }
    }
}
