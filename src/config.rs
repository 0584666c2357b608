use serde::Deserialize;
use std::path::Path;

use crate::error::LoaderError;
use crate::model::DeclRef;
use crate::provider::loader::read_document;

pub const DEFAULT_MARKER: &str = "Core::Directive";
pub const DEFAULT_MAX_DEPTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Annotation types must derive from this type to be read as directives.
    pub marker: DeclRef,

    /// Turns unresolved references into errors instead of warnings.
    pub strict_references: bool,

    pub max_inheritance_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            marker: DeclRef::new("Core", ["Directive"]),
            strict_references: false,
            max_inheritance_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        read_document(path.as_ref())
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoaderError> {
        serde_json::from_str(content).map_err(|e| LoaderError::parse_error("<json>", e.to_string()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, LoaderError> {
        serde_yaml::from_str(content).map_err(|e| LoaderError::parse_error("<yaml>", e.to_string()))
    }
}
