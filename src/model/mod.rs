//! Declarations, annotations and the bitsets directives filter on.

mod annotation;
mod declaration;
mod kinds;
mod qualifiers;

pub use annotation::{
    AnnotationSchema, ArgValue, DeclRef, DirectiveUsage, InheritanceMode, RawAnnotation,
};
pub use declaration::{
    AttachedAnnotation, DeclId, Declaration, DeclarationInfo, ModuleId, Supertypes,
};
pub use kinds::{DeclKind, TargetKinds};
pub use qualifiers::{ParamDirection, Qualifiers, Visibility};

use serde::Deserialize;

/// Accepts either `"method|property"` or `["method", "property"]` in documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub(crate) fn names(&self) -> Vec<&str> {
        match self {
            Self::One(text) => split_names(text),
            Self::Many(items) => items.iter().flat_map(|s| split_names(s)).collect(),
        }
    }
}

pub(crate) fn split_names(text: &str) -> Vec<&str> {
    text.split(['|', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
