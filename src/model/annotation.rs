use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TargetKinds;
use crate::error::LoaderError;

const SEPARATOR: &str = "::";

/// Cross-module reference to a declaration: `Module::Outer::Member`.
///
/// The first segment names the module; the remaining segments walk containment
/// by declaration name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeclRef {
    module: String,
    path: Vec<String>,
}

impl DeclRef {
    pub fn new<I, S>(module: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module: module.into(),
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self {
            module: name.into(),
            path: Vec::new(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, LoaderError> {
        let mut segments = text.split(SEPARATOR).map(str::trim);
        let module = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoaderError::invalid_reference(text, "missing module name"))?;

        let mut path = Vec::new();
        for segment in segments {
            if segment.is_empty() {
                return Err(LoaderError::invalid_reference(text, "empty path segment"));
            }
            path.push(segment.to_string());
        }

        Ok(Self {
            module: module.to_string(),
            path,
        })
    }

    pub fn module_name(&self) -> &str {
        &self.module
    }

    pub fn segments(&self) -> &[String] {
        &self.path
    }

    pub fn is_module(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for DeclRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module)?;
        for segment in &self.path {
            write!(f, "{SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for DeclRef {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DeclRef {
    type Error = LoaderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DeclRef> for String {
    fn from(reference: DeclRef) -> Self {
        reference.to_string()
    }
}

/// Constructor-style argument value carried by an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<ArgValue>),
}

impl ArgValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// A single string, or a list made only of strings.
    pub fn as_strings(&self) -> Option<Vec<&str>> {
        match self {
            Self::Str(value) => Some(vec![value.as_str()]),
            Self::List(items) => items.iter().map(ArgValue::as_str).collect(),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Marker as authored on a declaration, before it is recognized as a directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnnotation {
    #[serde(rename = "type")]
    pub annotation_type: DeclRef,

    #[serde(default)]
    pub args: Vec<ArgValue>,

    #[serde(default)]
    pub named: IndexMap<String, ArgValue>,
}

impl RawAnnotation {
    pub fn new(annotation_type: DeclRef) -> Self {
        Self {
            annotation_type,
            args: Vec::new(),
            named: IndexMap::new(),
        }
    }

    pub fn with_arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceMode {
    #[default]
    None,
    /// Inherited by derived declarations and multicast again from there.
    Multicast,
    /// Inherited by derived declarations only.
    #[serde(alias = "strict")]
    Inherit,
}

impl InheritanceMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "multicast" => Some(Self::Multicast),
            "inherit" | "strict" => Some(Self::Inherit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Multicast => "multicast",
            Self::Inherit => "inherit",
        }
    }
}

/// Defaults an annotation type declares for every directive made from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectiveUsage {
    pub valid_on: TargetKinds,
    pub inheritance: InheritanceMode,
    pub allow_multiple: bool,
}

impl Default for DirectiveUsage {
    fn default() -> Self {
        Self {
            valid_on: TargetKinds::ALL,
            inheritance: InheritanceMode::None,
            allow_multiple: true,
        }
    }
}

/// Carried by annotation types: constructor parameter names (all required) and usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnnotationSchema {
    #[serde(default)]
    pub constructor: Vec<String>,

    #[serde(default)]
    pub usage: DirectiveUsage,
}
