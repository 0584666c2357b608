use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::pattern::NamePattern;
use crate::model::{
    ArgValue, DeclId, DeclKind, InheritanceMode, ModuleId, Qualifiers, RawAnnotation, TargetKinds,
};

/// Position in the total order of directives created by one pass. Inherited
/// instances are negative, direct ones start at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sequence(pub(crate) i64);

impl Sequence {
    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_inherited(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two directives with the same identity came from the same annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectiveIdentity {
    pub annotation_type: DeclId,
    pub origin: DeclId,
    pub slot: usize,
}

#[derive(Debug, Clone)]
pub struct Directive {
    /// Declaration the annotation was written on.
    pub origin: DeclId,
    pub origin_kind: DeclKind,
    /// Where this instance is attached. Differs from `origin` on inherited copies.
    pub target: DeclId,
    pub annotation_type: DeclId,
    pub annotation_module: ModuleId,
    pub slot: usize,

    pub targets: TargetKinds,
    pub local_qualifiers: Qualifiers,
    pub external_qualifiers: Qualifiers,
    pub type_pattern: NamePattern,
    pub member_pattern: NamePattern,
    pub parameter_pattern: NamePattern,

    pub inheritance: InheritanceMode,
    pub exclude: bool,
    pub priority: i32,
    pub allow_multiple: bool,
    pub sequence: Sequence,

    pub annotation: Arc<RawAnnotation>,
    /// Every argument after binding, by name. Handlers read their own arguments here.
    pub arguments: IndexMap<String, ArgValue>,
}

impl Directive {
    pub fn is_inherited(&self) -> bool {
        self.sequence.is_inherited()
    }

    /// Whether the containment matcher walks below the target.
    pub fn is_multicast_eligible(&self) -> bool {
        self.origin == self.target || self.inheritance == InheritanceMode::Multicast
    }

    pub fn identity(&self) -> DirectiveIdentity {
        DirectiveIdentity {
            annotation_type: self.annotation_type,
            origin: self.origin,
            slot: self.slot,
        }
    }

    pub fn qualifiers_for(&self, same_module: bool) -> Qualifiers {
        if same_module {
            self.local_qualifiers
        } else {
            self.external_qualifiers
        }
    }

    pub fn argument(&self, name: &str) -> Option<&ArgValue> {
        self.arguments.get(name)
    }

    pub(crate) fn inherited_onto(&self, target: DeclId, sequence: Sequence) -> Self {
        Self {
            target,
            sequence,
            ..self.clone()
        }
    }
}
