use std::fmt;
use std::sync::Arc;

use super::{AnnotationSchema, DeclKind, DeclRef, ParamDirection, RawAnnotation, Visibility};

/// Dense handle into the symbol index. Ids are handed out in containment preorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub(crate) u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a provider reports about a single declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationInfo {
    pub kind: DeclKind,
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_interface: bool,
    /// Override signature; members with equal kind, name and signature override each other.
    pub signature: Option<String>,
    pub direction: Option<ParamDirection>,
    /// Present on annotation types.
    pub schema: Option<AnnotationSchema>,
}

impl DeclarationInfo {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            is_interface: false,
            signature: None,
            direction: None,
            schema: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Supertypes {
    pub base: Option<DeclRef>,
    pub interfaces: Vec<DeclRef>,
}

/// An annotation whose type reference resolved inside the index.
#[derive(Debug, Clone)]
pub struct AttachedAnnotation {
    pub raw: Arc<RawAnnotation>,
    pub annotation_type: DeclId,
    /// Position among the annotations the host reported for the declaration.
    pub slot: usize,
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub id: DeclId,
    pub kind: DeclKind,
    pub name: String,
    pub module: ModuleId,
    pub parent: Option<DeclId>,
    pub children: Vec<DeclId>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_interface: bool,
    /// Effective flag: set when the host marks this declaration or any container generated.
    pub is_generated: bool,
    pub signature: Option<String>,
    pub direction: Option<ParamDirection>,
    pub base: Option<DeclId>,
    pub interfaces: Vec<DeclId>,
    pub annotations: Vec<AttachedAnnotation>,
    pub schema: Option<AnnotationSchema>,
}

impl Declaration {
    pub(crate) fn from_info(
        id: DeclId,
        module: ModuleId,
        parent: Option<DeclId>,
        info: DeclarationInfo,
        is_generated: bool,
    ) -> Self {
        Self {
            id,
            kind: info.kind,
            name: info.name,
            module,
            parent,
            children: Vec::new(),
            visibility: info.visibility,
            is_static: info.is_static,
            is_abstract: info.is_abstract,
            is_virtual: info.is_virtual,
            is_interface: info.is_interface,
            is_generated,
            signature: info.signature,
            direction: info.direction,
            base: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            schema: info.schema,
        }
    }

    /// Interface members are implicitly overridable.
    pub fn is_overridable_by(&self, owner_is_interface: bool) -> bool {
        self.is_virtual || self.is_abstract || owner_is_interface
    }
}
