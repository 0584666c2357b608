use indexmap::IndexMap;
use serde::Deserialize;

use super::DeclarationProvider;
use crate::error::LoaderError;
use crate::model::{
    AnnotationSchema, DeclKind, DeclRef, DeclarationInfo, ParamDirection, RawAnnotation,
    Supertypes, Visibility,
};

const RETURN_SLOT_NAME: &str = "return";

/// A whole program: every module that takes part in one pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSpec {
    pub name: String,

    /// Modules this one may reference.
    #[serde(default)]
    pub references: Vec<String>,

    /// Module-level annotations.
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,

    #[serde(default)]
    pub declarations: Vec<DeclSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeclSpec {
    pub kind: DeclKind,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,

    #[serde(default, rename = "interface")]
    pub is_interface: bool,

    #[serde(default)]
    pub generated: bool,

    #[serde(default)]
    pub signature: Option<String>,

    #[serde(default)]
    pub direction: Option<ParamDirection>,

    #[serde(default)]
    pub base: Option<DeclRef>,

    #[serde(default)]
    pub interfaces: Vec<DeclRef>,

    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,

    #[serde(default)]
    pub schema: Option<AnnotationSchema>,

    #[serde(default)]
    pub children: Vec<DeclSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    info: DeclarationInfo,
    children: Vec<NodeId>,
    annotations: Vec<RawAnnotation>,
    supertypes: Supertypes,
    generated: bool,
    references: Vec<String>,
}

/// In-memory provider built from serde documents.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    nodes: Vec<Node>,
    modules: IndexMap<String, NodeId>,
}

impl ModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: GraphDocument) -> Result<Self, LoaderError> {
        let mut graph = Self::new();
        for module in document.modules {
            graph.add_module(module)?;
        }
        Ok(graph)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, LoaderError> {
        let document: GraphDocument = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::parse_error("<yaml>", e.to_string()))?;
        Self::from_document(document)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoaderError> {
        let document: GraphDocument = serde_json::from_str(content)
            .map_err(|e| LoaderError::parse_error("<json>", e.to_string()))?;
        Self::from_document(document)
    }

    pub fn add_module(&mut self, module: ModuleSpec) -> Result<NodeId, LoaderError> {
        if self.modules.contains_key(&module.name) {
            return Err(LoaderError::duplicate_module(module.name));
        }

        let id = self.push(Node {
            info: DeclarationInfo::new(DeclKind::Module, module.name.clone()),
            children: Vec::new(),
            annotations: module.annotations,
            supertypes: Supertypes::default(),
            generated: false,
            references: module.references,
        });
        for spec in module.declarations {
            let child = self.add_declaration(spec);
            self.nodes[id.0].children.push(child);
        }

        self.modules.insert(module.name, id);
        Ok(id)
    }

    /// Links an already added node under another container as well.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    pub fn module(&self, name: &str) -> Option<NodeId> {
        self.modules.get(name).copied()
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add_declaration(&mut self, spec: DeclSpec) -> NodeId {
        let name = if spec.name.is_empty() && spec.kind == DeclKind::ReturnSlot {
            RETURN_SLOT_NAME.to_string()
        } else {
            spec.name
        };

        let info = DeclarationInfo {
            kind: spec.kind,
            name,
            visibility: spec.visibility,
            is_static: spec.is_static,
            is_abstract: spec.is_abstract,
            is_virtual: spec.is_virtual,
            is_interface: spec.is_interface,
            signature: spec.signature,
            direction: spec.direction,
            schema: spec.schema,
        };

        let id = self.push(Node {
            info,
            children: Vec::new(),
            annotations: spec.annotations,
            supertypes: Supertypes {
                base: spec.base,
                interfaces: spec.interfaces,
            },
            generated: spec.generated,
            references: Vec::new(),
        });
        for child in spec.children {
            let child = self.add_declaration(child);
            self.nodes[id.0].children.push(child);
        }
        id
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl DeclarationProvider for ModelGraph {
    type Handle = NodeId;

    fn root_modules(&self) -> Vec<NodeId> {
        self.modules.values().copied().collect()
    }

    fn info(&self, handle: NodeId) -> DeclarationInfo {
        self.node(handle).info.clone()
    }

    fn children(&self, handle: NodeId) -> Vec<NodeId> {
        self.node(handle).children.clone()
    }

    fn annotations(&self, handle: NodeId) -> Vec<RawAnnotation> {
        self.node(handle).annotations.clone()
    }

    fn supertypes(&self, handle: NodeId) -> Supertypes {
        self.node(handle).supertypes.clone()
    }

    fn dependencies(&self, module: NodeId) -> Vec<String> {
        self.node(module).references.clone()
    }

    fn resolve(&self, reference: &DeclRef) -> Option<NodeId> {
        let mut current = self.module(reference.module_name())?;
        for segment in reference.segments() {
            current = self
                .node(current)
                .children
                .iter()
                .copied()
                .find(|child| self.node(*child).info.name == *segment)?;
        }
        Some(current)
    }

    fn is_generated(&self, handle: NodeId) -> bool {
        self.node(handle).generated
    }
}
