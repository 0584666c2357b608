//! Frozen view of the host's declaration graph.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::engine::ResolutionContext;
use crate::error::{IndexError, Result};
use crate::model::{
    AttachedAnnotation, DeclId, DeclKind, DeclRef, Declaration, ModuleId, ParamDirection,
    Qualifiers,
};
use crate::provider::DeclarationProvider;

#[derive(Debug, Clone)]
pub struct ModuleEntry {
    pub id: ModuleId,
    pub name: String,
    pub decl: DeclId,
    pub dependencies: Vec<ModuleId>,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    decls: Vec<Declaration>,
    paths: Vec<String>,
    by_path: HashMap<String, DeclId>,
    modules: Vec<ModuleEntry>,
    module_by_name: HashMap<String, ModuleId>,
}

/// Scratch state while the index is being built.
struct Builder<'p, P: DeclarationProvider> {
    provider: &'p P,
    index: SymbolIndex,
    handles: HashMap<P::Handle, DeclId>,
    order: Vec<P::Handle>,
}

impl SymbolIndex {
    /// Builds the index in three passes: containment, module dependencies, then
    /// supertype and annotation-type references.
    pub fn build<P: DeclarationProvider>(
        provider: &P,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Self> {
        let mut builder = Builder {
            provider,
            index: SymbolIndex::default(),
            handles: HashMap::new(),
            order: Vec::new(),
        };

        for root in provider.root_modules() {
            builder.add_module(root)?;
        }
        builder.link_dependencies(ctx)?;
        builder.link_references(ctx)?;

        let index = builder.index;
        debug!(
            declarations = index.len(),
            modules = index.modules.len(),
            "built symbol index"
        );
        Ok(index)
    }

    pub fn get(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    /// Like `get`, for ids that may come from another index.
    pub fn try_get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Every declaration in containment preorder.
    pub fn walk(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    /// Displayable `Module::Type::Member` path.
    pub fn path(&self, id: DeclId) -> &str {
        &self.paths[id.index()]
    }

    pub fn find(&self, path: &str) -> Option<DeclId> {
        self.by_path.get(path).copied()
    }

    pub fn find_ref(&self, reference: &DeclRef) -> Option<DeclId> {
        self.find(&reference.to_string())
    }

    pub fn lookup(&self, path: &str) -> std::result::Result<DeclId, IndexError> {
        self.find(path).ok_or_else(|| IndexError::unknown_path(path))
    }

    pub fn children(&self, id: DeclId) -> &[DeclId] {
        &self.get(id).children
    }

    pub fn parent(&self, id: DeclId) -> Option<DeclId> {
        self.get(id).parent
    }

    pub fn module_of(&self, id: DeclId) -> &ModuleEntry {
        &self.modules[self.get(id).module.index()]
    }

    pub fn module_decl(&self, module: ModuleId) -> DeclId {
        self.modules[module.index()].decl
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    pub fn module_named(&self, name: &str) -> Option<&ModuleEntry> {
        self.module_by_name
            .get(name)
            .map(|id| &self.modules[id.index()])
    }

    /// Types declared directly in a module, in containment order.
    pub fn top_level_types(&self) -> Vec<DeclId> {
        self.decls
            .iter()
            .filter(|d| d.kind == DeclKind::Type)
            .filter(|d| {
                d.parent
                    .is_some_and(|p| self.get(p).kind == DeclKind::Module)
            })
            .map(|d| d.id)
            .collect()
    }

    pub fn is_accessor(&self, id: DeclId) -> bool {
        let decl = self.get(id);
        decl.kind == DeclKind::Method
            && decl.parent.is_some_and(|p| {
                matches!(self.get(p).kind, DeclKind::Property | DeclKind::Event)
            })
    }

    /// Nearest enclosing type, or the declaration itself when it is a type.
    pub fn declaring_type(&self, id: DeclId) -> Option<DeclId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            let decl = self.get(candidate);
            if decl.kind == DeclKind::Type {
                return Some(candidate);
            }
            current = decl.parent;
        }
        None
    }

    /// Dotted name of the declaring type, including enclosing types (`Outer.Inner`).
    /// Empty for modules.
    pub fn type_name(&self, id: DeclId) -> String {
        let mut names = Vec::new();
        let mut current = self.declaring_type(id);
        while let Some(ty) = current {
            let decl = self.get(ty);
            if decl.kind != DeclKind::Type {
                break;
            }
            names.push(decl.name.as_str());
            current = decl.parent;
        }
        names.reverse();
        names.join(".")
    }

    /// Base types of `id`, root first, ending with `id` itself.
    pub fn base_chain(&self, id: DeclId) -> Vec<DeclId> {
        let mut chain = vec![id];
        let mut seen = HashSet::from([id]);
        let mut current = self.get(id).base;
        while let Some(base) = current {
            if !seen.insert(base) {
                break;
            }
            chain.push(base);
            current = self.get(base).base;
        }
        chain.reverse();
        chain
    }

    /// Classification bitset the directive masks are compared against.
    ///
    /// Parameters and return slots take visibility and modifiers from their
    /// owning method; modules carry every bit.
    pub fn qualifiers(&self, id: DeclId) -> Qualifiers {
        let decl = self.get(id);
        match decl.kind {
            DeclKind::Module => Qualifiers::all(),
            DeclKind::Parameter | DeclKind::ReturnSlot => {
                let owner = decl.parent.map(|p| self.get(p)).unwrap_or(decl);
                let direction = match decl.kind {
                    DeclKind::ReturnSlot => ParamDirection::Out,
                    _ => decl.direction.unwrap_or_default(),
                };
                (member_bits(owner) - Qualifiers::ANY_GENERATION)
                    | generation_bit(decl)
                    | Qualifiers::from_direction(direction)
            }
            _ => member_bits(decl) | Qualifiers::ANY_DIRECTION,
        }
    }
}

fn member_bits(decl: &Declaration) -> Qualifiers {
    let mut bits = Qualifiers::from_visibility(decl.visibility);
    bits |= if decl.is_static {
        Qualifiers::STATIC
    } else {
        Qualifiers::INSTANCE
    };
    bits |= if decl.is_abstract {
        Qualifiers::ABSTRACT
    } else {
        Qualifiers::NON_ABSTRACT
    };
    bits |= if decl.is_virtual || decl.is_abstract {
        Qualifiers::VIRTUAL
    } else {
        Qualifiers::NON_VIRTUAL
    };
    bits | generation_bit(decl)
}

fn generation_bit(decl: &Declaration) -> Qualifiers {
    if decl.is_generated {
        Qualifiers::GENERATED
    } else {
        Qualifiers::USER
    }
}

impl<P: DeclarationProvider> Builder<'_, P> {
    fn add_module(&mut self, handle: P::Handle) -> Result<()> {
        let info = self.provider.info(handle);
        let module = ModuleId(self.index.modules.len() as u32);
        let name = info.name.clone();

        let decl = self.add(handle, module, None, name.clone())?;
        if !self.index.module_by_name.contains_key(&name) {
            self.index.module_by_name.insert(name.clone(), module);
        }
        self.index.modules.push(ModuleEntry {
            id: module,
            name,
            decl,
            dependencies: Vec::new(),
        });

        self.add_children(handle, module, decl)
    }

    fn add_children(&mut self, handle: P::Handle, module: ModuleId, parent: DeclId) -> Result<()> {
        for child in self.provider.children(handle) {
            let path = format!(
                "{}::{}",
                self.index.paths[parent.index()],
                self.provider.info(child).name
            );
            let id = self.add(child, module, Some(parent), path)?;
            self.index.decls[parent.index()].children.push(id);
            self.add_children(child, module, id)?;
        }
        Ok(())
    }

    fn add(
        &mut self,
        handle: P::Handle,
        module: ModuleId,
        parent: Option<DeclId>,
        path: String,
    ) -> Result<DeclId> {
        if self.handles.contains_key(&handle) {
            return Err(IndexError::duplicate_declaration(path).into());
        }

        let id = DeclId(self.index.decls.len() as u32);
        let parent_generated = parent.is_some_and(|p| self.index.decls[p.index()].is_generated);
        let generated = parent_generated || self.provider.is_generated(handle);
        let info = self.provider.info(handle);

        self.index
            .decls
            .push(Declaration::from_info(id, module, parent, info, generated));
        self.index.by_path.entry(path.clone()).or_insert(id);
        self.index.paths.push(path);
        self.handles.insert(handle, id);
        self.order.push(handle);
        Ok(id)
    }

    fn link_dependencies(&mut self, ctx: &mut ResolutionContext<'_>) -> Result<()> {
        for position in 0..self.index.modules.len() {
            let entry = &self.index.modules[position];
            let handle = self.order[entry.decl.index()];
            let from = entry.name.clone();

            let mut resolved = Vec::new();
            for name in self.provider.dependencies(handle) {
                match self.index.module_by_name.get(&name) {
                    Some(id) => resolved.push(*id),
                    None => ctx.unresolved(IndexError::unresolved_reference(name, from.clone()))?,
                }
            }
            self.index.modules[position].dependencies = resolved;
        }
        Ok(())
    }

    fn link_references(&mut self, ctx: &mut ResolutionContext<'_>) -> Result<()> {
        for position in 0..self.order.len() {
            let id = DeclId(position as u32);
            let handle = self.order[position];

            let supertypes = self.provider.supertypes(handle);
            if let Some(base) = &supertypes.base {
                let resolved = self.resolve_from(id, base, ctx)?;
                self.index.decls[position].base = resolved;
            }
            for interface in &supertypes.interfaces {
                if let Some(resolved) = self.resolve_from(id, interface, ctx)? {
                    self.index.decls[position].interfaces.push(resolved);
                }
            }

            for (slot, raw) in self.provider.annotations(handle).into_iter().enumerate() {
                if let Some(annotation_type) = self.resolve_from(id, &raw.annotation_type, ctx)? {
                    self.index.decls[position].annotations.push(AttachedAnnotation {
                        raw: Arc::new(raw),
                        annotation_type,
                        slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolves a reference made from `from`. Only the referencing module and its
    /// stated dependencies are visible.
    fn resolve_from(
        &self,
        from: DeclId,
        reference: &DeclRef,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Option<DeclId>> {
        let module = &self.index.modules[self.index.decls[from.index()].module.index()];
        let visible = reference.module_name() == module.name
            || module.dependencies.iter().any(|dep| {
                self.index.modules[dep.index()].name == reference.module_name()
            });

        let resolved = if visible {
            self.provider
                .resolve(reference)
                .and_then(|handle| self.handles.get(&handle).copied())
        } else {
            None
        };

        match resolved {
            Some(id) => {
                trace!(reference = %reference, from = %self.index.paths[from.index()], "resolved reference");
                Ok(Some(id))
            }
            None => {
                ctx.unresolved(IndexError::unresolved_reference(
                    reference.to_string(),
                    self.index.paths[from.index()].clone(),
                ))?;
                Ok(None)
            }
        }
    }
}
