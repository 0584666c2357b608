//! Who derives from whom: subclassing, interface implementation, member
//! overrides and the accessor/parameter pairings they imply.

use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{HierarchyError, Result};
use crate::index::SymbolIndex;
use crate::model::{DeclId, DeclKind, Declaration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derived {
    pub decl: DeclId,
    /// The declaration it was reached from.
    pub via: DeclId,
    pub depth: usize,
}

#[derive(Debug, Clone)]
pub struct DerivationIndex {
    edges: IndexMap<DeclId, IndexSet<DeclId>>,
    max_depth: usize,
}

impl DerivationIndex {
    pub fn build(index: &SymbolIndex, max_depth: usize) -> Result<Self> {
        let mut derivation = Self {
            edges: IndexMap::new(),
            max_depth,
        };

        check_acyclic(index)?;

        for decl in index.walk().filter(|d| d.kind == DeclKind::Type) {
            for supertype in decl.base.iter().chain(&decl.interfaces) {
                derivation.add(*supertype, decl.id);
            }
        }

        for decl in index.walk() {
            if !is_override_candidate(index, decl) {
                continue;
            }
            for overridden in overridden_members(index, decl.id) {
                derivation.add(overridden, decl.id);
                derivation.pair_children(index, overridden, decl.id);
            }
        }

        debug!(
            bases = derivation.edges.len(),
            edges = derivation.edge_count(),
            "built derivation index"
        );
        Ok(derivation)
    }

    /// Declarations deriving directly from `id`.
    pub fn derived(&self, id: DeclId) -> impl Iterator<Item = DeclId> + '_ {
        self.edges.get(&id).into_iter().flatten().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    /// Everything transitively derived from `root`, depth first, each declaration once.
    pub fn walk(&self, index: &SymbolIndex, root: DeclId) -> Result<Vec<Derived>> {
        let mut found = Vec::new();
        let mut visited = HashSet::from([root]);
        let mut path = vec![root];
        self.walk_from(index, &mut path, &mut visited, &mut found)?;
        Ok(found)
    }

    fn walk_from(
        &self,
        index: &SymbolIndex,
        path: &mut Vec<DeclId>,
        visited: &mut HashSet<DeclId>,
        found: &mut Vec<Derived>,
    ) -> Result<()> {
        let Some(&current) = path.last() else {
            return Ok(());
        };

        for next in self.derived(current) {
            if path.contains(&next) {
                let mut cycle: Vec<String> = path.iter().map(|id| index.path(*id).to_string()).collect();
                cycle.push(index.path(next).to_string());
                return Err(HierarchyError::cyclic(index.path(next), cycle).into());
            }
            if !visited.insert(next) {
                continue;
            }
            if path.len() > self.max_depth {
                return Err(HierarchyError::depth_exceeded(index.path(path[0]), self.max_depth).into());
            }

            found.push(Derived {
                decl: next,
                via: current,
                depth: path.len(),
            });
            path.push(next);
            self.walk_from(index, path, visited, found)?;
            path.pop();
        }
        Ok(())
    }

    fn add(&mut self, base: DeclId, derived: DeclId) {
        if base != derived {
            self.edges.entry(base).or_default().insert(derived);
        }
    }

    /// Accessors pair by name; parameters by position; return slots with each other.
    fn pair_children(&mut self, index: &SymbolIndex, base: DeclId, derived: DeclId) {
        let base_decl = index.get(base);
        let derived_decl = index.get(derived);

        match derived_decl.kind {
            DeclKind::Property | DeclKind::Event => {
                for &accessor in &derived_decl.children {
                    let name = &index.get(accessor).name;
                    let paired = base_decl
                        .children
                        .iter()
                        .copied()
                        .find(|c| index.get(*c).name == *name);
                    if let Some(paired) = paired {
                        self.add(paired, accessor);
                        self.pair_children(index, paired, accessor);
                    }
                }
            }
            DeclKind::Method => {
                let base_params = children_of_kind(index, base_decl, DeclKind::Parameter);
                let derived_params = children_of_kind(index, derived_decl, DeclKind::Parameter);
                for (b, d) in base_params.into_iter().zip(derived_params) {
                    self.add(b, d);
                }

                let base_return = children_of_kind(index, base_decl, DeclKind::ReturnSlot);
                let derived_return = children_of_kind(index, derived_decl, DeclKind::ReturnSlot);
                if let (Some(b), Some(d)) = (base_return.first(), derived_return.first()) {
                    self.add(*b, *d);
                }
            }
            _ => {}
        }
    }
}

fn children_of_kind(index: &SymbolIndex, decl: &Declaration, kind: DeclKind) -> Vec<DeclId> {
    decl.children
        .iter()
        .copied()
        .filter(|c| index.get(*c).kind == kind)
        .collect()
}

fn is_override_candidate(index: &SymbolIndex, decl: &Declaration) -> bool {
    decl.kind.is_overridable()
        && !decl.is_static
        && !index.is_accessor(decl.id)
        && decl
            .parent
            .is_some_and(|p| index.get(p).kind == DeclKind::Type)
}

/// Members `member` overrides: the nearest match up the base chain, and the
/// matching member of every implemented interface.
fn overridden_members(index: &SymbolIndex, member: DeclId) -> Vec<DeclId> {
    let decl = index.get(member);
    let Some(owner) = decl.parent else {
        return Vec::new();
    };
    let owner = index.get(owner);

    let mut found = Vec::new();
    if let Some(base) = nearest_base_match(index, owner, decl) {
        found.push(base);
    }

    let mut seen = HashSet::new();
    let mut pending: Vec<DeclId> = owner.interfaces.clone();
    while let Some(interface) = pending.pop() {
        if !seen.insert(interface) {
            continue;
        }
        let interface_decl = index.get(interface);
        if let Some(matched) = matching_member(index, interface_decl, decl) {
            found.push(matched);
        }
        pending.extend(interface_decl.interfaces.iter().copied());
    }
    found
}

fn nearest_base_match(index: &SymbolIndex, owner: &Declaration, member: &Declaration) -> Option<DeclId> {
    let mut seen = HashSet::from([owner.id]);
    let mut current = owner.base;
    while let Some(base) = current {
        if !seen.insert(base) {
            return None;
        }
        let base_decl = index.get(base);
        if let Some(matched) = matching_member(index, base_decl, member) {
            // a non-overridable match hides everything further up
            return is_overridable(index, matched).then_some(matched);
        }
        current = base_decl.base;
    }
    None
}

fn is_overridable(index: &SymbolIndex, member: DeclId) -> bool {
    let decl = index.get(member);
    let owner_is_interface = decl.parent.is_some_and(|p| index.get(p).is_interface);
    decl.is_overridable_by(owner_is_interface) || overrides_base_member(index, decl)
}

/// Implementing an interface member alone does not unseal a method; only an
/// override of a base-class member does.
fn overrides_base_member(index: &SymbolIndex, member: &Declaration) -> bool {
    member
        .parent
        .is_some_and(|owner| nearest_base_match(index, index.get(owner), member).is_some())
}

fn matching_member(index: &SymbolIndex, owner: &Declaration, member: &Declaration) -> Option<DeclId> {
    owner.children.iter().copied().find(|c| {
        let candidate = index.get(*c);
        candidate.kind == member.kind
            && candidate.name == member.name
            && candidate.signature == member.signature
            && !candidate.is_static
    })
}

/// Fails on the first supertype cycle, naming the declarations along it.
fn check_acyclic(index: &SymbolIndex) -> Result<()> {
    let mut done = HashSet::new();
    for decl in index.walk().filter(|d| d.kind == DeclKind::Type) {
        let mut path = Vec::new();
        visit_supertypes(index, decl.id, &mut path, &mut done)?;
    }
    Ok(())
}

fn visit_supertypes(
    index: &SymbolIndex,
    id: DeclId,
    path: &mut Vec<DeclId>,
    done: &mut HashSet<DeclId>,
) -> Result<()> {
    if done.contains(&id) {
        return Ok(());
    }
    if let Some(start) = path.iter().position(|p| *p == id) {
        let mut cycle: Vec<String> = path[start..]
            .iter()
            .map(|p| index.path(*p).to_string())
            .collect();
        cycle.push(index.path(id).to_string());
        return Err(HierarchyError::cyclic(index.path(id), cycle).into());
    }

    path.push(id);
    let decl = index.get(id);
    for supertype in decl.base.iter().chain(&decl.interfaces) {
        visit_supertypes(index, *supertype, path, done)?;
    }
    path.pop();
    done.insert(id);
    Ok(())
}
