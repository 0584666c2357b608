//! The host's side of the contract: a navigable declaration graph.

pub mod graph;
pub mod loader;

pub use graph::{DeclSpec, GraphDocument, ModelGraph, ModuleSpec, NodeId};
pub use loader::{load_graph, load_graph_dir, load_workspace, WorkspaceManifest};

use std::fmt::Debug;
use std::hash::Hash;

use crate::model::{DeclRef, DeclarationInfo, RawAnnotation, Supertypes};

/// Source of declarations for one resolution pass.
///
/// Handles are opaque to the resolver; it only compares and hashes them. Every
/// declaration must be reachable through `children` from exactly one root module.
pub trait DeclarationProvider {
    type Handle: Copy + Eq + Hash + Debug;

    fn root_modules(&self) -> Vec<Self::Handle>;

    fn info(&self, handle: Self::Handle) -> DeclarationInfo;

    fn children(&self, handle: Self::Handle) -> Vec<Self::Handle>;

    fn annotations(&self, handle: Self::Handle) -> Vec<RawAnnotation>;

    fn supertypes(&self, handle: Self::Handle) -> Supertypes;

    /// Names of the modules `module` states it depends on.
    fn dependencies(&self, module: Self::Handle) -> Vec<String>;

    fn resolve(&self, reference: &DeclRef) -> Option<Self::Handle>;

    /// Compiler-synthesized code. Descendants of a generated declaration are
    /// treated as generated whatever this returns for them.
    fn is_generated(&self, handle: Self::Handle) -> bool;
}
