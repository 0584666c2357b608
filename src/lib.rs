//! Directive Resolver
//!
//! Resolves which instrumentation directives apply to each declaration of a
//! multi-module symbol graph. Directives attach directly, multicast down the
//! containment tree, and follow inheritance to derived declarations; the result
//! is a frozen, deterministically ordered list per declaration.

pub mod config;
pub mod downstream;
pub mod engine;
pub mod error;
pub mod index;
pub mod logging;
pub mod model;
pub mod provider;

pub use config::ResolverConfig;
pub use engine::{Directive, Resolution, Resolver, ResolverBuilder};
pub use error::{Error, Result};
pub use index::SymbolIndex;
pub use model::{DeclId, DeclKind, DeclRef, InheritanceMode, Qualifiers, TargetKinds};
pub use provider::{DeclarationProvider, ModelGraph};
