pub mod context;
pub mod derivation;
pub mod directive;
pub mod extract;
pub mod inherit;
pub mod matcher;
pub mod pattern;
pub mod registry;

pub use context::ResolutionContext;
pub use derivation::{DerivationIndex, Derived};
pub use directive::{Directive, DirectiveIdentity, Sequence};
pub use extract::DirectiveExtractor;
pub use inherit::InheritancePropagator;
pub use matcher::ContainmentMatcher;
pub use pattern::NamePattern;
pub use registry::{ResolvedDirectives, TargetRegistry};

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::error::{IndexError, Result};
use crate::index::SymbolIndex;
use crate::model::{DeclId, DeclRef};
use crate::provider::DeclarationProvider;

/// Runs the whole pass: index, extract, derive, propagate, match, finalize.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve<P: DeclarationProvider>(&self, provider: &P) -> Result<Resolution> {
        let mut ctx = ResolutionContext::new(&self.config);

        let index = SymbolIndex::build(provider, &mut ctx)?;
        let marker = index.find_ref(&self.config.marker).ok_or_else(|| {
            IndexError::unresolved_reference(self.config.marker.to_string(), "resolver configuration")
        })?;

        let directs = DirectiveExtractor::new(&index, marker).extract(&mut ctx)?;
        let derivation = DerivationIndex::build(&index, self.config.max_inheritance_depth)?;
        let propagator = InheritancePropagator::new(&index, &derivation);
        let matcher = ContainmentMatcher::new(&index);

        let mut inherited = propagator.propagate(&directs, &mut ctx)?;

        let direct_matches = expand_all(&matcher, &directs)?;
        inherited.extend(propagator.propagate_matches(&direct_matches, &mut ctx)?);

        let mut inherited_matches = expand_all(&matcher, &inherited)?;
        inherited_matches.sort_by_key(|(directive, _)| directive.sequence);

        let mut registry = TargetRegistry::new();
        registry.extend(inherited_matches);
        registry.extend(direct_matches);
        let directives = registry.finalize();

        let warnings = ctx.into_warnings();
        info!(
            declarations = index.len(),
            directives = directs.len(),
            inherited = inherited.len(),
            targets = directives.len(),
            warnings = warnings.len(),
            "resolution complete"
        );

        Ok(Resolution {
            index,
            directives,
            warnings,
        })
    }
}

fn expand_all(
    matcher: &ContainmentMatcher<'_>,
    directives: &[Arc<Directive>],
) -> Result<Vec<(Arc<Directive>, DeclId)>> {
    let mut pairs = Vec::new();
    for directive in directives {
        for target in matcher.expand(directive)? {
            pairs.push((Arc::clone(directive), target));
        }
    }
    debug!(directives = directives.len(), pairs = pairs.len(), "expanded directives");
    Ok(pairs)
}

pub struct ResolverBuilder {
    config: ResolverConfig,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_marker(mut self, marker: DeclRef) -> Self {
        self.config.marker = marker;
        self
    }

    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.config.strict_references = strict;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_inheritance_depth = depth;
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            config: self.config,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of one completed pass. Read-only; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Resolution {
    index: SymbolIndex,
    directives: ResolvedDirectives,
    warnings: Vec<String>,
}

impl Resolution {
    pub fn resolve(&self, declaration: DeclId) -> &[Arc<Directive>] {
        self.directives.resolve(declaration)
    }

    pub fn resolve_path(&self, path: &str) -> std::result::Result<&[Arc<Directive>], IndexError> {
        let id = self.index.lookup(path)?;
        Ok(self.resolve(id))
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn directives(&self) -> &ResolvedDirectives {
        &self.directives
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Every target's final list as JSON, for inspection and golden tests.
    pub fn report(&self) -> Value {
        let targets: Vec<Value> = self
            .directives
            .iter()
            .map(|(target, list)| {
                let entries: Vec<Value> = list
                    .iter()
                    .map(|d| {
                        json!({
                            "annotation": self.index.path(d.annotation_type),
                            "origin": self.index.path(d.origin),
                            "priority": d.priority,
                            "sequence": d.sequence.value(),
                            "inherited": d.is_inherited(),
                            "exclude": d.exclude,
                        })
                    })
                    .collect();
                json!({
                    "target": self.index.path(target),
                    "directives": entries,
                })
            })
            .collect();
        Value::Array(targets)
    }
}
