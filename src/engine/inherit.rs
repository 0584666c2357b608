use std::sync::Arc;
use tracing::{debug, trace};

use super::context::ResolutionContext;
use super::derivation::DerivationIndex;
use super::directive::Directive;
use crate::error::Result;
use crate::index::SymbolIndex;
use crate::model::{DeclId, InheritanceMode};

/// Copies inheritable directives onto everything that derives from their target.
pub struct InheritancePropagator<'a> {
    index: &'a SymbolIndex,
    derivation: &'a DerivationIndex,
}

impl<'a> InheritancePropagator<'a> {
    pub fn new(index: &'a SymbolIndex, derivation: &'a DerivationIndex) -> Self {
        Self { index, derivation }
    }

    /// First round: directives attached where they were written.
    pub fn propagate(
        &self,
        directives: &[Arc<Directive>],
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Vec<Arc<Directive>>> {
        let mut inherited = Vec::new();
        for directive in directives {
            if directive.inheritance == InheritanceMode::None {
                continue;
            }
            self.copy_below(directive, directive.target, ctx, &mut inherited)?;
        }

        debug!(count = inherited.len(), "propagated directives through inheritance");
        Ok(inherited)
    }

    /// Second round: declarations a direct directive reached by multicast, so a
    /// type-level directive follows the overrides of the members it matched.
    pub fn propagate_matches(
        &self,
        matches: &[(Arc<Directive>, DeclId)],
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Vec<Arc<Directive>>> {
        let mut inherited = Vec::new();
        for (directive, target) in matches {
            if directive.inheritance == InheritanceMode::None
                || directive.is_inherited()
                || *target == directive.target
            {
                continue;
            }
            self.copy_below(directive, *target, ctx, &mut inherited)?;
        }

        debug!(count = inherited.len(), "propagated multicast matches through inheritance");
        Ok(inherited)
    }

    fn copy_below(
        &self,
        directive: &Directive,
        from: DeclId,
        ctx: &mut ResolutionContext<'_>,
        out: &mut Vec<Arc<Directive>>,
    ) -> Result<()> {
        for derived in self.derivation.walk(self.index, from)? {
            let copy = directive.inherited_onto(derived.decl, ctx.next_inherited()?);
            trace!(
                origin = self.index.path(directive.origin),
                target = self.index.path(derived.decl),
                depth = derived.depth,
                sequence = %copy.sequence,
                "inherited directive"
            );
            out.push(Arc::new(copy));
        }
        Ok(())
    }
}
