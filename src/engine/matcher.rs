use tracing::trace;

use super::directive::Directive;
use crate::error::{Error, Result};
use crate::index::SymbolIndex;
use crate::model::{DeclId, DeclKind, Declaration, Qualifiers, TargetKinds};

/// Finds the declarations a directive lands on below its target.
pub struct ContainmentMatcher<'i> {
    index: &'i SymbolIndex,
}

impl<'i> ContainmentMatcher<'i> {
    pub fn new(index: &'i SymbolIndex) -> Self {
        Self { index }
    }

    /// Every accepted declaration, in containment preorder. A directive that is
    /// not eligible for multicast can only land on its own target.
    pub fn expand(&self, directive: &Directive) -> Result<Vec<DeclId>> {
        let mut matched = Vec::new();
        if directive.is_multicast_eligible() {
            self.visit(directive, directive.target, &mut matched)?;
        } else if self.admits(directive, self.index.get(directive.target))? {
            matched.push(directive.target);
        }

        trace!(
            origin = self.index.path(directive.origin),
            target = self.index.path(directive.target),
            matched = matched.len(),
            "expanded directive"
        );
        Ok(matched)
    }

    fn visit(&self, directive: &Directive, id: DeclId, matched: &mut Vec<DeclId>) -> Result<()> {
        let decl = self.index.get(id);
        let own = TargetKinds::of(decl.kind);
        let below = TargetKinds::below(decl.kind);
        if !directive.targets.intersects(own | below) {
            return Ok(());
        }

        let mask = self.mask(directive, decl);
        if decl.is_generated && !mask.contains(Qualifiers::GENERATED) {
            return Ok(());
        }

        if !self.name_matches(directive, decl) {
            // nested types carry their own name
            if decl.kind == DeclKind::Type {
                for &child in &decl.children {
                    if self.index.get(child).kind == DeclKind::Type {
                        self.visit(directive, child, matched)?;
                    }
                }
            }
            return Ok(());
        }

        if directive.targets.intersects(own) && self.classify_and_accept(mask, id)? {
            matched.push(id);
        }

        if directive.targets.intersects(below) {
            for &child in &decl.children {
                self.visit(directive, child, matched)?;
            }
        }
        Ok(())
    }

    /// All checks for a single declaration, without descending.
    fn admits(&self, directive: &Directive, decl: &Declaration) -> Result<bool> {
        if !directive.targets.intersects(TargetKinds::of(decl.kind)) {
            return Ok(false);
        }
        if !self.name_matches(directive, decl) {
            return Ok(false);
        }
        self.classify_and_accept(self.mask(directive, decl), decl.id)
    }

    fn mask(&self, directive: &Directive, decl: &Declaration) -> Qualifiers {
        directive
            .qualifiers_for(decl.module == directive.annotation_module)
            .normalized()
    }

    fn classify_and_accept(&self, mask: Qualifiers, id: DeclId) -> Result<bool> {
        let classification = self.index.qualifiers(id);
        if !classification.is_classification() {
            return Err(Error::invariant(format!(
                "incomplete classification {:?} for '{}'",
                classification,
                self.index.path(id)
            )));
        }
        Ok(mask.accepts(classification))
    }

    fn name_matches(&self, directive: &Directive, decl: &Declaration) -> bool {
        match decl.kind {
            DeclKind::Type => directive
                .type_pattern
                .matches(&self.index.type_name(decl.id)),
            // accessors were checked through their owner
            DeclKind::Method if self.index.is_accessor(decl.id) => true,
            DeclKind::Method | DeclKind::Property | DeclKind::Event | DeclKind::Field => {
                directive.member_pattern.matches(&decl.name)
            }
            DeclKind::Parameter => directive.parameter_pattern.matches(&decl.name),
            DeclKind::Module | DeclKind::ReturnSlot => true,
        }
    }
}
