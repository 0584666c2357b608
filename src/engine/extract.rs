use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

use super::context::ResolutionContext;
use super::directive::Directive;
use super::pattern::NamePattern;
use crate::error::{DirectiveError, Result};
use crate::index::SymbolIndex;
use crate::model::{
    split_names, AnnotationSchema, ArgValue, AttachedAnnotation, DeclId, Declaration,
    InheritanceMode, Qualifiers, TargetKinds,
};

const TARGETS: &str = "targets";
const TARGET_TYPES: &str = "target_types";
const TARGET_MEMBERS: &str = "target_members";
const TARGET_PARAMETERS: &str = "target_parameters";
const TARGET_QUALIFIERS: &str = "target_qualifiers";
const TARGET_EXTERNAL_QUALIFIERS: &str = "target_external_qualifiers";
const INHERITANCE: &str = "inheritance";
const EXCLUDE: &str = "exclude";
const PRIORITY: &str = "priority";

/// Turns the annotations attached in the index into direct directives.
pub struct DirectiveExtractor<'i> {
    index: &'i SymbolIndex,
    marker: DeclId,
    recognized: HashMap<DeclId, bool>,
}

impl<'i> DirectiveExtractor<'i> {
    pub fn new(index: &'i SymbolIndex, marker: DeclId) -> Self {
        Self {
            index,
            marker,
            recognized: HashMap::new(),
        }
    }

    /// Directives in containment order, each with a fresh direct sequence number.
    pub fn extract(&mut self, ctx: &mut ResolutionContext<'_>) -> Result<Vec<Arc<Directive>>> {
        let index = self.index;
        let mut directives = Vec::new();

        for decl in index.walk() {
            if decl.is_generated {
                continue;
            }
            for attached in &decl.annotations {
                if !self.is_directive_type(attached.annotation_type) {
                    trace!(
                        declaration = index.path(decl.id),
                        annotation = %attached.raw.annotation_type,
                        "ignoring annotation that is not a directive"
                    );
                    continue;
                }
                let directive = self.build(decl, attached, ctx)?;
                directives.push(Arc::new(directive));
            }
        }

        debug!(count = directives.len(), "extracted direct directives");
        Ok(directives)
    }

    /// True when the supertype chain of `ty` reaches the marker.
    pub fn is_directive_type(&mut self, ty: DeclId) -> bool {
        if let Some(known) = self.recognized.get(&ty) {
            return *known;
        }

        let mut seen = HashSet::new();
        let mut current = Some(ty);
        let mut found = false;
        while let Some(candidate) = current {
            if candidate == self.marker {
                found = true;
                break;
            }
            if !seen.insert(candidate) {
                break;
            }
            current = self.index.get(candidate).base;
        }

        self.recognized.insert(ty, found);
        found
    }

    /// Schema of the annotation type, or of its nearest base that declares one.
    fn schema(&self, ty: DeclId) -> AnnotationSchema {
        self.index
            .base_chain(ty)
            .into_iter()
            .rev()
            .find_map(|id| self.index.get(id).schema.clone())
            .unwrap_or_default()
    }

    fn build(
        &self,
        decl: &Declaration,
        attached: &AttachedAnnotation,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Directive> {
        let origin = self.index.path(decl.id);
        let schema = self.schema(attached.annotation_type);
        let arguments = bind(origin, &schema, attached)?;
        let usage = &schema.usage;

        let requested = match arguments.get(TARGETS) {
            Some(value) => {
                let names = names(origin, value, TARGETS, "a kind name or list")?;
                TargetKinds::from_names(names)
                    .map_err(|message| DirectiveError::invalid_argument(origin, TARGETS, message))?
            }
            None => usage.valid_on,
        };
        let targets = requested & usage.valid_on;
        if targets.is_empty() {
            return Err(DirectiveError::malformed(
                origin,
                format!(
                    "no requested target kind is valid for this annotation (valid on: {})",
                    usage.valid_on.names().join(", ")
                ),
            )
            .into());
        }

        let local_qualifiers = qualifiers(origin, &arguments, TARGET_QUALIFIERS)?;
        let external_qualifiers = if arguments.contains_key(TARGET_EXTERNAL_QUALIFIERS) {
            qualifiers(origin, &arguments, TARGET_EXTERNAL_QUALIFIERS)?
        } else {
            local_qualifiers
        };

        let inheritance = match arguments.get(INHERITANCE) {
            Some(value) => value
                .as_str()
                .and_then(InheritanceMode::from_name)
                .ok_or_else(|| expects(origin, INHERITANCE, "none, multicast or inherit", value))?,
            None => usage.inheritance,
        };

        let exclude = match arguments.get(EXCLUDE) {
            Some(value) => value
                .as_bool()
                .ok_or_else(|| expects(origin, EXCLUDE, "a boolean", value))?,
            None => false,
        };

        let priority = match arguments.get(PRIORITY) {
            Some(value) => value
                .as_int()
                .and_then(|p| i32::try_from(p).ok())
                .ok_or_else(|| expects(origin, PRIORITY, "a 32-bit integer", value))?,
            None => 0,
        };

        let directive = Directive {
            origin: decl.id,
            origin_kind: decl.kind,
            target: decl.id,
            annotation_type: attached.annotation_type,
            annotation_module: self.index.get(attached.annotation_type).module,
            slot: attached.slot,
            targets,
            local_qualifiers,
            external_qualifiers,
            type_pattern: pattern(origin, &arguments, TARGET_TYPES)?,
            member_pattern: pattern(origin, &arguments, TARGET_MEMBERS)?,
            parameter_pattern: pattern(origin, &arguments, TARGET_PARAMETERS)?,
            inheritance,
            exclude,
            priority,
            allow_multiple: usage.allow_multiple,
            sequence: ctx.next_direct()?,
            annotation: Arc::clone(&attached.raw),
            arguments,
        };

        trace!(
            origin,
            annotation = %attached.raw.annotation_type,
            sequence = %directive.sequence,
            "extracted directive"
        );
        Ok(directive)
    }
}

/// Positional arguments bind to constructor parameters in order; named ones override.
fn bind(
    origin: &str,
    schema: &AnnotationSchema,
    attached: &AttachedAnnotation,
) -> std::result::Result<IndexMap<String, ArgValue>, DirectiveError> {
    let raw = &attached.raw;
    if raw.args.len() > schema.constructor.len() {
        return Err(DirectiveError::malformed(
            origin,
            format!(
                "expected at most {} positional arguments, got {}",
                schema.constructor.len(),
                raw.args.len()
            ),
        ));
    }

    let mut bound: IndexMap<String, ArgValue> = schema
        .constructor
        .iter()
        .cloned()
        .zip(raw.args.iter().cloned())
        .collect();
    for (name, value) in &raw.named {
        bound.insert(name.clone(), value.clone());
    }

    if let Some(missing) = schema
        .constructor
        .iter()
        .find(|name| !bound.contains_key(name.as_str()))
    {
        return Err(DirectiveError::missing_argument(origin, missing.as_str()));
    }
    Ok(bound)
}

fn pattern(
    origin: &str,
    arguments: &IndexMap<String, ArgValue>,
    name: &str,
) -> std::result::Result<NamePattern, DirectiveError> {
    match arguments.get(name) {
        Some(value) => {
            let source = value
                .as_str()
                .ok_or_else(|| expects(origin, name, "a pattern string", value))?;
            NamePattern::parse(source)
                .map_err(|message| DirectiveError::invalid_pattern(origin, source, message))
        }
        None => Ok(NamePattern::any()),
    }
}

fn qualifiers(
    origin: &str,
    arguments: &IndexMap<String, ArgValue>,
    name: &str,
) -> std::result::Result<Qualifiers, DirectiveError> {
    match arguments.get(name) {
        Some(value) => {
            let names = names(origin, value, name, "a qualifier name or list")?;
            Qualifiers::from_names(names)
                .map_err(|message| DirectiveError::invalid_argument(origin, name, message))
        }
        None => Ok(Qualifiers::empty()),
    }
}

/// Names from a `"a|b"` string or a list of such strings.
fn names<'v>(
    origin: &str,
    value: &'v ArgValue,
    argument: &str,
    expected: &str,
) -> std::result::Result<Vec<&'v str>, DirectiveError> {
    let items = value
        .as_strings()
        .ok_or_else(|| expects(origin, argument, expected, value))?;
    Ok(items.into_iter().flat_map(split_names).collect())
}

fn expects(origin: &str, argument: &str, expected: &str, found: &ArgValue) -> DirectiveError {
    DirectiveError::invalid_argument(
        origin,
        argument,
        format!("expects {expected}, found {}", found.type_name()),
    )
}
