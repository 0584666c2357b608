use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use super::directive::Directive;
use crate::model::DeclId;

/// Append-only `target -> directives` lists, in the order pairs arrive.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    lists: IndexMap<DeclId, Vec<Arc<Directive>>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: DeclId, directive: Arc<Directive>) {
        self.lists.entry(target).or_default().push(directive);
    }

    pub fn extend<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (Arc<Directive>, DeclId)>,
    {
        for (directive, target) in pairs {
            self.push(target, directive);
        }
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Deduplicates, orders and applies exclusions to every list, then freezes them.
    pub fn finalize(self) -> ResolvedDirectives {
        let accumulated = self.lists.len();
        let lists: IndexMap<DeclId, Box<[Arc<Directive>]>> = self
            .lists
            .into_iter()
            .map(|(target, list)| (target, finalize_list(list)))
            .filter(|(_, list)| !list.is_empty())
            .map(|(target, list)| (target, list.into_boxed_slice()))
            .collect();

        debug!(accumulated, resolved = lists.len(), "finalized target registry");
        ResolvedDirectives { lists }
    }
}

fn finalize_list(mut list: Vec<Arc<Directive>>) -> Vec<Arc<Directive>> {
    let mut seen = HashSet::new();
    list.retain(|d| seen.insert(d.identity()));

    list.sort_by_key(|d| d.priority);

    while let Some(position) = list.iter().position(|d| d.exclude) {
        let excluded = list[position].annotation_type;
        list.retain(|d| d.annotation_type != excluded);
    }

    let mut last_single: HashMap<DeclId, usize> = HashMap::new();
    for (position, directive) in list.iter().enumerate() {
        if !directive.allow_multiple {
            last_single.insert(directive.annotation_type, position);
        }
    }
    list.into_iter()
        .enumerate()
        .filter(|(position, d)| {
            d.allow_multiple || last_single.get(&d.annotation_type) == Some(position)
        })
        .map(|(_, d)| d)
        .collect()
}

/// Frozen per-target directive lists. Safe to share across threads for reads.
#[derive(Debug, Default, Clone)]
pub struct ResolvedDirectives {
    lists: IndexMap<DeclId, Box<[Arc<Directive>]>>,
}

impl ResolvedDirectives {
    pub fn resolve(&self, target: DeclId) -> &[Arc<Directive>] {
        self.lists.get(&target).map(|list| &list[..]).unwrap_or(&[])
    }

    /// Targets with at least one directive, in accumulation order.
    pub fn targets(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.lists.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &[Arc<Directive>])> {
        self.lists.iter().map(|(target, list)| (*target, &list[..]))
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
