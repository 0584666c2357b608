use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DownstreamError, Result};
use crate::index::SymbolIndex;
use crate::model::{DeclId, DeclKind};

/// Per-type results where each type's value is computed from its base type's.
///
/// `get_or_compute` takes the locks of the base chain root first, one at a time,
/// so a derived type always sees its ancestors' results and workers racing on a
/// shared ancestor cannot deadlock.
pub struct InheritedResults<T> {
    slots: HashMap<DeclId, Mutex<Option<Arc<T>>>>,
}

impl<T> InheritedResults<T> {
    pub fn new(index: &SymbolIndex) -> Self {
        let slots = index
            .walk()
            .filter(|d| d.kind == DeclKind::Type)
            .map(|d| (d.id, Mutex::new(None)))
            .collect();
        Self { slots }
    }

    pub fn get(&self, ty: DeclId) -> Option<Arc<T>> {
        self.slots.get(&ty).and_then(|slot| slot.lock().clone())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Computes every missing result along the base chain of `ty`. `compute`
    /// receives the type and its base type's result, if it has a base.
    pub fn get_or_compute<F>(&self, index: &SymbolIndex, ty: DeclId, compute: F) -> Result<Arc<T>>
    where
        F: Fn(DeclId, Option<&T>) -> anyhow::Result<T>,
    {
        let tracked = self.slots.contains_key(&ty) && index.try_get(ty).is_some();
        if !tracked {
            let name = index
                .try_get(ty)
                .map_or_else(|| ty.to_string(), |d| index.path(d.id).to_string());
            return Err(DownstreamError::untracked(name).into());
        }

        let mut base: Option<Arc<T>> = None;
        for id in index.base_chain(ty) {
            let slot = self
                .slots
                .get(&id)
                .ok_or_else(|| DownstreamError::untracked(index.path(id)))?;

            let mut guard = slot.lock();
            let value = match guard.as_ref() {
                Some(done) => Arc::clone(done),
                None => {
                    let computed = compute(id, base.as_deref()).map_err(|e| {
                        DownstreamError::worker_failed(index.path(id), format!("{e:#}"))
                    })?;
                    let computed = Arc::new(computed);
                    *guard = Some(Arc::clone(&computed));
                    computed
                }
            };
            drop(guard);
            base = Some(value);
        }

        base.ok_or_else(|| DownstreamError::untracked(index.path(ty)).into())
    }
}
