//! Concurrent consumption of a finished resolution by the rewriting stage.

pub mod cache;
pub mod locks;

pub use cache::{ImportToken, ModuleImports};
pub use locks::InheritedResults;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::engine::Resolution;
use crate::error::{DownstreamError, Result};
use crate::model::DeclId;

/// Runs `work` once per top-level type on the rayon pool.
///
/// Results come back in containment order. The first failing worker fails the
/// whole run; no partial output is returned.
pub fn consume_parallel<R, F>(resolution: &Resolution, work: F) -> Result<Vec<(DeclId, R)>>
where
    R: Send,
    F: Fn(&Resolution, DeclId) -> anyhow::Result<R> + Send + Sync,
{
    let types = resolution.index().top_level_types();
    debug!(types = types.len(), "consuming resolution in parallel");

    let results = types
        .par_iter()
        .map(|&ty| {
            work(resolution, ty).map(|value| (ty, value)).map_err(|e| {
                let declaration = resolution.index().path(ty);
                warn!(declaration, error = %e, "downstream worker failed");
                DownstreamError::worker_failed(declaration, format!("{e:#}"))
            })
        })
        .collect::<std::result::Result<Vec<_>, DownstreamError>>()?;

    Ok(results)
}
