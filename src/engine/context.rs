//! State threaded through one resolution pass.
//!
//! Owns the two sequence counters and collects the warnings raised for
//! references that could not be resolved.
use tracing::warn;

use super::directive::Sequence;
use crate::config::ResolverConfig;
use crate::error::{Error, IndexError, Result};

pub struct ResolutionContext<'a> {
    config: &'a ResolverConfig,

    /// Next direct sequence number; counts up from zero
    next_direct: i64,

    /// Next inherited sequence number; counts up from `i64::MIN` and never reaches zero
    next_inherited: i64,

    warnings: Vec<String>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self {
            config,
            next_direct: 0,
            next_inherited: i64::MIN,
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        self.config
    }

    pub fn next_direct(&mut self) -> Result<Sequence> {
        let sequence = self.next_direct;
        self.next_direct = sequence
            .checked_add(1)
            .ok_or_else(|| Error::invariant("direct sequence counter exhausted"))?;
        Ok(Sequence(sequence))
    }

    pub fn next_inherited(&mut self) -> Result<Sequence> {
        let sequence = self.next_inherited;
        if sequence >= 0 {
            return Err(Error::invariant("inherited sequence counter exhausted"));
        }
        self.next_inherited = sequence + 1;
        Ok(Sequence(sequence))
    }

    /// Records an unresolved reference. Fatal in strict mode, a warning otherwise.
    pub fn unresolved(&mut self, err: IndexError) -> Result<()> {
        if self.config.strict_references {
            return Err(err.into());
        }
        warn!(error = %err, "skipping unresolved reference");
        self.warnings.push(err.to_string());
        Ok(())
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    #[cfg(test)]
    pub(crate) fn seed_inherited(&mut self, value: i64) {
        self.next_inherited = value;
    }
}
