use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::error::{DownstreamError, Result};
use crate::index::SymbolIndex;
use crate::model::{DeclId, ModuleId};

/// Stable handle for a declaration imported into a module's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportToken(usize);

impl ImportToken {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Import tables built on demand while rewriting, one coarse lock per module.
pub struct ModuleImports {
    tables: Vec<Mutex<IndexSet<DeclId>>>,
    names: Vec<String>,
}

impl ModuleImports {
    pub fn new(index: &SymbolIndex) -> Self {
        Self {
            tables: index
                .modules()
                .iter()
                .map(|_| Mutex::new(IndexSet::new()))
                .collect(),
            names: index.modules().iter().map(|m| m.name.clone()).collect(),
        }
    }

    /// Imports `decl` into `module`, returning the existing token when already imported.
    pub fn import(&self, module: ModuleId, decl: DeclId) -> Result<ImportToken> {
        let table = self.table(module)?;
        let (position, _) = table.lock().insert_full(decl);
        Ok(ImportToken(position))
    }

    pub fn imported(&self, module: ModuleId) -> Result<Vec<DeclId>> {
        let table = self.table(module)?;
        let imported = table.lock().iter().copied().collect();
        Ok(imported)
    }

    fn table(&self, module: ModuleId) -> Result<&Mutex<IndexSet<DeclId>>> {
        self.tables.get(module.index()).ok_or_else(|| {
            let name = self
                .names
                .get(module.index())
                .cloned()
                .unwrap_or_else(|| format!("module {}", module.index()));
            DownstreamError::untracked(name).into()
        })
    }
}
