use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::graph::{GraphDocument, ModelGraph, ModuleSpec};
use crate::config::ResolverConfig;
use crate::error::LoaderError;

const WORKSPACE_FILES: [&str; 3] = ["workspace.yaml", "workspace.yml", "workspace.json"];

/// Points at the pieces of an on-disk workspace, relative to the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceManifest {
    #[serde(default)]
    pub config: Option<PathBuf>,

    #[serde(default = "default_modules_dir")]
    pub modules: PathBuf,
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("modules")
}

/// Reads a JSON or YAML document, picking the format from the extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoaderError> {
    debug!(path = %path.display(), "reading document");

    let content =
        fs::read_to_string(path).map_err(|e| LoaderError::read_error(path, e.to_string()))?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match extension {
        "json" => {
            serde_json::from_str(&content).map_err(|e| LoaderError::parse_error(path, e.to_string()))
        }
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| LoaderError::parse_error(path, e.to_string()))
        }
        _ => Err(LoaderError::unsupported_format(extension)),
    }
}

/// Loads a single document holding every module.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<ModelGraph, LoaderError> {
    let document: GraphDocument = read_document(path.as_ref())?;
    ModelGraph::from_document(document)
}

/// Loads one module per document from every JSON/YAML file under `dir`, in path order.
pub fn load_graph_dir<P: AsRef<Path>>(dir: P) -> Result<ModelGraph, LoaderError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(LoaderError::read_error(dir, "not a directory"));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_document(p))
        .collect();
    files.sort();

    let mut graph = ModelGraph::new();
    for file in &files {
        let module: ModuleSpec = read_document(file)?;
        graph.add_module(module)?;
    }

    debug!(dir = %dir.display(), modules = files.len(), "loaded module directory");
    Ok(graph)
}

/// Loads the resolver configuration and module graph described by a workspace manifest.
pub fn load_workspace<P: AsRef<Path>>(dir: P) -> Result<(ResolverConfig, ModelGraph)> {
    let dir = dir.as_ref();
    let manifest_path = WORKSPACE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
        .with_context(|| format!("No workspace manifest found in {}", dir.display()))?;

    let manifest: WorkspaceManifest = read_document(&manifest_path)
        .with_context(|| format!("Failed to load workspace: {}", manifest_path.display()))?;

    let config = match &manifest.config {
        Some(path) => ResolverConfig::load(dir.join(path))
            .with_context(|| format!("Failed to load resolver config: {}", path.display()))?,
        None => ResolverConfig::default(),
    };

    let modules_dir = dir.join(&manifest.modules);
    let graph = load_graph_dir(&modules_dir)
        .with_context(|| format!("Failed to load modules: {}", modules_dir.display()))?;

    Ok((config, graph))
}

fn is_document(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml")
    )
}
