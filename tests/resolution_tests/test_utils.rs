//! Shared graph builders for resolution tests

use directive_resolver::{ModelGraph, Resolution, Resolver, ResolverConfig, Result};

/// Marker module plus a module of general-purpose annotation types.
///
/// `X`, `Y` and `Z` are valid on everything below a module; `Once` only on
/// methods and allows a single instance; `Category` takes one constructor argument.
pub const PRELUDE: &str = r#"
modules:
  - name: Core
    declarations:
      - kind: type
        name: Directive
  - name: Aspects
    references: [Core]
    declarations:
      - kind: type
        name: X
        base: Core::Directive
        schema:
          usage:
            valid_on: [type, members, parameter, return_slot]
      - kind: type
        name: Y
        base: Core::Directive
        schema:
          usage:
            valid_on: [type, members, parameter, return_slot]
      - kind: type
        name: Z
        base: Core::Directive
        schema:
          usage:
            valid_on: [type, members, parameter, return_slot]
      - kind: type
        name: Once
        base: Core::Directive
        schema:
          usage:
            valid_on: [type, method]
            allow_multiple: false
      - kind: type
        name: Category
        base: Core::Directive
        schema:
          constructor: [name]
          usage:
            valid_on: method
"#;

/// Appends module entries (indented as list items of `modules:`) to the prelude.
pub fn graph(modules: &str) -> ModelGraph {
    ModelGraph::from_yaml_str(&format!("{PRELUDE}{modules}")).expect("graph should parse")
}

pub fn try_resolve_with(config: ResolverConfig, modules: &str) -> Result<Resolution> {
    Resolver::with_config(config).resolve(&graph(modules))
}

pub fn try_resolve(modules: &str) -> Result<Resolution> {
    try_resolve_with(ResolverConfig::default(), modules)
}

pub fn resolve(modules: &str) -> Resolution {
    try_resolve(modules).expect("resolution should succeed")
}

/// Last path segment of each directive's annotation type, in final order.
pub fn annotation_names(resolution: &Resolution, path: &str) -> Vec<String> {
    let index = resolution.index();
    resolution
        .resolve_path(path)
        .expect("path should exist")
        .iter()
        .map(|d| index.get(d.annotation_type).name.clone())
        .collect()
}

/// `Annotation@origin` for each directive, in final order.
pub fn entries(resolution: &Resolution, path: &str) -> Vec<String> {
    let index = resolution.index();
    resolution
        .resolve_path(path)
        .expect("path should exist")
        .iter()
        .map(|d| format!("{}@{}", index.get(d.annotation_type).name, index.path(d.origin)))
        .collect()
}
