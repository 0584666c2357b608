use super::test_utils::{resolve, try_resolve, try_resolve_with};
use directive_resolver::error::{DirectiveError, HierarchyError, IndexError};
use directive_resolver::{Error, ResolverConfig};

#[test]
fn test_malformed_directive_names_origin() {
    let err = try_resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Service
        children:
          - kind: method
            name: Run
            annotations:
              - type: Aspects::Category
"#,
    )
    .err()
    .expect("missing constructor argument should fail");

    assert!(matches!(
        err,
        Error::Directive(DirectiveError::MissingArgument { .. })
    ));
    assert_eq!(
        err.to_string(),
        "malformed directive on 'App::Service::Run': missing required argument 'name'"
    );
}

#[test]
fn test_unknown_target_kind_is_malformed() {
    let err = try_resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Service
        annotations:
          - type: Aspects::X
            named:
              targets: constructor
"#,
    )
    .err()
    .expect("unknown kind should fail");

    assert_eq!(
        err.to_string(),
        "malformed directive on 'App::Service': argument 'targets' unknown target kind 'constructor'"
    );
}

#[test]
fn test_cyclic_hierarchy_fails_fast() {
    let err = try_resolve(
        r#"
  - name: App
    declarations:
      - kind: type
        name: A
        base: App::C
      - kind: type
        name: B
        base: App::A
      - kind: type
        name: C
        base: App::B
"#,
    )
    .err()
    .expect("cycle should fail");

    match err {
        Error::Hierarchy(HierarchyError::Cyclic { declaration, path }) => {
            assert_eq!(declaration, "App::A");
            assert_eq!(path, vec!["App::A", "App::C", "App::B", "App::A"]);
        }
        other => panic!("expected a cycle, got {other}"),
    }
}

#[test]
fn test_depth_limit() {
    let modules = r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: A
        annotations:
          - type: Aspects::X
            named:
              targets: type
              inheritance: inherit
      - kind: type
        name: B
        base: App::A
      - kind: type
        name: C
        base: App::B
"#;

    assert!(try_resolve(modules).is_ok());

    let config = ResolverConfig {
        max_inheritance_depth: 1,
        ..ResolverConfig::default()
    };
    let err = try_resolve_with(config, modules)
        .err()
        .expect("depth limit should fail");
    assert!(matches!(
        err,
        Error::Hierarchy(HierarchyError::DepthExceeded { limit: 1, .. })
    ));
}

#[test]
fn test_unresolved_reference_skips_branch() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects, Vendor]
    declarations:
      - kind: type
        name: Service
        base: Vendor::Component
        children:
          - kind: method
            name: Run
            annotations:
              - type: Vendor::Tracing
              - type: Aspects::X
                named:
                  targets: method
"#,
    );

    assert_eq!(
        resolution.warnings(),
        [
            "unresolved reference 'Vendor' from 'App'",
            "unresolved reference 'Vendor::Component' from 'App::Service'",
            "unresolved reference 'Vendor::Tracing' from 'App::Service::Run'",
        ]
    );
    assert_eq!(
        resolution.resolve_path("App::Service::Run").unwrap().len(),
        1
    );
    let service = resolution.index().find("App::Service").unwrap();
    assert_eq!(resolution.index().get(service).base, None);
}

#[test]
fn test_strict_references_fail() {
    let config = ResolverConfig {
        strict_references: true,
        ..ResolverConfig::default()
    };
    let err = try_resolve_with(
        config,
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Service
        base: Vendor::Component
"#,
    )
    .err()
    .expect("strict mode should fail");

    assert!(matches!(
        err,
        Error::Index(IndexError::UnresolvedReference { .. })
    ));
}

#[test]
fn test_unknown_path_lookup() {
    let resolution = resolve("");
    let err = resolution.resolve_path("App::Nowhere").unwrap_err();
    assert_eq!(err.to_string(), "unknown declaration path: App::Nowhere");
}
