use super::test_utils::{annotation_names, entries, resolve};
use pretty_assertions::assert_eq;

#[test]
fn test_inherited_directive_keeps_origin() {
    let resolution = resolve(
        r#"
  - name: Lib
    references: [Aspects]
    declarations:
      - kind: type
        name: Base
        children:
          - kind: method
            name: Foo
            virtual: true
            annotations:
              - type: Aspects::X
                named:
                  targets: method
                  inheritance: inherit
  - name: App
    references: [Lib]
    declarations:
      - kind: type
        name: Derived
        base: Lib::Base
        children:
          - kind: method
            name: Foo
"#,
    );

    let derived = resolution.resolve_path("App::Derived::Foo").unwrap();
    assert_eq!(derived.len(), 1);
    let inherited = &derived[0];
    assert!(inherited.is_inherited());
    assert_eq!(resolution.index().path(inherited.origin), "Lib::Base::Foo");
    assert_eq!(resolution.index().path(inherited.target), "App::Derived::Foo");

    assert_eq!(entries(&resolution, "Lib::Base::Foo"), vec!["X@Lib::Base::Foo"]);
    assert!(resolution.resolve_path("App::Derived").unwrap().is_empty());
}

#[test]
fn test_priority_orders_directives() {
    let resolution = resolve(
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
              - type: Aspects::X
                named:
                  targets: method
                  priority: 2
              - type: Aspects::Y
                named:
                  targets: method
                  priority: 1
"#,
    );

    assert_eq!(annotation_names(&resolution, "App::Service::Run"), vec!["Y", "X"]);
}

#[test]
fn test_exclusion_removes_only_its_annotation_type() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Service
        annotations:
          - type: Aspects::X
            named:
              targets: method
        children:
          - kind: method
            name: Run
            annotations:
              - type: Aspects::X
                named:
                  exclude: true
              - type: Aspects::Y
                named:
                  targets: method
          - kind: method
            name: Stop
"#,
    );

    assert_eq!(annotation_names(&resolution, "App::Service::Run"), vec!["Y"]);
    assert_eq!(entries(&resolution, "App::Service::Stop"), vec!["X@App::Service"]);
}
