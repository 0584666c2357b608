use super::test_utils::{entries, graph, resolve};
use directive_resolver::Resolver;
use pretty_assertions::assert_eq;

#[test]
fn test_equal_priorities_keep_arrival_order() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Service
        annotations:
          - type: Aspects::Z
            named:
              targets: method
        children:
          - kind: method
            name: Run
            annotations:
              - type: Aspects::X
                named:
                  targets: method
              - type: Aspects::Y
                named:
                  targets: method
"#,
    );

    assert_eq!(
        entries(&resolution, "App::Service::Run"),
        vec!["Z@App::Service", "X@App::Service::Run", "Y@App::Service::Run"]
    );
}

#[test]
fn test_priority_beats_inheritance() {
    let resolution = resolve(
        r#"
  - name: App
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
                  priority: 5
      - kind: type
        name: Derived
        base: App::Base
        children:
          - kind: method
            name: Foo
            annotations:
              - type: Aspects::Y
                named:
                  targets: method
                  priority: -1
              - type: Aspects::Z
                named:
                  targets: method
                  priority: 5
"#,
    );

    assert_eq!(
        entries(&resolution, "App::Derived::Foo"),
        vec![
            "Y@App::Derived::Foo",
            "X@App::Base::Foo",
            "Z@App::Derived::Foo"
        ]
    );
}

#[test]
fn test_single_instance_type_keeps_last() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Service
        annotations:
          - type: Aspects::Once
            named:
              targets: method
        children:
          - kind: method
            name: Run
            annotations:
              - type: Aspects::Once
          - kind: method
            name: Stop
"#,
    );

    assert_eq!(entries(&resolution, "App::Service::Run"), vec!["Once@App::Service::Run"]);
    assert_eq!(entries(&resolution, "App::Service::Stop"), vec!["Once@App::Service"]);
}

#[test]
fn test_handler_arguments_are_carried() {
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
              - type: Aspects::Category
                args: [billing]
                named:
                  threshold: 10
"#,
    );

    let list = resolution.resolve_path("App::Service::Run").unwrap();
    assert_eq!(list.len(), 1);
    let directive = &list[0];
    assert_eq!(
        directive.argument("name").and_then(|v| v.as_str()),
        Some("billing")
    );
    assert_eq!(
        directive.argument("threshold").and_then(|v| v.as_int()),
        Some(10)
    );
    assert_eq!(directive.annotation.args.len(), 1);
}

#[test]
fn test_resolution_is_deterministic() {
    let modules = r#"
  - name: Lib
    references: [Aspects]
    declarations:
      - kind: type
        name: Base
        annotations:
          - type: Aspects::X
            named:
              targets: method
              inheritance: multicast
          - type: Aspects::Y
            named:
              targets: [method, parameter]
              inheritance: inherit
        children:
          - kind: method
            name: Foo
            virtual: true
            children:
              - kind: parameter
                name: input
  - name: App
    references: [Lib, Aspects]
    declarations:
      - kind: type
        name: Derived
        base: Lib::Base
        children:
          - kind: method
            name: Foo
            children:
              - kind: parameter
                name: value
            annotations:
              - type: Aspects::Z
                named:
                  priority: -3
"#;

    let resolver = Resolver::new();
    let first = resolver.resolve(&graph(modules)).unwrap();
    let second = resolver.resolve(&graph(modules)).unwrap();
    assert_eq!(first.report(), second.report());

    assert_eq!(
        entries(&first, "App::Derived::Foo"),
        vec!["Z@App::Derived::Foo", "X@Lib::Base", "Y@Lib::Base"]
    );
    assert_eq!(
        entries(&first, "App::Derived::Foo::value"),
        vec!["Z@App::Derived::Foo", "Y@Lib::Base"]
    );
}

#[test]
fn test_report_lists_targets() {
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
                  priority: 4
"#,
    );

    let report = resolution.report();
    assert_eq!(
        report,
        serde_json::json!([
            {
                "target": "App::Service::Run",
                "directives": [
                    {
                        "annotation": "Aspects::X",
                        "origin": "App::Service::Run",
                        "priority": 4,
                        "sequence": 0,
                        "inherited": false,
                        "exclude": false
                    }
                ]
            }
        ])
    );
}
