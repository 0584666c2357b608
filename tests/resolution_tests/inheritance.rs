use super::test_utils::{annotation_names, entries, resolve};
use pretty_assertions::assert_eq;

const CHAIN: &str = r#"
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
    references: [Lib, Aspects]
    declarations:
      - kind: type
        name: Middle
        base: Lib::Base
        children:
          - kind: method
            name: Foo
      - kind: type
        name: Leaf
        base: App::Middle
        children:
          - kind: method
            name: Foo
            annotations:
              - type: Aspects::Y
                named:
                  targets: method
"#;

#[test]
fn test_multi_level_chain_has_no_duplicates() {
    let resolution = resolve(CHAIN);

    assert_eq!(entries(&resolution, "App::Middle::Foo"), vec!["X@Lib::Base::Foo"]);
    assert_eq!(
        entries(&resolution, "App::Leaf::Foo"),
        vec!["X@Lib::Base::Foo", "Y@App::Leaf::Foo"]
    );
}

#[test]
fn test_inherited_sorts_before_direct() {
    let resolution = resolve(CHAIN);
    let leaf = resolution.resolve_path("App::Leaf::Foo").unwrap();

    assert!(leaf[0].is_inherited());
    assert!(!leaf[1].is_inherited());
    assert!(leaf[0].sequence < leaf[1].sequence);
}

#[test]
fn test_interface_diamond_reaches_each_declaration_once() {
    let resolution = resolve(
        r#"
  - name: Lib
    references: [Aspects]
    declarations:
      - kind: type
        name: IRunner
        interface: true
        children:
          - kind: method
            name: Run
            annotations:
              - type: Aspects::X
                named:
                  targets: method
                  inheritance: inherit
      - kind: type
        name: Base
        interfaces: [Lib::IRunner]
        children:
          - kind: method
            name: Run
            virtual: true
      - kind: type
        name: Derived
        base: Lib::Base
        interfaces: [Lib::IRunner]
        children:
          - kind: method
            name: Run
"#,
    );

    assert_eq!(entries(&resolution, "Lib::Base::Run"), vec!["X@Lib::IRunner::Run"]);
    assert_eq!(entries(&resolution, "Lib::Derived::Run"), vec!["X@Lib::IRunner::Run"]);
}

#[test]
fn test_type_level_directive_follows_member_overrides() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Base
        annotations:
          - type: Aspects::X
            named:
              targets: method
              inheritance: inherit
        children:
          - kind: method
            name: Foo
            virtual: true
      - kind: type
        name: Derived
        base: App::Base
        children:
          - kind: method
            name: Foo
          - kind: method
            name: Bar
"#,
    );

    assert_eq!(entries(&resolution, "App::Base::Foo"), vec!["X@App::Base"]);
    assert_eq!(entries(&resolution, "App::Derived::Foo"), vec!["X@App::Base"]);
    assert!(annotation_names(&resolution, "App::Derived::Bar").is_empty());
}

#[test]
fn test_multicast_inheritance_expands_in_derived_types() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Base
        annotations:
          - type: Aspects::X
            named:
              targets: method
              inheritance: multicast
        children:
          - kind: method
            name: Foo
            virtual: true
      - kind: type
        name: Derived
        base: App::Base
        children:
          - kind: method
            name: Foo
          - kind: method
            name: Bar
"#,
    );

    assert_eq!(entries(&resolution, "App::Derived::Foo"), vec!["X@App::Base"]);
    assert_eq!(entries(&resolution, "App::Derived::Bar"), vec!["X@App::Base"]);
    assert!(resolution.resolve_path("App::Derived::Bar").unwrap()[0].is_inherited());
}

#[test]
fn test_parameters_inherit_by_position() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Base
        children:
          - kind: method
            name: Save
            abstract: true
            children:
              - kind: parameter
                name: order
                annotations:
                  - type: Aspects::X
                    named:
                      inheritance: inherit
      - kind: type
        name: Derived
        base: App::Base
        children:
          - kind: method
            name: Save
            children:
              - kind: parameter
                name: item
"#,
    );

    assert_eq!(
        entries(&resolution, "App::Derived::Save::item"),
        vec!["X@App::Base::Save::order"]
    );
}

#[test]
fn test_property_accessors_inherit_by_name() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Base
        children:
          - kind: property
            name: Name
            virtual: true
            children:
              - kind: method
                name: get_Name
                annotations:
                  - type: Aspects::X
                    named:
                      targets: method
                      inheritance: inherit
              - kind: method
                name: set_Name
      - kind: type
        name: Derived
        base: App::Base
        children:
          - kind: property
            name: Name
            children:
              - kind: method
                name: get_Name
              - kind: method
                name: set_Name
"#,
    );

    assert_eq!(
        entries(&resolution, "App::Derived::Name::get_Name"),
        vec!["X@App::Base::Name::get_Name"]
    );
    assert!(annotation_names(&resolution, "App::Derived::Name::set_Name").is_empty());
}

#[test]
fn test_non_inheritable_directive_stays_put() {
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
      - kind: type
        name: Derived
        base: App::Base
        children:
          - kind: method
            name: Foo
"#,
    );

    assert_eq!(annotation_names(&resolution, "App::Base::Foo"), vec!["X"]);
    assert!(annotation_names(&resolution, "App::Derived::Foo").is_empty());
}

#[test]
fn test_inherited_exclusion_removes_direct_entries_of_its_type() {
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
                  exclude: true
                  inheritance: inherit
      - kind: type
        name: Derived
        base: App::Base
        children:
          - kind: method
            name: Foo
            annotations:
              - type: Aspects::X
                named:
                  targets: method
              - type: Aspects::Y
                named:
                  targets: method
"#,
    );

    assert!(entries(&resolution, "App::Base::Foo").is_empty());
    assert_eq!(entries(&resolution, "App::Derived::Foo"), vec!["Y@App::Derived::Foo"]);
}
