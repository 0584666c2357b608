use super::test_utils::{annotation_names, entries, resolve};
use pretty_assertions::assert_eq;

/// Paths of every declaration carrying a directive, in accumulation order.
fn targets(resolution: &directive_resolver::Resolution) -> Vec<String> {
    let index = resolution.index();
    resolution
        .directives()
        .targets()
        .map(|id| index.path(id).to_string())
        .collect()
}

#[test]
fn test_kind_mask_limits_targets() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Orders
        annotations:
          - type: Aspects::X
            named:
              targets: [method, field]
        children:
          - kind: field
            name: count
          - kind: property
            name: Total
          - kind: method
            name: Place
            children:
              - kind: parameter
                name: order
              - kind: return_slot
"#,
    );

    assert_eq!(
        targets(&resolution),
        vec!["App::Orders::count", "App::Orders::Place"]
    );
}

#[test]
fn test_member_pattern_filters_members() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Customer
        annotations:
          - type: Aspects::X
            named:
              targets: method
              target_members: "Get*"
        children:
          - kind: method
            name: GetName
          - kind: method
            name: SetName
          - kind: method
            name: GetAddress
"#,
    );

    assert_eq!(
        targets(&resolution),
        vec!["App::Customer::GetName", "App::Customer::GetAddress"]
    );
}

#[test]
fn test_type_pattern_from_module_level() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    annotations:
      - type: Aspects::X
        named:
          targets: method
          target_types: "regex:Order.*"
    declarations:
      - kind: type
        name: OrderService
        children:
          - kind: method
            name: Place
      - kind: type
        name: Billing
        children:
          - kind: method
            name: Charge
          - kind: type
            name: OrderQueue
            children:
              - kind: method
                name: Push
"#,
    );

    assert_eq!(targets(&resolution), vec!["App::OrderService::Place"]);
}

#[test]
fn test_nested_type_matched_by_dotted_name() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    annotations:
      - type: Aspects::X
        named:
          targets: method
          target_types: "*.Queue"
    declarations:
      - kind: type
        name: Billing
        children:
          - kind: method
            name: Charge
          - kind: type
            name: Queue
            children:
              - kind: method
                name: Push
"#,
    );

    assert_eq!(targets(&resolution), vec!["App::Billing::Queue::Push"]);
}

#[test]
fn test_parameter_pattern_and_direction() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Repository
        annotations:
          - type: Aspects::X
            named:
              targets: parameter
              target_parameters: "id*"
              target_qualifiers: "in|ref"
        children:
          - kind: method
            name: Load
            children:
              - kind: parameter
                name: id
              - kind: parameter
                name: idOut
                direction: out
              - kind: parameter
                name: options
              - kind: return_slot
"#,
    );

    assert_eq!(targets(&resolution), vec!["App::Repository::Load::id"]);
}

#[test]
fn test_accessors_match_through_their_property() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Customer
        annotations:
          - type: Aspects::X
            named:
              targets: method
              target_members: Name
        children:
          - kind: property
            name: Name
            children:
              - kind: method
                name: get_Name
              - kind: method
                name: set_Name
          - kind: property
            name: Age
            children:
              - kind: method
                name: get_Age
"#,
    );

    assert_eq!(
        targets(&resolution),
        vec!["App::Customer::Name::get_Name", "App::Customer::Name::set_Name"]
    );
}

#[test]
fn test_local_and_external_masks() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Core]
    declarations:
      - kind: type
        name: Probe
        base: Core::Directive
        schema:
          usage:
            valid_on: [type, method]
      - kind: type
        name: Service
        annotations:
          - type: App::Probe
            named:
              targets: method
              target_qualifiers: public
              target_external_qualifiers: private
              inheritance: multicast
        children:
          - kind: method
            name: Open
          - kind: method
            name: Hidden
            visibility: private
  - name: Ext
    references: [App]
    declarations:
      - kind: type
        name: Client
        base: App::Service
        children:
          - kind: method
            name: Call
          - kind: method
            name: Secret
            visibility: private
"#,
    );

    assert_eq!(annotation_names(&resolution, "App::Service::Open"), vec!["Probe"]);
    assert!(annotation_names(&resolution, "App::Service::Hidden").is_empty());
    assert!(annotation_names(&resolution, "Ext::Client::Call").is_empty());
    assert_eq!(
        entries(&resolution, "Ext::Client::Secret"),
        vec!["Probe@App::Service"]
    );
}

#[test]
fn test_generated_code_is_skipped_unless_requested() {
    let modules = |qualifiers: &str| {
        format!(
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
              target_qualifiers: "{qualifiers}"
        children:
          - kind: method
            name: Run
          - kind: method
            name: MoveNext
            generated: true
"#
        )
    };

    let user_only = resolve(&modules("public"));
    assert_eq!(targets(&user_only), vec!["App::Service::Run"]);

    let with_generated = resolve(&modules("public|user|generated"));
    assert_eq!(
        targets(&with_generated),
        vec!["App::Service::Run", "App::Service::MoveNext"]
    );
}

#[test]
fn test_annotations_inside_generated_code_are_ignored() {
    let resolution = resolve(
        r#"
  - name: App
    references: [Aspects]
    declarations:
      - kind: type
        name: Closure
        generated: true
        children:
          - kind: method
            name: Invoke
            annotations:
              - type: Aspects::X
"#,
    );

    assert!(resolution.directives().is_empty());
}

#[test]
fn test_qualifier_groups_combine() {
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
              target_qualifiers: [public, static]
        children:
          - kind: method
            name: Create
            static: true
          - kind: method
            name: Run
          - kind: method
            name: Helper
            static: true
            visibility: private
"#,
    );

    assert_eq!(targets(&resolution), vec!["App::Service::Create"]);
}
