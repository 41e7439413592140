//! Structure building and linking over small in-line documents.
//!
//! Whole-document fixtures live in `tests/fixtures` and are covered by the
//! snapshot tests in `tests/parsing_snapshots.rs`.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::models::{BlockBody, Position, PropertyTree};
use crate::parsing::{StructureBuilder, TreeSnap, build_tree};

fn build(doc: &str) -> PropertyTree {
    build_tree(doc.lines(), Position::Arguments)
}

fn names(tree: &PropertyTree) -> Vec<&str> {
    tree.names().collect()
}

const REFERENCES_FIRST: &str = "\
* `identity` - (Optional) An `identity` block as defined below.
* `backup_identity` - (Optional) An `identity` block as defined below.

---

An `identity` block supports the following:

* `type` - (Required) The type. Possible values are `SystemAssigned` and `UserAssigned`.
";

const DEFINITION_FIRST: &str = "\
An `identity` block supports the following:

* `type` - (Required) The type. Possible values are `SystemAssigned` and `UserAssigned`.

---

* `identity` - (Optional) An `identity` block as defined above.
* `backup_identity` - (Optional) An `identity` block as defined above.
";

#[test]
fn references_share_one_body() {
    let tree = build(REFERENCES_FIRST);

    assert_eq!(names(&tree), vec!["identity", "backup_identity"]);
    let identity = tree.get("identity").unwrap();
    let backup = tree.get("backup_identity").unwrap();
    assert!(matches!(identity.nested, Some(BlockBody::Linked(_))));
    assert!(Arc::ptr_eq(
        identity.nested_arc().unwrap(),
        backup.nested_arc().unwrap()
    ));
    assert_eq!(
        identity.nested().unwrap().get("type").unwrap().possible_values,
        vec!["SystemAssigned", "UserAssigned"]
    );
}

#[test]
fn declaration_order_does_not_change_the_tree() {
    let references_first = build(REFERENCES_FIRST);
    let definition_first = build(DEFINITION_FIRST);

    assert_eq!(
        TreeSnap::of(&references_first),
        TreeSnap::of(&definition_first)
    );
    assert_eq!(names(&definition_first), vec!["identity", "backup_identity"]);
}

#[test]
fn nested_definition_is_linked_through_its_parent() {
    let tree = build(
        "\
* `site_config` - (Optional) A `site_config` block as defined below.

A `site_config` block supports the following:

* `always_on` - (Optional) Should the app be loaded at all times? Defaults to `false`.
* `cors` - (Optional) A `cors` block as defined below.

A `cors` block within the `site_config` block supports the following:

* `allowed_origins` - (Required) A list of origins.
",
    );

    assert_eq!(names(&tree), vec!["site_config", "cors"]);
    let site_config = tree.get("site_config").unwrap().nested().unwrap();
    assert_eq!(names(site_config), vec!["always_on", "cors"]);
    assert_eq!(
        site_config.get("always_on").unwrap().default_value.as_deref(),
        Some("false")
    );

    let linked_cors = site_config.get("cors").unwrap();
    let origins = linked_cors.nested().unwrap().get("allowed_origins").unwrap();
    assert_eq!(origins.path, "site_config.cors.allowed_origins");

    let root_cors = tree.get("cors").unwrap();
    assert!(root_cors.is_definition());
    assert!(Arc::ptr_eq(
        root_cors.nested_arc().unwrap(),
        linked_cors.nested_arc().unwrap()
    ));
}

#[test]
fn aliases_on_a_block_head_resolve_references() {
    let tree = build(
        "\
* `ingress` - (Optional) An `ingress` block as defined below.
* `egress` - (Optional) An `egress` block as defined below.

An `ingress` or `egress` block supports the following:

* `port` - (Required) The port.
",
    );

    let ingress = tree.get("ingress").unwrap();
    let egress = tree.get("egress").unwrap();
    assert!(egress.has_nested_content());
    assert!(Arc::ptr_eq(
        ingress.nested_arc().unwrap(),
        egress.nested_arc().unwrap()
    ));
}

#[test]
fn self_reference_is_cut() {
    let tree = build(
        "\
* `rule` - (Optional) One `rule` block as defined below.

A `rule` block supports the following:

* `name` - (Required) The name.
* `rule` - (Optional) One `rule` block as defined above.
",
    );

    let outer = tree.get("rule").unwrap();
    let inner = outer.nested().unwrap().get("rule").unwrap();
    assert!(inner.nested.is_none());
    assert_eq!(inner.parse_errors, vec!["circular block reference `rule`"]);
    assert_eq!(tree.circular_reference(), Some("rule"));
}

#[test]
fn unresolved_reference_keeps_empty_body() {
    let tree = build("* `network` - (Optional) A `network` block as defined below.\n");
    let network = tree.get("network").unwrap();
    assert!(network.is_unresolved_reference());
    assert!(network.nested.is_none());
    assert!(network.parse_errors.is_empty());
}

#[test]
fn duplicates_are_counted_once() {
    let tree = build(
        "\
* `name` - (Required) The name.
* `location` - (Required) The location.
* `name` - (Required) The name again.
",
    );

    assert_eq!(names(&tree), vec!["name", "location"]);
    let name = tree.get("name").unwrap();
    assert_eq!(name.duplicate_count, 1);
    assert_eq!(name.line, 1);
    assert_eq!(name.parse_errors, vec!["duplicate entry `name` at line 3"]);
}

#[test]
fn skippable_lines_keep_the_block_open() {
    let tree = build(
        "\
A `network` block supports the following:

* `subnet_id` - (Required) The subnet.

-> **Note:** Only one subnet is supported.
<!-- generated -->
* `private_ip` - (Optional) The private IP.
",
    );

    let network = tree.get("network").unwrap();
    assert_eq!(names(network.nested().unwrap()), vec!["subnet_id", "private_ip"]);
}

#[test]
fn separator_returns_to_the_root() {
    let tree = build(
        "\
A `network` block supports the following:

* `subnet_id` - (Required) The subnet.

---

* `tags` - (Optional) A mapping of tags.
",
    );

    assert_eq!(names(&tree), vec!["network", "tags"]);
    assert_eq!(tree.get("network").unwrap().nested().unwrap().len(), 1);
}

#[test]
fn block_head_closes_the_previous_block() {
    let tree = build(
        "\
A `first` block supports the following:

* `a` - (Required) A.

A `second` block supports the following:

* `b` - (Required) B.
",
    );

    assert_eq!(names(&tree), vec!["first", "second"]);
    assert_eq!(names(tree.get("second").unwrap().nested().unwrap()), vec!["b"]);
}

#[test]
fn block_without_fields_is_dropped() {
    let tree = build("An `empty` block supports the following:\n\n---\n");
    assert!(tree.is_empty());
}

#[test]
fn nameless_items_are_discarded() {
    let tree = build("* just a bullet point\n* `name` - (Required) The name.\n");
    assert_eq!(names(&tree), vec!["name"]);
}

#[test]
fn matched_heading_switches_position() {
    let tree = build(
        "\
* `name` - (Required) The name.

## Timeouts

* `create` - (Defaults to 30 minutes) Used when creating the resource.
",
    );

    assert_eq!(tree.get("name").unwrap().position, Position::Arguments);
    assert_eq!(tree.get("create").unwrap().position, Position::Timeouts);
}

#[test]
fn line_numbers_follow_the_document() {
    let mut builder = StructureBuilder::new(Position::Attributes).starting_at_line(40);
    builder.push("* `id` - The ID.");
    builder.push("");
    builder.push("* `endpoint` - The endpoint.");
    let tree = builder.finish();

    assert_eq!(tree.get("id").unwrap().line, 40);
    assert_eq!(tree.get("endpoint").unwrap().line, 42);
    assert_eq!(tree.get("endpoint").unwrap().position, Position::Attributes);
}

#[test]
fn block_named_after_the_keyword_is_linked() {
    let tree = build(
        "\
* `block_device` - (Optional) A `block_device` block as defined below.

A `block_device` block supports the following:

* `size` - (Required) Size.
",
    );

    assert_eq!(names(&tree), vec!["block_device"]);
    let device = tree.get("block_device").unwrap();
    assert!(matches!(device.nested, Some(BlockBody::Linked(_))));
    assert_eq!(
        device.nested().unwrap().get("size").unwrap().path,
        "block_device.size"
    );
}

#[test]
fn unmatched_heading_keeps_the_block_open() {
    let tree = build(
        "\
A `network` block supports the following:

* `subnet_id` - (Required) The subnet.

### Notes

* `private_ip` - (Optional) The private IP.
",
    );

    assert_eq!(names(&tree), vec!["network"]);
    let network = tree.get("network").unwrap().nested().unwrap();
    assert_eq!(names(network), vec!["subnet_id", "private_ip"]);
    assert_eq!(network.get("private_ip").unwrap().position, Position::Arguments);
}

#[test]
fn matched_heading_commits_the_open_block() {
    let tree = build(
        "\
A `network` block supports the following:

* `subnet_id` - (Required) The subnet.

## Timeouts

* `create` - (Defaults to 30 minutes) Used when creating the resource.
",
    );

    assert_eq!(names(&tree), vec!["network", "create"]);
    let network = tree.get("network").unwrap();
    assert_eq!(network.position, Position::Arguments);
    assert_eq!(names(network.nested().unwrap()), vec!["subnet_id"]);
    assert_eq!(tree.get("create").unwrap().position, Position::Timeouts);
}

#[test]
fn content_keeps_the_source_line() {
    let line = "  * `name` - (Required) The name. Possible values are `a` and `b`.";
    let tree = build(line);

    let name = tree.get("name").unwrap();
    assert_eq!(name.content, line);
    assert!(name.requirement.is_required());
    let span = name.possible_values_span.clone().unwrap();
    assert_eq!(&name.content[span], "Possible values are `a` and `b`");
}
