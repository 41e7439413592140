use propdoc_engine::{Document, Position, TreeSnap, parsing::render_outline};

#[test]
fn fixture_example_app_arguments() {
    assert_section("example_app", Position::Arguments);
}

#[test]
fn fixture_example_app_attributes() {
    assert_section("example_app", Position::Attributes);
}

#[test]
fn fixture_example_app_timeouts() {
    assert_section("example_app", Position::Timeouts);
}

fn load(name: &str) -> Document {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.html.markdown",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    Document::parse(&md)
}

fn assert_section(name: &str, position: Position) {
    let doc = load(name);
    let rendered = render_outline(&doc.properties(position));
    insta::assert_snapshot!(format!("{name}_{position}"), rendered);
}

#[test]
fn fixture_example_app_timeouts_tree() {
    let doc = load("example_app");
    insta::assert_yaml_snapshot!("example_app_timeouts_tree", TreeSnap::of(&doc.timeouts()));
}

/// Every property keeps the exact source line it was parsed from.
#[test]
fn content_matches_source_lines() {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/example_app.html.markdown",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let lines: Vec<&str> = md.lines().collect();
    let doc = Document::parse(&md);

    for section in doc.sections() {
        for p in section.properties().iter() {
            assert_eq!(lines[p.line - 1], p.content, "{}", p.name);
            if let Some(nested) = p.nested() {
                for child in nested {
                    assert_eq!(lines[child.line - 1], child.content, "{}", child.path);
                }
            }
        }
    }
}

#[test]
fn fenced_code_never_yields_properties() {
    let doc = load("example_app");
    assert!(doc.properties(Position::Example).is_empty());
    assert!(doc.properties(Position::Import).is_empty());
}
