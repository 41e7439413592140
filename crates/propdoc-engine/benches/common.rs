// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_resource_doc(fields: usize, blocks: usize) -> String {
    let mut doc = String::from("# azurerm_bench\n\n## Arguments Reference\n\n");

    for i in 0..fields {
        doc.push_str(&format!(
            "* `field_{i}` - (Optional) Field number {i}. Possible values are `a{i}`, `b{i}` and `c{i}`. Defaults to `a{i}`.\n\n"
        ));
    }
    for b in 0..blocks {
        doc.push_str(&format!(
            "* `block_{b}` - (Optional) A `block_{b}` block as defined below.\n\n"
        ));
    }
    doc.push_str("---\n\n");
    for b in 0..blocks {
        doc.push_str(&format!("A `block_{b}` block supports the following:\n\n"));
        for i in 0..5 {
            doc.push_str(&format!(
                "* `inner_{i}` - (Required) Inner field. Changing this forces a new resource to be created.\n\n"
            ));
        }
        doc.push_str("---\n\n");
    }

    doc
}

/// Schema description matching [`generate_resource_doc`] plus one extra field
/// per block, so the cross-check has findings to report.
#[allow(dead_code)]
pub fn generate_schema(fields: usize, blocks: usize) -> String {
    let mut schema = String::new();
    for i in 0..fields {
        schema.push_str(&format!("[[field]]\nname = \"field_{i}\"\noptional = true\n\n"));
    }
    for b in 0..blocks {
        schema.push_str(&format!("[[field]]\nname = \"block_{b}\"\noptional = true\n\n"));
        for i in 0..6 {
            schema.push_str(&format!("[[field.field]]\nname = \"inner_{i}\"\nrequired = true\n\n"));
        }
    }
    schema
}
