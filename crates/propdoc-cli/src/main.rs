use anyhow::{Context, Result, bail};
use propdoc_config::Config;
use propdoc_engine::{
    Document, Position, PropertyTree, SchemaDescription, Validator, Vocabulary, render_outline,
};
use std::{collections::BTreeSet, env, path::PathBuf, process, sync::Arc};

#[derive(Debug, PartialEq)]
struct CliArgs {
    doc: PathBuf,
    schema: Option<PathBuf>,
    section: Position,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut doc = None;
        let mut schema = None;
        let mut section = Position::Arguments;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--schema" => {
                    let value = iter.next().context("--schema needs a file path")?;
                    schema = Some(PathBuf::from(value));
                }
                "--section" => {
                    let value = iter.next().context("--section needs a section name")?;
                    section = value.parse()?;
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                path if doc.is_none() => doc = Some(PathBuf::from(path)),
                extra => bail!("unexpected argument {extra}"),
            }
        }

        Ok(Self {
            doc: doc.context("no documentation file given")?,
            schema,
            section,
        })
    }
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <doc.md> [--schema <schema.toml>] [--section <position>]")
}

/// Built-in vocabulary extended with the configured headings and phrases.
fn build_vocabulary(config: &Config) -> Result<Vocabulary> {
    let headings = config
        .section_headings
        .iter()
        .map(|alias| {
            let position: Position = alias
                .section
                .parse()
                .with_context(|| format!("Invalid section for heading '{}'", alias.text))?;
            Ok((alias.text.clone(), position))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Vocabulary::with_extensions(
        headings,
        config.enum_phrases.iter().cloned(),
    ))
}

/// `line N: `path`: message` for every parse error, once each.
fn parse_errors(tree: &PropertyTree) -> BTreeSet<(usize, String)> {
    let mut found = BTreeSet::new();
    collect_errors(tree, &mut found);
    found
}

fn collect_errors(tree: &PropertyTree, found: &mut BTreeSet<(usize, String)>) {
    for p in tree {
        for error in &p.parse_errors {
            found.insert((p.line, format!("`{}`: {error}", p.full_path())));
        }
        if let Some(nested) = p.nested() {
            collect_errors(nested, found);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("propdoc");
    let cli = match CliArgs::parse(args.get(1..).unwrap_or_default()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(program));
            process::exit(2);
        }
    };

    let config = match Config::load().context("Failed to load config file")? {
        Some(config) => config,
        None => {
            log::debug!("no config at {}, using defaults", Config::config_path().display());
            Config::default()
        }
    };

    let vocabulary = Arc::new(build_vocabulary(&config)?);
    let doc_path = config.resolve_doc_path(&cli.doc);
    let text = std::fs::read_to_string(&doc_path)
        .with_context(|| format!("Failed to read {}", doc_path.display()))?;
    let doc = Document::parse_with(&text, vocabulary);

    let tree = doc.properties(cli.section);
    if tree.is_empty() {
        log::warn!("no {} properties found in {}", cli.section, doc_path.display());
    }
    print!("{}", render_outline(&tree));
    for (line, message) in parse_errors(&tree) {
        println!("{}:{line}: {message}", doc_path.display());
    }

    let Some(schema_path) = cli.schema else {
        return Ok(());
    };
    let schema_text = std::fs::read_to_string(&schema_path)
        .with_context(|| format!("Failed to read {}", schema_path.display()))?;
    let schema = SchemaDescription::from_toml_str(&schema_text)
        .with_context(|| format!("Invalid schema description {}", schema_path.display()))?;
    log::info!("checking {} against {}", doc_path.display(), schema.resource);

    let validator = Validator::with_ignored(config.ignored_properties.iter().cloned());
    let diagnostics = validator.validate(&schema.into_tree(), &tree);
    for diagnostic in &diagnostics {
        println!("{}: {diagnostic}", doc_path.display());
    }

    if !diagnostics.is_empty() {
        log::info!("{} findings", diagnostics.len());
        process::exit(1);
    }
    log::info!("documentation matches schema");
    Ok(())
}
