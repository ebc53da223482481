//! Command handlers for CLI subcommands

use std::fs;
use std::path::Path;

use fieldcast_core::{
    build, loader, rules_from_rows, validate_rules, MappingRow, MappingRule, WriterConfig,
    XmlWriter,
};
use tracing::instrument;

use crate::cli::{RenderArgs, ValidateArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the render command
#[instrument(skip(output), fields(mappings = %args.mappings.display(), data = %args.data.display()))]
pub fn handle_render(args: RenderArgs, output: &OutputWriter) -> Result<()> {
    let rules = load_mapping_file(&args.mappings)?;
    output.info(&format!(
        "Loaded {} mapping rules from {}",
        rules.len(),
        args.mappings.display()
    ));

    if !args.data.exists() {
        return Err(Error::FileNotFound {
            path: args.data.clone(),
        });
    }
    let content = fs::read_to_string(&args.data)?;
    let data: serde_json::Value = serde_json::from_str(&content)?;

    let document = build(&rules, &data)?;
    let writer = XmlWriter::new(WriterConfig {
        indent_width: args.indent,
        declaration: !args.no_declaration,
    });
    let xml = writer.write(&document);

    match &args.output {
        Some(path) => {
            fs::write(path, &xml)?;
            output.success(&format!("Wrote {}", path.display()));
        }
        None => print!("{}", xml),
    }
    Ok(())
}

/// Handle the validate command
#[instrument(skip(output), fields(mappings = %args.mappings.display()))]
pub fn handle_validate(args: ValidateArgs, output: &OutputWriter) -> Result<()> {
    let rules = load_mapping_file(&args.mappings)?;
    let root = validate_rules(&rules).map_err(Error::Core)?.to_string();

    let collections = rules.iter().filter(|r| r.is_collection()).count();
    output.info(&format!("Document root: <{}>", root));
    output.info(&format!(
        "{} rules ({} collection markers, {} scalar)",
        rules.len(),
        collections,
        rules.len() - collections
    ));
    output.success("Mapping table is valid");
    Ok(())
}

/// Load a mapping table from JSON or YAML, chosen by file extension
fn load_mapping_file(path: &Path) -> Result<Vec<MappingRule>> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    if is_yaml {
        let content = fs::read_to_string(path)?;
        let rows: Vec<MappingRow> = serde_yaml::from_str(&content)?;
        Ok(rules_from_rows(&rows)?)
    } else {
        Ok(loader::load_mappings_from_path(path)?)
    }
}
