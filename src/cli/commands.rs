use crate::adapter::import_tabular_with;
use crate::error::{TabularError, TabularResult};
use crate::excel::{ExportOptions, ImportOptions, TabularExporter};
use crate::source::FileHandle;
use crate::types::{header_row, Record, TabularDocument};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// `.yaml` / `.yml` select YAML; anything else is JSON
fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("yaml") | Some("yml")
    )
}

/// Read a JSON or YAML array of flat objects into records
pub fn read_records(path: &Path) -> TabularResult<TabularDocument> {
    let content = fs::read_to_string(path)?;

    let items: Vec<Value> = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    items.iter().map(Record::from_serializable).collect()
}

/// Serialize records as JSON or YAML, matching the target path's extension
pub fn render_records(records: &[Record], path: Option<&Path>) -> TabularResult<String> {
    match path {
        Some(p) if is_yaml(p) => Ok(serde_yaml::to_string(records)?),
        _ => Ok(serde_json::to_string_pretty(records)?),
    }
}

/// Execute the export command
pub fn export(
    input: PathBuf,
    name: String,
    output_dir: PathBuf,
    sheet: String,
    verbose: bool,
) -> TabularResult<()> {
    println!("{}", "📤 SheetPort - Excel Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output_dir.display());

    if verbose {
        println!("{}", "📖 Reading records...".cyan());
    }

    let records = read_records(&input)?;

    if verbose {
        println!(
            "   Found {} records, {} columns\n",
            records.len(),
            header_row(&records).len()
        );
        println!("{}", "📊 Writing workbook...".cyan());
    }

    if !output_dir.is_dir() {
        return Err(TabularError::Export(format!(
            "Output directory does not exist: {}",
            output_dir.display()
        )));
    }

    let exporter = TabularExporter::new(ExportOptions {
        sheet_name: sheet,
        output_dir,
    });
    let path = exporter.export(&records, &name)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", path.display());

    Ok(())
}

/// Execute the import command
///
/// Without an output path the records are printed to stdout as JSON and
/// nothing else is written there.
pub async fn import(
    input: PathBuf,
    output: Option<PathBuf>,
    options: ImportOptions,
    verbose: bool,
) -> TabularResult<()> {
    let file = FileHandle::from_path(&input);
    let records = import_tabular_with(Some(&file), &options).await?;
    let rendered = render_records(&records, output.as_deref())?;

    let Some(output) = output else {
        println!("{}", rendered);
        return Ok(());
    };

    println!("{}", "📥 SheetPort - Excel Import".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!(
            "   {} records, {} columns\n",
            records.len(),
            header_row(&records).len()
        );
        for field in header_row(&records) {
            println!("   📋 {}", field.bright_blue());
        }
        println!();
    }

    fs::write(&output, rendered)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   Records file: {}\n", output.display());

    Ok(())
}
