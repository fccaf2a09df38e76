use clap::{Parser, Subcommand};
use sheetport::cli;
use sheetport::excel::{ImportOptions, DEFAULT_SHEET_NAME};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetport")]
#[command(about = "Export record arrays to .xlsx and import spreadsheets back into records")]
#[command(long_about = "SheetPort - record arrays ↔ spreadsheets

COMMANDS:
  export   - JSON/YAML records to Excel (.xlsx)
  import   - Excel (.xlsx, .xls, .xlsb, .ods) to JSON/YAML records

EXAMPLES:
  sheetport export users.json Users            # Writes ./Users.xlsx
  sheetport import Users.xlsx -o users.yaml    # First sheet → YAML
  sheetport import Users.xlsx | jq '.[0]'      # JSON on stdout

Logging: set RUST_LOG (e.g. RUST_LOG=sheetport=debug). Logs go to stderr.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export records to an Excel .xlsx file.

Reads a JSON or YAML array of flat objects and writes <DIR>/<NAME>.xlsx
with a single worksheet. The header row is the first record's keys,
followed by any keys that only appear in later records.

EXAMPLE:
  sheetport export users.json Users -d reports/")]
    /// Export JSON/YAML records to Excel .xlsx
    Export {
        /// Path to a JSON or YAML array of objects
        input: PathBuf,

        /// File name stem (.xlsx is appended)
        name: String,

        /// Directory to save into
        #[arg(short = 'd', long, default_value = ".", env = "SHEETPORT_OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Worksheet name
        #[arg(long, default_value = DEFAULT_SHEET_NAME)]
        sheet: String,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import a spreadsheet into records.

The first row of the sheet supplies the field names. Every later row becomes
one record holding only the cells that have a value.

OUTPUT:
  -o out.json / -o out.yaml   Write JSON or YAML (by extension)
  (no -o)                     Print JSON to stdout

EXAMPLE:
  sheetport import Users.xlsx -o users.json --sheet Sheet1")]
    /// Import a spreadsheet into JSON/YAML records
    Import {
        /// Path to the spreadsheet file
        input: PathBuf,

        /// Output file (.json or .yaml); stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheet to read (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Drop rows without any values
        #[arg(long)]
        skip_blank_rows: bool,

        /// Fail when a header name repeats
        #[arg(long)]
        unique_headers: bool,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "sheetport=debug"
    } else {
        "sheetport=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            name,
            output_dir,
            sheet,
            verbose,
        } => {
            init_tracing(verbose);
            cli::export(input, name, output_dir, sheet, verbose)?;
        }

        Commands::Import {
            input,
            output,
            sheet,
            skip_blank_rows,
            unique_headers,
            verbose,
        } => {
            init_tracing(verbose);
            let options = ImportOptions {
                sheet_name: sheet,
                skip_blank_rows,
                unique_headers,
            };
            cli::import(input, output, options, verbose).await?;
        }
    }

    Ok(())
}
