//! Excel import/export for record arrays
//!
//! - Export: records → single-sheet .xlsx (rust_xlsxwriter)
//! - Import: .xlsx/.xls/.xlsb/.ods bytes → records (calamine)

mod exporter;
mod importer;

pub use exporter::{ExportOptions, TabularExporter, DEFAULT_SHEET_NAME, XLSX_EXTENSION};
pub use importer::{ImportOptions, TabularImporter};
