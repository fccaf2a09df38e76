//! Excel exporter implementation - records → .xlsx

use crate::error::{TabularError, TabularResult};
use crate::types::{header_row, CellValue, Record};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::PathBuf;
use tracing::{debug, info};

/// Default worksheet name for exported files
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Extension appended to every exported file name
pub const XLSX_EXTENSION: &str = "xlsx";

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Name of the single worksheet
    pub sheet_name: String,
    /// Directory the file is saved into
    pub output_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Writes a sequence of records to a single-sheet workbook
#[derive(Debug, Clone, Default)]
pub struct TabularExporter {
    options: ExportOptions,
}

impl TabularExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// File name for an export stem: the extension is always appended
    pub fn file_name_for(stem: &str) -> String {
        format!("{}.{}", stem, XLSX_EXTENSION)
    }

    /// Save `records` as `<output_dir>/<file_name>.xlsx` and return the path written
    pub fn export(&self, records: &[Record], file_name: &str) -> TabularResult<PathBuf> {
        let mut workbook = self.build_workbook(records)?;
        let path = self.options.output_dir.join(Self::file_name_for(file_name));

        workbook
            .save(&path)
            .map_err(|e| TabularError::Export(format!("Failed to save Excel file: {}", e)))?;

        info!(
            path = %path.display(),
            rows = records.len(),
            "exported workbook"
        );
        Ok(path)
    }

    /// Serialize `records` to .xlsx bytes without touching the filesystem
    pub fn to_buffer(&self, records: &[Record]) -> TabularResult<Vec<u8>> {
        let mut workbook = self.build_workbook(records)?;
        workbook
            .save_to_buffer()
            .map_err(|e| TabularError::Export(format!("Failed to serialize workbook: {}", e)))
    }

    fn build_workbook(&self, records: &[Record]) -> TabularResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.options.sheet_name)
            .map_err(|e| TabularError::Export(format!("Failed to set worksheet name: {}", e)))?;

        // Empty input leaves the sheet blank: no header row either
        if records.is_empty() {
            debug!("no records, writing empty sheet");
            return Ok(workbook);
        }

        let headers = header_row(records);
        debug!(columns = headers.len(), rows = records.len(), "building worksheet");

        for (col_idx, header) in headers.iter().enumerate() {
            let col = column_index(col_idx)?;
            worksheet
                .write_string(0, col, header)
                .map_err(|e| TabularError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (row_idx, record) in records.iter().enumerate() {
            let row = row_index(row_idx + 1)?; // +1 for header row
            let mut written = false;
            for (col_idx, header) in headers.iter().enumerate() {
                if let Some(value) = record.get(header) {
                    written |= write_cell_value(worksheet, row, column_index(col_idx)?, value)?;
                }
            }

            // Valueless row: a blank cell keeps it inside the sheet dimension
            if !written {
                worksheet
                    .write_blank(row, 0, &Format::new())
                    .map_err(|e| TabularError::Export(format!("Failed to write blank row: {}", e)))?;
            }
        }

        Ok(workbook)
    }
}

/// Write a single cell. Empty values leave the cell blank and return `false`.
fn write_cell_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> TabularResult<bool> {
    match value {
        CellValue::Number(n) => {
            worksheet
                .write_number(row, col, *n)
                .map_err(|e| TabularError::Export(format!("Failed to write number: {}", e)))?;
        }
        CellValue::Text(s) => {
            worksheet
                .write_string(row, col, s)
                .map_err(|e| TabularError::Export(format!("Failed to write text: {}", e)))?;
        }
        CellValue::Boolean(b) => {
            worksheet
                .write_boolean(row, col, *b)
                .map_err(|e| TabularError::Export(format!("Failed to write boolean: {}", e)))?;
        }
        CellValue::Empty => return Ok(false),
    }
    Ok(true)
}

fn column_index(idx: usize) -> TabularResult<u16> {
    u16::try_from(idx).map_err(|_| TabularError::Export(format!("Too many columns: {}", idx + 1)))
}

fn row_index(idx: usize) -> TabularResult<u32> {
    u32::try_from(idx).map_err(|_| TabularError::Export(format!("Too many rows: {}", idx + 1)))
}
