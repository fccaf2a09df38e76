//! Excel importer implementation - spreadsheet bytes → records

use crate::error::{TabularError, TabularResult};
use crate::types::{as_integer, CellValue, Record, TabularDocument};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use indexmap::IndexSet;
use std::io::{Cursor, Read, Seek};
use tracing::{debug, info};

/// Import configuration
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Read this sheet instead of the first one
    pub sheet_name: Option<String>,
    /// Drop rows that have no cell values. Kept as empty records otherwise.
    pub skip_blank_rows: bool,
    /// Fail on repeated header names instead of letting the later column win
    pub unique_headers: bool,
}

/// Decodes a workbook and turns the rows of one sheet into records,
/// using the first row as field names
#[derive(Debug, Clone, Default)]
pub struct TabularImporter {
    options: ImportOptions,
}

impl TabularImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Decode an in-memory workbook (xlsx, xlsm, xlsb, xls or ods)
    pub fn import_bytes(&self, bytes: &[u8]) -> TabularResult<TabularDocument> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| TabularError::FileProcessing(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = self.select_sheet(&sheet_names)?;
        debug!(sheet = %sheet_name, sheets = sheet_names.len(), "selected sheet");

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| TabularError::FileProcessing(e.to_string()))?;
        let last_row = declared_last_row(&mut workbook, &sheet_name);

        let records = self.records_from_range(&range, last_row)?;
        info!(sheet = %sheet_name, rows = records.len(), "imported sheet");
        Ok(records)
    }

    /// Pick the configured sheet, or the first one in declared order
    fn select_sheet(&self, sheet_names: &[String]) -> TabularResult<String> {
        match &self.options.sheet_name {
            Some(wanted) => sheet_names
                .iter()
                .find(|name| *name == wanted)
                .cloned()
                .ok_or_else(|| TabularError::SheetNotFound(wanted.clone())),
            None => sheet_names
                .first()
                .cloned()
                .ok_or(TabularError::EmptyWorkbook),
        }
    }

    /// Row 0 is the header; every later row becomes one record holding only
    /// the columns that have a value.
    ///
    /// `last_row` is the sheet's declared last row (0-based, absolute). Rows
    /// past the last used cell up to it become empty records.
    fn records_from_range(
        &self,
        range: &Range<Data>,
        last_row: Option<u32>,
    ) -> TabularResult<TabularDocument> {
        // Sheet without cells: no header, no records
        let Some((header_row, first_col)) = range.start() else {
            return Ok(Vec::new());
        };
        let mut rows = range.rows();
        let Some(header_cells) = rows.next() else {
            return Ok(Vec::new());
        };
        let headers = self.header_names(header_cells, first_col as usize)?;

        let used_rows = range.height().saturating_sub(1);
        let declared_rows = last_row
            .map(|last| last.saturating_sub(header_row) as usize)
            .unwrap_or(0);
        let trailing_blank = declared_rows.saturating_sub(used_rows);

        let mut records = Vec::new();
        for row in rows {
            let mut record = Record::new();
            for (header, cell) in headers.iter().zip(row) {
                if let Some(value) = convert_cell(cell) {
                    record.insert(header.clone(), value);
                }
            }

            if record.is_empty() && self.options.skip_blank_rows {
                continue;
            }
            records.push(record);
        }

        if trailing_blank > 0 && !self.options.skip_blank_rows {
            debug!(rows = trailing_blank, "trailing blank rows");
            records.resize(records.len() + trailing_blank, Record::new());
        }

        Ok(records)
    }

    /// `first_col` is the sheet column (0-based) the header row starts at
    fn header_names(&self, cells: &[Data], first_col: usize) -> TabularResult<Vec<String>> {
        let names: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let name = cell_to_string(cell);
                if name.is_empty() {
                    fallback_header(first_col + col)
                } else {
                    name
                }
            })
            .collect();

        if self.options.unique_headers {
            let mut seen = IndexSet::new();
            for name in &names {
                if !seen.insert(name.as_str()) {
                    return Err(TabularError::DuplicateHeader(name.clone()));
                }
            }
        }

        Ok(names)
    }
}

/// Last row of the sheet's declared dimension (xlsx/xlsb `dimension` record).
/// calamine drops blank cells, so this is the only trace of rows that hold
/// no values at the end of the sheet.
fn declared_last_row<RS>(workbook: &mut Sheets<RS>, sheet_name: &str) -> Option<u32>
where
    RS: Read + Seek,
{
    match workbook {
        Sheets::Xlsx(xlsx) => xlsx
            .worksheet_cells_reader(sheet_name)
            .ok()
            .map(|reader| reader.dimensions().end.0),
        Sheets::Xlsb(xlsb) => xlsb
            .worksheet_cells_reader(sheet_name)
            .ok()
            .map(|reader| reader.dimensions().end.0),
        _ => None,
    }
}

/// Name for a column whose header cell is blank, from its 0-based sheet column
fn fallback_header(col: usize) -> String {
    format!("Column{}", col + 1)
}

/// Map a decoded cell to a record value. Blank cells yield `None`.
fn convert_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Boolean(*b)),
        // Dates stay as Excel serial numbers
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => Some(CellValue::Text(s.clone())),
        Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}

/// Render a header cell as text
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Integral values print without a decimal point (2025.0 → "2025")
fn format_number(n: f64) -> String {
    match as_integer(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}
