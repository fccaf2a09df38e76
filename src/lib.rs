//! SheetPort - record arrays to spreadsheets and back
//!
//! This library exports a sequence of records to a single-sheet `.xlsx`
//! file and imports a spreadsheet's first sheet back into records, using
//! the first row as field names.
//!
//! # Features
//!
//! - Header row derived from record keys (first record's order leads)
//! - Import from a file handle or from a file selector
//! - xlsx, xlsm, xlsb, xls and ods input
//! - Typed records through serde
//!
//! # Example
//!
//! ```no_run
//! use sheetport::{export_tabular, import_tabular, FileHandle, Record};
//!
//! # async fn run() -> sheetport::TabularResult<()> {
//! let users = vec![
//!     Record::new().with("name", "John").with("age", 30),
//!     Record::new().with("name", "Jane").with("age", 25),
//! ];
//! let path = export_tabular(&users, "Users")?;
//!
//! let file = FileHandle::from_path(&path);
//! let imported = import_tabular(Some(&file)).await?;
//! assert_eq!(imported, users);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod cli;
pub mod error;
pub mod excel;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use adapter::{
    export_serializable, export_tabular, export_tabular_with, import_deserialized,
    import_selected, import_tabular, import_tabular_with, records_from_serializable,
};
pub use error::{TabularError, TabularResult};
pub use excel::{ExportOptions, ImportOptions, TabularExporter, TabularImporter};
pub use source::{FileHandle, FileInput, FileSelector};
pub use types::{header_row, CellValue, Record, TabularDocument};
