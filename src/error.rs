use thiserror::Error;

pub type TabularResult<T> = Result<T, TabularError>;

#[derive(Error, Debug)]
pub enum TabularError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("No file provided")]
    NoFileProvided,

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Error processing file: {0}")]
    FileProcessing(String),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Duplicate header: {0}")]
    DuplicateHeader(String),

    #[error("Unsupported value for field '{field}': {kind}")]
    UnsupportedValue { field: String, kind: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
