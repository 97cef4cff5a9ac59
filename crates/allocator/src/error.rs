use thiserror::Error;

pub type Result<T> = std::result::Result<T, AllocError>;

#[derive(Debug, Error)]
pub enum AllocError {
    #[error("Quota exceeded: requested {requested} problems, at most {max} allowed")]
    QuotaExceeded { requested: u64, max: u32 },

    #[error("Cell out of range: row {row}, col {col}")]
    InvalidCell { row: usize, col: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected at least 4 columns, got {got}")]
    CsvRow { row: usize, got: usize },

    #[error("Unknown label at row {row}: {label}")]
    UnknownLabel { row: usize, label: String },

    #[error("Invalid count at row {row}: {value}")]
    CountParse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for AllocError {
    fn from(err: toml::de::Error) -> Self {
        AllocError::Config(format!("TOML parse error: {}", err))
    }
}
