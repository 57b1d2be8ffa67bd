use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuilderError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Statement file is missing expected column: {0}")]
    MissingColumn(String),

    #[error("Unparseable transaction date: {0}")]
    InvalidDate(String),

    #[error("Unparseable amount: {0:?}")]
    InvalidAmount(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GuilderError>;
