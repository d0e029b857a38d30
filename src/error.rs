use rusqlite::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// All possible errors in the catalogue
#[derive(Error, Debug)]
pub enum AutosError {
    #[error("Cannot open database {path}: {source}", path = path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Unknown table: {0}. Expected one of: autos, models")]
    UnknownTable(String),

    #[error("Unknown column '{column}' for table {table}")]
    UnknownColumn { table: &'static str, column: String },

    #[error("Column '{0}' cannot be changed")]
    ImmutableColumn(&'static str),

    #[error("At least one column=value pair is required")]
    EmptyFields,

    #[error("Invalid value for {column}: {reason}")]
    InvalidValue { column: String, reason: String },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    InvalidDate(String),

    #[error("Invalid status '{0}': must be 1 to 15 characters")]
    InvalidStatus(String),

    #[error("No row with id {id} in {table}")]
    RowNotFound { table: &'static str, id: i64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AutosError {
    /// True when SQLite rejected the statement because of a constraint,
    /// foreign keys included.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            AutosError::Db(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AutosError>;
