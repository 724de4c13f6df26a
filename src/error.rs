use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaogenError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Missing database name: pass --database or --dsn")]
    MissingDatabase,

    #[error("No tables found in database")]
    NoTables,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The conflict resolver refused to overwrite an existing file.
    #[error("File {} already exists and was not overwritten", .0.display())]
    Declined(PathBuf),

    #[error("Failed to render {template} template: {reason}")]
    Render {
        template: &'static str,
        reason: String,
    },

    #[error("Invalid output file name derived from '{0}'")]
    InvalidFileName(String),
}

impl DaogenError {
    /// True when the error is the non-fatal "user declined overwrite" signal.
    pub fn is_declined(&self) -> bool {
        matches!(self, DaogenError::Declined(_))
    }
}
