use thiserror::Error;

use super::FileError;

/// Failures of the site content document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document exists but could not be read or parsed
    #[error("Unable to read content: {0}")]
    Read(#[source] FileError),

    /// The document could not be written
    #[error("Unable to save content: {0}")]
    Write(#[source] FileError),

    /// A save was requested without a body
    #[error("Invalid payload")]
    MissingBody,

    /// The stored lists hold entries that do not fit the typed model
    #[error("Site content does not match the expected shape: {0}")]
    Shape(#[source] serde_json::Error),
}
