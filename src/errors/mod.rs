//! Error types for craftfolio
//!
//! Each service reports failures through its own enum so callers can tell a
//! recoverable user mistake (duplicate category, missing title) from an I/O
//! problem with the data directory.
//!
//! - **FileError**: reading or writing JSON and text files
//! - **StoreError**: the site content document
//! - **RepositoryError**: project and category persistence
//! - **CategoryError**: category set rules
//! - **EditorError**: project draft validation
//! - **DashboardError**: everything the admin dashboard can refuse
//! - **ContactError**: contact form validation
//!
//! ```rust
//! use craftfolio_lib::errors::CategoryError;
//!
//! let err = CategoryError::InUse("knitting".to_string());
//! assert!(err.to_string().contains("knitting"));
//! ```

pub mod file;
pub mod store;
pub mod catalog;
pub mod dashboard;
pub mod contact;

pub use file::FileError;
pub use store::StoreError;
pub use catalog::{CategoryError, EditorError, RepositoryError};
pub use dashboard::DashboardError;
pub use contact::ContactError;
