//! GSEA IO Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling and logging for the GSEA IO workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`GseaError`], [`ParseError`] and the [`Result`] alias
//! - **Types**: [`FileFormat`] identities with their stable error codes
//! - **Docs**: documentation links keyed by error code
//! - **Logging**: `tracing` subscriber configuration
//!
//! # Example
//!
//! ```no_run
//! use gsea_common::{FileFormat, GseaError, ParseError, Result};
//!
//! fn check_header(tokens: &[&str]) -> Result<()> {
//!     if tokens.len() != 2 {
//!         return Err(ParseError::at_line(FileFormat::Gct, 1, "expected two integers").into());
//!     }
//!     Ok(())
//! }
//! ```

pub mod docs;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{GseaError, ParseError, Result};
pub use types::FileFormat;
