//! Error types for GSEA IO

use crate::docs::error_help_url;
use crate::types::FileFormat;
use thiserror::Error;

/// Result type alias for GSEA IO operations
pub type Result<T> = std::result::Result<T, GseaError>;

/// Code attached to "multiple probes for one symbol" failures in remap-only mode
pub const AMBIGUOUS_REMAP_ERROR_CODE: u32 = 1020;

/// Code attached to collapses that leave nothing behind
pub const EMPTY_COLLAPSE_ERROR_CODE: u32 = 1005;

/// A structural violation found while parsing a file.
///
/// `line` is the 1-based physical line of the input, or `None` when the
/// problem concerns the file as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub format: FileFormat,
    pub line: Option<usize>,
    pub message: String,
}

impl ParseError {
    /// Error tied to a specific line
    pub fn at_line(format: FileFormat, line: usize, message: impl Into<String>) -> Self {
        Self {
            format,
            line: Some(line),
            message: message.into(),
        }
    }

    /// Error about the whole input
    pub fn whole_file(format: FileFormat, message: impl Into<String>) -> Self {
        Self {
            format,
            line: None,
            message: message.into(),
        }
    }

    /// Stable numeric code of the format that failed
    pub fn code(&self) -> u32 {
        self.format.error_code()
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "Line {}: ", line)?;
        }
        write!(
            f,
            "{}\nSee {} for more information.",
            self.message,
            error_help_url(self.code())
        )
    }
}

impl std::error::Error for ParseError {}

/// Main error type for GSEA IO
#[derive(Error, Debug)]
pub enum GseaError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multiple rows mapped to the symbol '{symbol}'. This is not allowed in Remap_only mode.")]
    AmbiguousRemap { symbol: String },

    #[error("The collapsed ranked list '{source_name}' was empty when used with chip: {chip}")]
    EmptyCollapse { source_name: String, chip: String },

    #[error("Unknown chip file type for parsing: {0}")]
    UnknownChipSource(String),

    #[error("Seq_Accession chips need a gene symbol reference chip: {0}")]
    MissingChipReference(String),

    #[error("Invalid object: {0}")]
    InvalidObject(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GseaError {
    /// Create an invalid object error
    pub fn invalid_object(msg: impl Into<String>) -> Self {
        Self::InvalidObject(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable numeric code, when the failure has one
    pub fn code(&self) -> Option<u32> {
        match self {
            GseaError::Parse(e) => Some(e.code()),
            GseaError::AmbiguousRemap { .. } => Some(AMBIGUOUS_REMAP_ERROR_CODE),
            GseaError::EmptyCollapse { .. } => Some(EMPTY_COLLAPSE_ERROR_CODE),
            GseaError::UnknownChipSource(_) | GseaError::MissingChipReference(_) => {
                Some(FileFormat::Chip.error_code())
            },
            _ => None,
        }
    }

    /// Line number of a parse failure
    pub fn line(&self) -> Option<usize> {
        match self {
            GseaError::Parse(e) => e.line,
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_line() {
        let err = ParseError::at_line(FileFormat::Gct, 2, "Bad GCT format");
        let text = err.to_string();
        assert!(text.starts_with("Line 2: Bad GCT format"));
        assert!(text.contains("5005"));
    }

    #[test]
    fn test_parse_error_display_whole_file() {
        let err = ParseError::whole_file(FileFormat::Rnk, "empty input");
        assert!(err.to_string().starts_with("empty input"));
        assert_eq!(err.code(), 5011);
    }

    #[test]
    fn test_codes() {
        let err: GseaError = ParseError::at_line(FileFormat::Gmx, 7, "x").into();
        assert_eq!(err.code(), Some(5007));
        assert_eq!(err.line(), Some(7));

        let err = GseaError::AmbiguousRemap {
            symbol: "X".to_string(),
        };
        assert_eq!(err.code(), Some(1020));
        assert!(err.to_string().contains("'X'"));
        assert_eq!(err.line(), None);

        let err = GseaError::config("bad");
        assert_eq!(err.code(), None);
    }
}
