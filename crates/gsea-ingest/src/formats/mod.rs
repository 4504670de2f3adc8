//! File format parsers and exporters
//!
//! One type per format implements [`Format`]. Parsers are built from the
//! stateless helpers in [`crate::text`]; the only state a parser holds is its
//! [`ParserOptions`].
//!
//! # Example
//!
//! ```no_run
//! use gsea_ingest::formats::{Format, GctFormat};
//! use std::path::Path;
//!
//! # fn main() -> gsea_common::Result<()> {
//! let dataset = GctFormat::default().parse_file(Path::new("P53.gct.gz"))?;
//! println!("{} rows x {} columns", dataset.num_rows(), dataset.num_cols());
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use gsea_common::{FileFormat, GseaError, ParseError, Result};
use tracing::{debug, info};

use crate::config::ParserOptions;
use crate::text::TokenizeError;

pub mod chip;
pub mod dataframe;
pub mod gct;
pub mod gmt;
pub mod gmx;
pub mod rnk;
pub mod rpt;
pub mod sdf;
mod table;
pub mod txt;

pub use chip::{classify_chip_source, ChipFormat, ChipReference, ChipSource};
pub use dataframe::DataframeFormat;
pub use gct::GctFormat;
pub use gmt::GmtFormat;
pub use gmx::GmxFormat;
pub use rnk::RnkFormat;
pub use rpt::RptFormat;
pub use sdf::SdfFormat;
pub use table::NA_DESCRIPTION;
pub use txt::TxtFormat;

/// Suffix recognised as gzip compression
pub const GZIP_SUFFIX: &str = ".gz";

/// Parse and export capability of one file format
pub trait Format {
    /// Object produced by parsing and consumed by exporting
    type Object;

    /// Format identity, used for error codes
    const FILE_FORMAT: FileFormat;

    fn options(&self) -> &ParserOptions;

    /// Parse a whole stream. `source` names the input in the result and in logs.
    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<Self::Object>;

    /// Write `object` in this format
    fn export<W: Write>(&self, object: &Self::Object, writer: W) -> Result<()>;

    /// Parse a file, decompressing `.gz` inputs transparently
    fn parse_file(&self, path: &Path) -> Result<Self::Object> {
        let file = File::open(path)?;
        let path_str = path.to_string_lossy();

        match path_str.strip_suffix(GZIP_SUFFIX) {
            Some(source) => self.parse(source, BufReader::new(GzDecoder::new(file))),
            None => self.parse(&path_str, BufReader::new(file)),
        }
    }

    /// Parse in-memory text
    fn parse_str(&self, source: &str, content: &str) -> Result<Self::Object> {
        self.parse(source, content.as_bytes())
    }

    /// Export to a file, creating or truncating it
    fn export_file(&self, object: &Self::Object, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.export(object, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Export to an in-memory string
    fn export_to_string(&self, object: &Self::Object) -> Result<String> {
        let mut buf = Vec::new();
        self.export(object, &mut buf)?;
        String::from_utf8(buf).map_err(|e| GseaError::invalid_object(e.to_string()))
    }
}

/// Last path component of `source`
pub fn file_name(source: &str) -> &str {
    source.rsplit(['/', '\\']).next().unwrap_or(source)
}

/// File name without its final extension ("data/P53.gct" -> "P53")
pub fn object_name(source: &str) -> &str {
    let name = file_name(source);
    match name.rfind('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name,
    }
}

pub(crate) fn log_import(options: &ParserOptions, format: FileFormat, source: &str) {
    if options.silent {
        debug!(format = %format, source = %source, "Begun importing");
    } else {
        info!(format = %format, source = %source, "Begun importing");
    }
}

pub(crate) fn log_export(format: FileFormat, name: &str) {
    debug!(format = %format, name = %name, "Exporting");
}

pub(crate) fn line_error(format: FileFormat, line: usize, message: impl Into<String>) -> GseaError {
    ParseError::at_line(format, line, message).into()
}

pub(crate) fn file_error(format: FileFormat, message: impl Into<String>) -> GseaError {
    ParseError::whole_file(format, message).into()
}

pub(crate) fn tokenize_error(format: FileFormat, line: usize, err: TokenizeError) -> GseaError {
    line_error(format, line, err.to_string())
}

/// Position of `column` in `headers`, if present
pub(crate) fn column_index(headers: &[String], column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

/// Position of a column that must be present
pub(crate) fn required_column(
    format: FileFormat,
    headers: &[String],
    column: &str,
    line: usize,
) -> Result<usize> {
    column_index(headers, column)
        .ok_or_else(|| line_error(format, line, format!("Expected column not found: {}", column)))
}
