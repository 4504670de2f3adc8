//! GCT expression matrix
//!
//! ```text
//! #1.2
//! 2   3
//! NAME    Description   s1   s2   s3
//! 1007_s_at   DDR1   1.0   2.0   3.0
//! 1053_at     NA     4.0         6.0
//! ```
//!
//! The counts line fixes the shape. Header and row-count mismatches are
//! reported against the counts line. Data rows are read without trimming so
//! an empty trailing value is still a column; empty values become NaN.

use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};

use super::table::{parse_dataset_rows, NA_DESCRIPTION};
use super::{
    file_error, line_error, log_export, log_import, object_name, tokenize_error, Format,
};
use crate::config::ParserOptions;
use crate::model::Dataset;
use crate::text::tokenize::{format_float, parse_ints_delimited, split_fields, WHITESPACE_DELIMS};
use crate::text::LineReader;

/// Version banner written on export
pub const GCT_VERSION_LINE: &str = "#1.2";

#[derive(Debug, Clone, Default)]
pub struct GctFormat {
    options: ParserOptions,
}

impl GctFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Format for GctFormat {
    type Object = Dataset;
    const FILE_FORMAT: FileFormat = FileFormat::Gct;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<Dataset> {
        log_import(&self.options, Self::FILE_FORMAT, source);
        let fmt = Self::FILE_FORMAT;

        let mut lines = LineReader::new(reader);

        // Counts line: "<rows> <cols>"
        let counts = lines.next_line()?;
        let counts_line = counts.number;
        let counts_content = counts.content.ok_or_else(|| {
            file_error(fmt, "Bad GCT format: missing row/column count line")
        })?;
        let dims = parse_ints_delimited(&counts_content, WHITESPACE_DELIMS)
            .map_err(|e| tokenize_error(fmt, counts_line, e))?;
        if dims.len() != 2 {
            return Err(line_error(
                fmt,
                counts_line,
                format!(
                    "Bad GCT format: expecting two integer values for row/column info, found {} value(s).",
                    dims.len()
                ),
            ));
        }
        let (nrows, ncols) = match (usize::try_from(dims[0]), usize::try_from(dims[1])) {
            (Ok(r), Ok(c)) => (r, c),
            _ => {
                return Err(line_error(
                    fmt,
                    counts_line,
                    "Bad GCT format: row/column counts cannot be negative",
                ))
            },
        };

        // Header: NAME, Description, then the column names
        let header = lines.next_line()?;
        let header_content = header.content.unwrap_or_default();
        let column_names: Vec<String> = split_fields(&header_content, "\t")
            .into_iter()
            .skip(2)
            .collect();
        if column_names.len() != ncols {
            return Err(line_error(
                fmt,
                counts_line,
                format!(
                    "Bad GCT format: expected {} columns based on header line specification but found {}",
                    ncols,
                    column_names.len()
                ),
            ));
        }

        // The declared count is only trusted once the rows are read
        let mut data_lines = Vec::new();
        loop {
            let line = lines.next_line_trimless()?;
            match line.content {
                Some(content) => data_lines.push((line.number, content)),
                None => break,
            }
        }

        if data_lines.len() != nrows {
            return Err(line_error(
                fmt,
                counts_line,
                format!(
                    "Bad GCT format: expected {} rows based on header line specification but found {}",
                    nrows,
                    data_lines.len()
                ),
            ));
        }

        let rows = parse_dataset_rows(fmt, &data_lines, ncols, true, false)?;

        let comment = lines.into_comment().to_string();
        Ok(Dataset::new(
            object_name(source),
            rows.matrix,
            rows.row_names,
            column_names,
            rows.descriptions,
        )?
        .with_comment(comment))
    }

    fn export<W: Write>(&self, dataset: &Dataset, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, dataset.name());

        writeln!(writer, "{}", GCT_VERSION_LINE)?;
        writeln!(writer, "{}\t{}", dataset.num_rows(), dataset.num_cols())?;
        writeln!(writer, "NAME\tDescription\t{}", dataset.column_names().join("\t"))?;

        for r in 0..dataset.num_rows() {
            let desc = dataset
                .row_description(r)
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(NA_DESCRIPTION);
            let values: Vec<String> = dataset.row(r).iter().map(|v| format_float(*v)).collect();
            writeln!(
                writer,
                "{}\t{}\t{}",
                dataset.row_name(r),
                desc,
                values.join("\t")
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
