//! Whitespace-delimited numeric dataframe
//!
//! ```text
//! NAME    col_a   col_b
//! row1    1.0     2.5
//! row2    -3      4e-2
//! ```
//!
//! The first header token is a placeholder. Rows split on spaces or tabs, so
//! row names cannot contain spaces.

use std::collections::HashSet;
use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};
use tracing::debug;

use super::{file_error, file_name, line_error, log_export, log_import, Format};
use crate::config::ParserOptions;
use crate::model::{Dataset, Matrix};
use crate::text::tokenize::{format_float, parse_float, split_fields, WHITESPACE_DELIMS};
use crate::text::LineReader;

/// Header placeholder written on export
pub const NAME_HEADER: &str = "NAME";

#[derive(Debug, Clone, Default)]
pub struct DataframeFormat {
    options: ParserOptions,
}

impl DataframeFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Format for DataframeFormat {
    type Object = Dataset;
    const FILE_FORMAT: FileFormat = FileFormat::Dataframe;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<Dataset> {
        log_import(&self.options, Self::FILE_FORMAT, source);

        let mut lines = LineReader::new(reader);
        let header = lines.next_line()?;
        let header_content = header.content.ok_or_else(|| {
            file_error(Self::FILE_FORMAT, "Bad DataFrame format: no header line")
        })?;

        let column_names: Vec<String> = split_fields(&header_content, WHITESPACE_DELIMS)
            .into_iter()
            .skip(1)
            .collect();
        let expected = column_names.len() + 1;

        let mut row_names = Vec::new();
        let mut rows = Vec::new();
        let mut seen = HashSet::new();

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            let fields = split_fields(&content, WHITESPACE_DELIMS);
            if fields.len() != expected {
                return Err(line_error(
                    Self::FILE_FORMAT,
                    line.number,
                    format!(
                        "Bad DataFrame format: expected {} columns but found: {}",
                        expected,
                        fields.len()
                    ),
                ));
            }

            let mut values = Vec::with_capacity(column_names.len());
            for (f, field) in fields.iter().enumerate().skip(1) {
                let value = parse_float(field).ok_or_else(|| {
                    line_error(
                        Self::FILE_FORMAT,
                        line.number,
                        format!(
                            "Bad DataFrame format: could not parse field '{}' in column {} as a float value",
                            field,
                            f + 1
                        ),
                    )
                })?;
                values.push(value);
            }

            let row_name = fields[0].clone();
            if !seen.insert(row_name.clone()) {
                return Err(line_error(
                    Self::FILE_FORMAT,
                    line.number,
                    format!("Bad DataFrame format: duplicate row name {}", row_name),
                ));
            }
            row_names.push(row_name);
            rows.push(values);
        }

        debug!(
            source = %source,
            rows = row_names.len(),
            columns = column_names.len(),
            "Completed parsing DataFrame"
        );

        let matrix = Matrix::from_rows(rows, column_names.len())?;
        let comment = lines.into_comment().to_string();
        Ok(Dataset::new(file_name(source), matrix, row_names, column_names, None)?
            .with_comment(comment))
    }

    fn export<W: Write>(&self, dataset: &Dataset, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, dataset.name());

        write!(writer, "{}\t", NAME_HEADER)?;
        for column in dataset.column_names() {
            write!(writer, "{}\t", column)?;
        }
        writeln!(writer)?;

        for r in 0..dataset.num_rows() {
            let values: Vec<String> = dataset.row(r).iter().map(|v| format_float(*v)).collect();
            writeln!(writer, "{}\t{}", dataset.row_name(r), values.join("\t"))?;
        }

        writer.flush()?;
        Ok(())
    }
}
