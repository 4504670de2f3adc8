//! Tab-delimited dataset with an optional description column
//!
//! ```text
//! NAME     DESCRIPTION   spo0   spo30
//! YAL003W  some          0.23   -1.79
//! ```
//!
//! A second header token of `DESCRIPTION` or `DESC` (any case) means every
//! data row carries a description after its name.

use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};
use tracing::debug;

use super::table::{parse_dataset_rows, NA_DESCRIPTION};
use super::{file_error, line_error, log_export, log_import, object_name, Format};
use crate::config::ParserOptions;
use crate::model::Dataset;
use crate::text::tokenize::{format_float, split_fields};
use crate::text::LineReader;

const DESCRIPTION_HEADERS: [&str; 2] = ["DESCRIPTION", "DESC"];

#[derive(Debug, Clone, Default)]
pub struct TxtFormat {
    options: ParserOptions,
}

impl TxtFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Format for TxtFormat {
    type Object = Dataset;
    const FILE_FORMAT: FileFormat = FileFormat::Txt;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<Dataset> {
        log_import(&self.options, Self::FILE_FORMAT, source);

        let mut lines = LineReader::new(reader);
        let header = lines.next_line()?;
        let header_content = header.content.ok_or_else(|| {
            file_error(Self::FILE_FORMAT, "Bad TXT format: no header line")
        })?;

        let mut column_names: Vec<String> = split_fields(&header_content, "\t")
            .into_iter()
            .skip(1)
            .collect();

        let has_desc = column_names
            .first()
            .is_some_and(|first| DESCRIPTION_HEADERS.iter().any(|d| first.eq_ignore_ascii_case(d)));
        if has_desc {
            column_names.remove(0);
        }
        debug!(source = %source, has_desc, "Detected TXT header");

        let mut data_lines = Vec::new();
        loop {
            let line = lines.next_line_trimless()?;
            match line.content {
                Some(content) => data_lines.push((line.number, content)),
                None => break,
            }
        }

        let rows = parse_dataset_rows(
            Self::FILE_FORMAT,
            &data_lines,
            column_names.len(),
            has_desc,
            true,
        )?;

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

        write!(writer, "NAME\tDescription\t")?;
        for column in dataset.column_names() {
            write!(writer, "{}\t", column)?;
        }
        writeln!(writer)?;

        for r in 0..dataset.num_rows() {
            let desc = dataset.row_description(r).unwrap_or(NA_DESCRIPTION);
            let values: Vec<String> = dataset.row(r).iter().map(|v| format_float(*v)).collect();
            writeln!(writer, "{}\t{}\t{}", dataset.row_name(r), desc, values.join("\t"))?;
        }

        writer.flush()?;
        Ok(())
    }
}
