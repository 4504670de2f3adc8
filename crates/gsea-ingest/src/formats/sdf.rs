//! String-valued dataframe (SDF)
//!
//! Same layout as the numeric dataframe but tab-delimited and holding text.
//! A `NULL` cell (any case) is an absent value. The header is found with a
//! blank-only skip, so a `#` in its first cell is not a comment.

use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};

use super::{file_error, file_name, line_error, log_export, log_import, Format};
use crate::config::ParserOptions;
use crate::model::StringDataframe;
use crate::text::tokenize::{split_fields, split_fields_exact};
use crate::text::LineReader;

/// Literal written for, and read as, an absent cell
pub const NULL_CELL: &str = "NULL";

#[derive(Debug, Clone, Default)]
pub struct SdfFormat {
    options: ParserOptions,
}

impl SdfFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Format for SdfFormat {
    type Object = StringDataframe;
    const FILE_FORMAT: FileFormat = FileFormat::Sdf;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<StringDataframe> {
        log_import(&self.options, Self::FILE_FORMAT, source);
        let fmt = Self::FILE_FORMAT;

        let mut lines = LineReader::new(reader);
        let header = lines.next_non_empty_line()?;
        let header_content = header
            .content
            .ok_or_else(|| file_error(fmt, "Bad SDF format: no header line"))?;

        let mut header_fields = split_fields(&header_content, "\t").into_iter();
        let row_label = header_fields.next();
        let column_names: Vec<String> = header_fields.collect();
        let expected = column_names.len() + 1;

        let mut row_names = Vec::new();
        let mut cells = Vec::new();
        loop {
            let line = lines.next_line_trimless()?;
            let Some(content) = line.content else {
                break;
            };

            let mut fields = split_fields_exact(&content, expected);
            if fields.len() != expected {
                return Err(line_error(
                    fmt,
                    line.number,
                    format!(
                        "Bad SDF format: expected {} columns but found: {}",
                        expected,
                        fields.len()
                    ),
                ));
            }

            let values = fields.split_off(1);
            cells.extend(values.into_iter().map(|cell| {
                if cell.eq_ignore_ascii_case(NULL_CELL) {
                    None
                } else {
                    Some(cell)
                }
            }));
            row_names.extend(fields);
        }

        let comment = lines.into_comment().to_string();
        let mut sdf = StringDataframe::new(file_name(source), row_names, column_names, cells)?
            .with_comment(comment);
        if let Some(label) = row_label {
            sdf = sdf.with_row_label(label);
        }
        Ok(sdf)
    }

    fn export<W: Write>(&self, sdf: &StringDataframe, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, sdf.name());

        write!(writer, "{}\t", sdf.row_label())?;
        for column in sdf.column_names() {
            write!(writer, "{}\t", column)?;
        }
        writeln!(writer)?;

        for (r, row_name) in sdf.row_names().iter().enumerate() {
            write!(writer, "{}\t", row_name)?;
            for c in 0..sdf.num_cols() {
                write!(writer, "{}\t", sdf.cell(r, c).unwrap_or(NULL_CELL))?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sdf() {
        let input = "\n#ID\tcolor\tshape\nA\tred\tnull\nB\t\tround\n";
        let sdf = SdfFormat::default().parse_str("shapes.sdf", input).unwrap();
        assert_eq!(sdf.row_label(), "#ID");
        assert_eq!(sdf.column_names(), &["color".to_string(), "shape".to_string()]);
        assert_eq!(sdf.cell(0, 0), Some("red"));
        assert_eq!(sdf.cell(0, 1), None);
        assert_eq!(sdf.cell(1, 0), Some(""));
        assert_eq!(sdf.cell(1, 1), Some("round"));
    }

    #[test]
    fn test_too_many_fields() {
        let input = "NAME\tc1\nA\tx\ty\n";
        let err = SdfFormat::default().parse_str("s.sdf", input).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.code(), Some(5013));
    }

    #[test]
    fn test_export_roundtrip() {
        let format = SdfFormat::default();
        let sdf = format.parse_str("s.sdf", "NAME\tc1\tc2\nA\tx\tNULL\n").unwrap();
        let out = format.export_to_string(&sdf).unwrap();
        assert_eq!(out, "NAME\tc1\tc2\t\nA\tx\tNULL\t\n");
        assert_eq!(format.parse_str("s.sdf", &out).unwrap(), sdf);
    }
}
