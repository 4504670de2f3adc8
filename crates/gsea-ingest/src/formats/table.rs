//! Data-row handling shared by the GCT and TXT dataset formats

use std::collections::HashSet;

use gsea_common::{FileFormat, Result};

use super::line_error;
use crate::model::Matrix;
use crate::text::tokenize::{parse_float_or_nan, split_fields_exact};

/// Description used when a row has none
pub const NA_DESCRIPTION: &str = "NA";

/// Parsed body of a dataset file
#[derive(Debug)]
pub(crate) struct DatasetRows {
    pub matrix: Matrix,
    pub row_names: Vec<String>,
    pub descriptions: Option<Vec<String>>,
}

/// Parse `(line number, raw content)` rows of `name [desc] values...`.
///
/// Rows are split keeping empty fields. Empty names are errors, empty values
/// are NaN. With `has_desc`, an empty description becomes `NA` unless
/// `require_desc` is set, in which case it is an error.
pub(crate) fn parse_dataset_rows(
    fmt: FileFormat,
    data_lines: &[(usize, String)],
    ncols: usize,
    has_desc: bool,
    require_desc: bool,
) -> Result<DatasetRows> {
    let leading = if has_desc { 2 } else { 1 };
    let expected = ncols + leading;

    let mut matrix = Matrix::new(data_lines.len(), ncols);
    let mut row_names = Vec::with_capacity(data_lines.len());
    let mut descriptions = Vec::with_capacity(if has_desc { data_lines.len() } else { 0 });
    let mut seen = HashSet::with_capacity(data_lines.len());

    for (i, (number, content)) in data_lines.iter().enumerate() {
        let number = *number;
        let fields = split_fields_exact(content, expected);
        if fields.len() != expected {
            return Err(line_error(
                fmt,
                number,
                format!(
                    "Bad {} format: expected {} columns but found {}.\n\
                     If this dataset has missing values, impute them before importing it as a dataset",
                    fmt,
                    expected,
                    fields.len()
                ),
            ));
        }

        let row_name = fields[0].trim();
        if row_name.is_empty() {
            return Err(line_error(fmt, number, format!("Bad {} format: row name is empty", fmt)));
        }
        if !seen.insert(row_name.to_string()) {
            return Err(line_error(
                fmt,
                number,
                format!("Bad {} format: duplicate row name {}", fmt, row_name),
            ));
        }
        row_names.push(row_name.to_string());

        if has_desc {
            let desc = fields[1].trim();
            if desc.is_empty() {
                if require_desc {
                    return Err(line_error(
                        fmt,
                        number,
                        format!("Bad {} format: row description is empty", fmt),
                    ));
                }
                descriptions.push(NA_DESCRIPTION.to_string());
            } else {
                descriptions.push(desc.to_string());
            }
        }

        for (f, field) in fields.iter().enumerate().skip(leading) {
            let value = parse_float_or_nan(field).ok_or_else(|| {
                line_error(
                    fmt,
                    number,
                    format!(
                        "Bad {} format: could not parse field '{}' in column {} as a float value.",
                        fmt,
                        field.trim(),
                        f + 1
                    ),
                )
            })?;
            matrix.set(i, f - leading, value);
        }
    }

    Ok(DatasetRows {
        matrix,
        row_names,
        descriptions: if has_desc { Some(descriptions) } else { None },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<(usize, String)> {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| (i + 10, l.to_string()))
            .collect()
    }

    #[test]
    fn test_rows_without_description() {
        let parsed =
            parse_dataset_rows(FileFormat::Txt, &rows(&["a\t1\t2", "b\t\t3"]), 2, false, false)
                .unwrap();
        assert!(parsed.descriptions.is_none());
        assert_eq!(parsed.row_names, vec!["a", "b"]);
        assert!(parsed.matrix.get(1, 0).is_nan());
    }

    #[test]
    fn test_required_description() {
        let err = parse_dataset_rows(FileFormat::Txt, &rows(&["a\td\t1", "b\t\t2"]), 1, true, true)
            .unwrap_err();
        assert_eq!(err.line(), Some(11));
    }

    #[test]
    fn test_non_empty_surplus_field_fails() {
        let err =
            parse_dataset_rows(FileFormat::Gct, &rows(&["a\td\t1\t2"]), 1, true, false).unwrap_err();
        assert!(err.to_string().contains("expected 3 columns but found 4"));
    }
}
