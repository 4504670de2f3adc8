//! Field splitting and numeric parsing primitives
//!
//! Every format parser is built from these helpers. None of them know about
//! line numbers; callers wrap a [`TokenizeError`] into a line-tagged parse
//! error.

use thiserror::Error;

/// Affymetrix placeholder for "no value"
pub const AFFX_NULL: &str = "---";

/// Literals treated as an absent value (compared case-insensitively)
pub const MAGIC_NULLS: [&str; 4] = ["NULL", "NA", "-", AFFX_NULL];

/// Space or tab
pub const WHITESPACE_DELIMS: &str = " \t";

/// Failures raised by the tokenizers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("Only numbers expected but non-number '{value}' found in column {column}")]
    BadFloat { column: usize, value: String },

    #[error("Only integers expected but non-integer '{value}' found in column {column}")]
    BadInt { column: usize, value: String },

    #[error("Malformed CSV line: {0}")]
    Csv(String),
}

/// True if `s` is one of the magic null words
pub fn is_magic_null(s: &str) -> bool {
    let s = s.trim();
    MAGIC_NULLS.iter().any(|null| s.eq_ignore_ascii_case(null))
}

/// Split on any character of `delims`, collapsing delimiter runs.
///
/// Tokens are trimmed; no empty token is produced from a run of delimiters.
pub fn split_fields(s: &str, delims: &str) -> Vec<String> {
    s.split(|c: char| delims.contains(c))
        .filter(|token| !token.is_empty())
        .map(|token| token.trim().to_string())
        .collect()
}

/// Like [`split_fields`], mapping magic null words to `None`.
pub fn split_fields_nullable(s: &str, delims: &str) -> Vec<Option<String>> {
    split_fields(s, delims)
        .into_iter()
        .map(|token| if is_magic_null(&token) { None } else { Some(token) })
        .collect()
}

/// Tab split that keeps empty fields, reconciled against `expected` columns.
///
/// - the first field is always kept, even when empty
/// - an empty field is produced for every pair of consecutive tabs
/// - a single trailing tab does not open a new field
/// - short rows are padded with empty strings
/// - on long rows, surplus fields past `expected` are dropped only if empty;
///   a non-empty surplus field is kept so that column validation fails later
pub fn split_fields_exact(s: &str, expected: usize) -> Vec<String> {
    let mut fields: Vec<String> = if s.is_empty() {
        Vec::new()
    } else {
        let mut raw: Vec<String> = s.split('\t').map(|f| f.trim().to_string()).collect();
        if s.ends_with('\t') {
            raw.pop();
        }
        raw
    };

    if fields.len() < expected {
        fields.resize(expected, String::new());
        return fields;
    }

    if fields.len() > expected {
        let surplus = fields.split_off(expected);
        fields.extend(surplus.into_iter().filter(|f| !f.trim().is_empty()));
    }

    fields
}

/// Trim the line, then split on every tab keeping empty fields untrimmed.
pub fn split_tab_fields(s: &str) -> Vec<String> {
    s.trim().split('\t').map(str::to_string).collect()
}

/// Split one CSV line, honouring double quotes and `""` escapes.
///
/// A quote inside an unquoted field is kept as text, and an unterminated
/// quoted field runs to the end of the line.
pub fn split_csv(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record.iter().map(str::to_string).collect()),
        Ok(false) => Ok(Vec::new()),
        Err(e) => Err(TokenizeError::Csv(e.to_string())),
    }
}

/// Parse every delimiter-separated token as a float.
///
/// The error names the 1-based column that failed.
pub fn parse_floats_delimited(s: &str, delims: &str) -> Result<Vec<f32>, TokenizeError> {
    split_fields(s, delims)
        .into_iter()
        .enumerate()
        .map(|(i, token)| {
            parse_float(&token).ok_or(TokenizeError::BadFloat {
                column: i + 1,
                value: token,
            })
        })
        .collect()
}

/// Parse every delimiter-separated token as an integer.
pub fn parse_ints_delimited(s: &str, delims: &str) -> Result<Vec<i64>, TokenizeError> {
    split_fields(s, delims)
        .into_iter()
        .enumerate()
        .map(|(i, token)| {
            token.parse::<i64>().map_err(|_| TokenizeError::BadInt {
                column: i + 1,
                value: token,
            })
        })
        .collect()
}

/// Locale-independent float parse.
///
/// Accepts the spellings found in exported matrices (`NaN`, `Infinity`,
/// `-Infinity`) besides plain decimals.
pub fn parse_float(token: &str) -> Option<f32> {
    let token = token.trim();
    match token {
        "NaN" => Some(f32::NAN),
        "Infinity" | "+Infinity" => Some(f32::INFINITY),
        "-Infinity" => Some(f32::NEG_INFINITY),
        _ => token.parse::<f32>().ok(),
    }
}

/// Parse a cell that may be empty; empty becomes NaN.
pub fn parse_float_or_nan(token: &str) -> Option<f32> {
    if token.trim().is_empty() {
        Some(f32::NAN)
    } else {
        parse_float(token)
    }
}

/// Render a value the way exports write it (`NaN` for missing).
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f32::INFINITY {
        "Infinity".to_string()
    } else if value == f32::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_collapses_runs() {
        assert_eq!(split_fields("a \t b\t\tc ", WHITESPACE_DELIMS), vec!["a", "b", "c"]);
        assert!(split_fields("", "\t").is_empty());
    }

    #[test]
    fn test_split_fields_nullable() {
        let fields = split_fields_nullable("A\tnull\tna\t-\t---\tna2\tNot Available", "\t");
        assert_eq!(
            fields,
            vec![
                Some("A".to_string()),
                None,
                None,
                None,
                None,
                Some("na2".to_string()),
                Some("Not Available".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_fields_exact_keeps_empties() {
        assert_eq!(split_fields_exact("a\t\tb", 3), vec!["a", "", "b"]);
        assert_eq!(split_fields_exact("\tdesc\t1", 3), vec!["", "desc", "1"]);
    }

    #[test]
    fn test_split_fields_exact_pads_short_rows() {
        assert_eq!(split_fields_exact("a\tb", 4), vec!["a", "b", "", ""]);
        assert_eq!(split_fields_exact("a\t", 2), vec!["a", ""]);
    }

    #[test]
    fn test_split_fields_exact_surplus_policy() {
        assert_eq!(split_fields_exact("a\tb\t\t\t", 2), vec!["a", "b"]);
        assert_eq!(split_fields_exact("a\tb\t\tc", 2), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_tab_fields() {
        assert_eq!(split_tab_fields("  a\t\tb \n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_csv_quotes() {
        let fields = split_csv(r#"1007_s_at,"DDR1 /// MIR4640","discoidin, ""receptor"" 1",x"#).unwrap();
        assert_eq!(
            fields,
            vec!["1007_s_at", "DDR1 /// MIR4640", r#"discoidin, "receptor" 1"#, "x"]
        );
    }

    #[test]
    fn test_split_csv_lenient_quotes() {
        assert_eq!(split_csv(r#"1000_at,5" floppy,x"#).unwrap(), vec!["1000_at", "5\" floppy", "x"]);
        assert_eq!(split_csv(r#"p1,"open, never closed"#).unwrap(), vec!["p1", "open, never closed"]);
    }

    #[test]
    fn test_parse_floats_reports_column() {
        assert_eq!(parse_floats_delimited("1 2.5\t-3", WHITESPACE_DELIMS).unwrap(), vec![1.0, 2.5, -3.0]);
        let err = parse_floats_delimited("1\tx\t3", "\t").unwrap_err();
        assert_eq!(
            err,
            TokenizeError::BadFloat {
                column: 2,
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn test_parse_ints_reports_column() {
        assert_eq!(parse_ints_delimited("12 4", WHITESPACE_DELIMS).unwrap(), vec![12, 4]);
        let err = parse_ints_delimited("12\t4.5", WHITESPACE_DELIMS).unwrap_err();
        assert!(matches!(err, TokenizeError::BadInt { column: 2, .. }));
    }

    #[test]
    fn test_float_spellings() {
        assert!(parse_float("NaN").unwrap().is_nan());
        assert_eq!(parse_float("-Infinity"), Some(f32::NEG_INFINITY));
        assert!(parse_float_or_nan("  ").unwrap().is_nan());
        assert_eq!(parse_float("abc"), None);
        assert_eq!(format_float(f32::NAN), "NaN");
        assert_eq!(format_float(1.5), "1.5");
    }
}
