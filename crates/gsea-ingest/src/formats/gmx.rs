//! Column-oriented gene-set matrix (GMX)
//!
//! ```text
//! SET_A     SET_B
//! na        description of b
//! TP53      EGFR
//! MDM2
//! ```
//!
//! Line 1 holds the set names, line 2 their descriptions, and every later line
//! one member per set. Blank and `NULL` cells add nothing.

use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};
use tracing::debug;

use super::{file_error, file_name, line_error, log_export, log_import, Format};
use crate::config::ParserOptions;
use crate::model::{GeneSet, GeneSetMatrix};
use crate::text::tokenize::{split_fields, split_fields_exact};
use crate::text::LineReader;

/// Written for a set without a description
pub const NA_NAME: &str = "NA";

#[derive(Debug, Clone, Default)]
pub struct GmxFormat {
    options: ParserOptions,
}

impl GmxFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

/// Blank, `NULL` or `NA` descriptions are absent
pub(crate) fn english_name(raw: Option<&String>) -> Option<String> {
    raw.map(|s| s.trim())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("NULL") && !s.eq_ignore_ascii_case(NA_NAME))
        .map(str::to_string)
}

impl Format for GmxFormat {
    type Object = GeneSetMatrix;
    const FILE_FORMAT: FileFormat = FileFormat::Gmx;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<GeneSetMatrix> {
        log_import(&self.options, Self::FILE_FORMAT, source);
        let fmt = Self::FILE_FORMAT;

        let mut lines = LineReader::new(reader);

        let names_line = lines.next_line()?;
        let names = names_line
            .content
            .map(|c| split_fields(&c, "\t"))
            .ok_or_else(|| file_error(fmt, "Bad GMX format: no gene set names"))?;

        let english_line = lines.next_line()?;
        let english = english_line
            .content
            .map(|c| split_fields(&c, "\t"))
            .unwrap_or_default();

        let expected = names.len();
        if english.len() != expected {
            return Err(line_error(
                fmt,
                english_line.number,
                format!(
                    "Bad GMX format: expected {} english names but found {}",
                    expected,
                    english.len()
                ),
            ));
        }

        let mut members: Vec<Vec<String>> = vec![Vec::new(); expected];

        loop {
            let line = lines.next_line_trimless()?;
            let Some(content) = line.content else {
                break;
            };

            let fields = split_fields_exact(&content, expected);
            if fields.len() != expected {
                return Err(line_error(
                    fmt,
                    line.number,
                    format!(
                        "Bad GMX format: expected {} names but found {}",
                        expected,
                        fields.len()
                    ),
                ));
            }

            for (set_members, field) in members.iter_mut().zip(fields) {
                let field = field.trim();
                if field.is_empty() || field.eq_ignore_ascii_case("NULL") {
                    continue;
                }
                set_members.push(field.to_string());
            }
        }

        let source_name = file_name(source);
        let gene_sets: Vec<GeneSet> = names
            .iter()
            .zip(members)
            .enumerate()
            .map(|(i, (name, set_members))| {
                let mut gene_set =
                    GeneSet::new(name.to_uppercase(), english_name(english.get(i)), set_members)
                        .with_source(source_name);
                if self.options.check_gene_set_duplicates {
                    gene_set.dedup_members();
                }
                gene_set
            })
            .collect();

        debug!(source = %source, gene_sets = gene_sets.len(), "Parsed GMX");

        let comment = lines.into_comment().to_string();
        Ok(GeneSetMatrix::new(source_name, gene_sets).with_comment(comment))
    }

    fn export<W: Write>(&self, matrix: &GeneSetMatrix, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, &matrix.name);

        for gene_set in &matrix.gene_sets {
            write!(writer, "{}\t", gene_set.name)?;
        }
        writeln!(writer)?;

        for gene_set in &matrix.gene_sets {
            write!(writer, "{}\t", gene_set.english_name.as_deref().unwrap_or(NA_NAME))?;
        }
        writeln!(writer)?;

        for i in 0..matrix.max_members() {
            for gene_set in &matrix.gene_sets {
                match gene_set.members.get(i) {
                    Some(member) => write!(writer, "{}\t", member)?,
                    None => write!(writer, "\t")?,
                }
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

    const GMX: &str = "set_a\tset_b\nna\tsecond set\nTP53\tEGFR\nMDM2\t\n\tKRAS\nNULL\tEGFR\n";

    #[test]
    fn test_parse_gmx() {
        let gm = GmxFormat::default().parse_str("/sets/c2.gmx", GMX).unwrap();
        assert_eq!(gm.len(), 2);

        let a = &gm.gene_sets[0];
        assert_eq!(a.name, "SET_A");
        assert_eq!(a.english_name, None);
        assert_eq!(a.members, vec!["TP53", "MDM2"]);
        assert_eq!(a.qualified_name(), "c2.gmx#SET_A");

        let b = &gm.gene_sets[1];
        assert_eq!(b.english_name.as_deref(), Some("second set"));
        assert_eq!(b.members, vec!["EGFR", "KRAS"]);
    }

    #[test]
    fn test_duplicate_checking_can_be_disabled() {
        let options = ParserOptions::default().check_gene_set_duplicates(false);
        let gm = GmxFormat::new(options).parse_str("c2.gmx", GMX).unwrap();
        assert_eq!(gm.gene_sets[1].members, vec!["EGFR", "KRAS", "EGFR"]);
    }

    #[test]
    fn test_row_with_extra_member_fails() {
        let input = "A\tB\nna\tna\nx\ty\tz\n";
        let err = GmxFormat::default().parse_str("g.gmx", input).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.code(), Some(5007));
    }

    #[test]
    fn test_english_names_must_match_set_names() {
        for input in ["A\tB\tC\nna\tna\nx\ty\tz\n", "A\tB\nna\tna\tna\nx\ty\n", "A\tB\n"] {
            let err = GmxFormat::default().parse_str("g.gmx", input).unwrap_err();
            assert_eq!(err.code(), Some(5007));
            assert!(err.to_string().contains("english names"));
        }

        let err = GmxFormat::default()
            .parse_str("g.gmx", "A\tB\nonly_one\nx\ty\n")
            .unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_export_roundtrip() {
        let format = GmxFormat::default();
        let gm = format.parse_str("c2.gmx", GMX).unwrap();
        let out = format.export_to_string(&gm).unwrap();
        assert_eq!(out, "SET_A\tSET_B\t\nNA\tsecond set\t\nTP53\tEGFR\t\nMDM2\tKRAS\t\n");
        assert_eq!(format.parse_str("c2.gmx", &out).unwrap(), gm);
    }
}
