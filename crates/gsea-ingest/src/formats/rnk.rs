//! Ranked list (RNK)
//!
//! Two tab-separated fields per line: identifier and score. A header on the
//! first content line is tolerated: it is dropped when its score does not
//! parse or it reads `Name` / `Rank`. Entries come back sorted by descending
//! score whatever the input order.

use std::collections::HashSet;
use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};
use tracing::debug;

use super::{line_error, log_export, log_import, object_name, Format};
use crate::config::ParserOptions;
use crate::model::RankedList;
use crate::text::tokenize::{format_float, parse_float, split_fields};
use crate::text::LineReader;

#[derive(Debug, Clone, Default)]
pub struct RnkFormat {
    options: ParserOptions,
}

impl RnkFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

fn is_header(name: &str, score: &str) -> bool {
    name.eq_ignore_ascii_case("Name")
        || score.eq_ignore_ascii_case("Rank")
        || parse_float(score).is_none()
}

impl Format for RnkFormat {
    type Object = RankedList;
    const FILE_FORMAT: FileFormat = FileFormat::Rnk;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<RankedList> {
        log_import(&self.options, Self::FILE_FORMAT, source);
        let fmt = Self::FILE_FORMAT;

        let mut lines = LineReader::new(reader);
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut first = true;

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            let fields = split_fields(&content, "\t");
            if fields.len() != 2 {
                return Err(line_error(
                    fmt,
                    line.number,
                    format!("Bad RNK format: expected 2 fields but found {}", fields.len()),
                ));
            }
            let (name, score_field) = (&fields[0], &fields[1]);

            if std::mem::take(&mut first) && is_header(name, score_field) {
                debug!(source = %source, line = line.number, "Skipping RNK header line");
                continue;
            }

            let score = parse_float(score_field).ok_or_else(|| {
                line_error(
                    fmt,
                    line.number,
                    format!(
                        "Bad RNK format: could not parse rank field '{}' as a float value.",
                        score_field
                    ),
                )
            })?;

            if !seen.insert(name.clone()) {
                return Err(line_error(
                    fmt,
                    line.number,
                    format!("Bad RNK format: duplicate identifier {}", name),
                ));
            }
            entries.push((name.clone(), score));
        }

        let comment = lines.into_comment().to_string();
        Ok(RankedList::new(object_name(source), entries)?.with_comment(comment))
    }

    fn export<W: Write>(&self, list: &RankedList, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, list.name());

        for (id, score) in list.entries() {
            writeln!(writer, "{}\t{}", id, format_float(*score))?;
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
    fn test_header_line_is_skipped_and_sorted() {
        let list = RnkFormat::default()
            .parse_str("/ranks/p53.rnk", "Gene\tScore\nA\t1.0\nB\t2.0\n")
            .unwrap();
        assert_eq!(list.name(), "p53");
        assert_eq!(
            list.entries(),
            &[("B".to_string(), 2.0), ("A".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_comment_lines_are_kept() {
        let list = RnkFormat::default()
            .parse_str("t.rnk", "# ranked by t\nA\t1.0\n")
            .unwrap();
        assert_eq!(list.comment(), " ranked by t\n");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_name_rank_header_is_skipped() {
        let list = RnkFormat::default()
            .parse_str("r.rnk", "name\t5\nA\t1\n")
            .unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_only_first_line_may_be_header() {
        let err = RnkFormat::default()
            .parse_str("r.rnk", "Gene\tScore\nA\t1\nB\tnope\n")
            .unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.code(), Some(5011));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = RnkFormat::default().parse_str("r.rnk", "A\t1\t2\n").unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_duplicate_identifier() {
        let err = RnkFormat::default().parse_str("r.rnk", "A\t1\n\nA\t2\n").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("duplicate identifier A"));
    }

    #[test]
    fn test_export() {
        let format = RnkFormat::default();
        let list = format.parse_str("r.rnk", "A\t-1.5\nB\t3\n").unwrap();
        assert_eq!(format.export_to_string(&list).unwrap(), "B\t3\nA\t-1.5\n");
    }
}
