//! Run report (RPT)
//!
//! ```text
//! producer_class   xtools.gsea.Gsea
//! timestamp        1136073600000
//! param            nperm   1000
//!
//! file             /results/index.html
//! ```
//!
//! Keywords are matched case-insensitively. Lines starting with any other
//! keyword are ignored.

use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};

use super::{file_name, line_error, log_export, log_import, Format};
use crate::config::ParserOptions;
use crate::model::Report;
use crate::text::tokenize::split_fields;
use crate::text::LineReader;

pub const PRODUCER_CLASS_ENTRY: &str = "producer_class";
pub const TIMESTAMP_ENTRY: &str = "timestamp";
pub const PARAM_ENTRY: &str = "param";
pub const FILE_ENTRY: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    ProducerClass,
    Timestamp,
    Param,
    File,
}

impl Keyword {
    fn parse(token: &str) -> Option<Self> {
        [
            (PRODUCER_CLASS_ENTRY, Keyword::ProducerClass),
            (TIMESTAMP_ENTRY, Keyword::Timestamp),
            (PARAM_ENTRY, Keyword::Param),
            (FILE_ENTRY, Keyword::File),
        ]
        .into_iter()
        .find(|(entry, _)| token.eq_ignore_ascii_case(entry))
        .map(|(_, keyword)| keyword)
    }

    /// Number of fields a line with this keyword must have
    fn arity(self) -> usize {
        match self {
            Keyword::Param => 3,
            _ => 2,
        }
    }

    fn entry(self) -> &'static str {
        match self {
            Keyword::ProducerClass => PRODUCER_CLASS_ENTRY,
            Keyword::Timestamp => TIMESTAMP_ENTRY,
            Keyword::Param => PARAM_ENTRY,
            Keyword::File => FILE_ENTRY,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RptFormat {
    options: ParserOptions,
}

impl RptFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Format for RptFormat {
    type Object = Report;
    const FILE_FORMAT: FileFormat = FileFormat::Rpt;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<Report> {
        log_import(&self.options, Self::FILE_FORMAT, source);
        let fmt = Self::FILE_FORMAT;

        let mut lines = LineReader::new(reader);
        let mut report = Report::new(file_name(source));

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            // Tabs only: file names may contain spaces
            let fields = split_fields(&content, "\t");
            let Some(keyword) = fields.first().and_then(|f| Keyword::parse(f)) else {
                continue;
            };

            match (keyword, fields.as_slice()) {
                (Keyword::ProducerClass, [_, producer]) => {
                    report.producer = Some(producer.clone());
                },
                (Keyword::Timestamp, [_, timestamp]) => {
                    report.timestamp = timestamp.parse::<i64>().map_err(|_| {
                        line_error(
                            fmt,
                            line.number,
                            format!(
                                "Bad RPT format: could not parse field '{}' as a long value.",
                                timestamp
                            ),
                        )
                    })?;
                },
                (Keyword::File, [_, file]) => report.files.push(file.clone()),
                (Keyword::Param, [_, key, value]) => {
                    report.params.insert(key.clone(), value.clone());
                },
                _ => {
                    return Err(line_error(
                        fmt,
                        line.number,
                        format!(
                            "Bad RPT format: expected {} fields for {} but found {}",
                            keyword.arity(),
                            keyword.entry(),
                            fields.len()
                        ),
                    ));
                },
            }
        }

        report.comment = lines.into_comment().to_string();
        Ok(report)
    }

    fn export<W: Write>(&self, report: &Report, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, &report.name);

        if let Some(producer) = &report.producer {
            writeln!(writer, "{}\t{}", PRODUCER_CLASS_ENTRY, producer)?;
        }
        writeln!(writer, "{}\t{}", TIMESTAMP_ENTRY, report.timestamp)?;
        for (key, value) in &report.params {
            writeln!(writer, "{}\t{}\t{}", PARAM_ENTRY, key, value)?;
        }
        writeln!(writer)?;
        for file in &report.files {
            writeln!(writer, "{}\t{}", FILE_ENTRY, file)?;
        }

        writer.flush()?;
        Ok(())
    }
}
