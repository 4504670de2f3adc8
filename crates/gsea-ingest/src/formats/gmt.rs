//! Row-oriented gene-set matrix (GMT)
//!
//! One set per line: `NAME <tab> description <tab> member...`. Rows need not
//! have the same length.

use std::io::{BufRead, Write};

use gsea_common::{FileFormat, Result};
use tracing::debug;

use super::gmx::{english_name, NA_NAME};
use super::{file_name, line_error, log_export, log_import, Format};
use crate::config::ParserOptions;
use crate::model::{GeneSet, GeneSetMatrix};
use crate::text::tokenize::{is_magic_null, split_fields};
use crate::text::LineReader;

#[derive(Debug, Clone, Default)]
pub struct GmtFormat {
    options: ParserOptions,
}

impl GmtFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Format for GmtFormat {
    type Object = GeneSetMatrix;
    const FILE_FORMAT: FileFormat = FileFormat::Gmt;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<GeneSetMatrix> {
        log_import(&self.options, Self::FILE_FORMAT, source);

        let source_name = file_name(source);
        let mut lines = LineReader::new(reader);
        let mut gene_sets = Vec::new();

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            let tokens = split_fields(&content, "\t");
            if tokens.len() <= 1 {
                return Err(line_error(
                    Self::FILE_FORMAT,
                    line.number,
                    format!("Empty gene line: {}", content),
                ));
            }

            let mut tokens = tokens.into_iter();
            let name = tokens.next().unwrap_or_default().to_uppercase();
            let english = english_name(tokens.next().as_ref());
            let members: Vec<String> = tokens.filter(|m| !is_magic_null(m)).collect();

            let mut gene_set = GeneSet::new(name, english, members).with_source(source_name);
            gene_set.dedup_members();
            gene_sets.push(gene_set);
        }

        debug!(source = %source, gene_sets = gene_sets.len(), "Parsed GMT");

        let comment = lines.into_comment().to_string();
        Ok(GeneSetMatrix::new(source_name, gene_sets).with_comment(comment))
    }

    fn export<W: Write>(&self, matrix: &GeneSetMatrix, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, &matrix.name);

        for gene_set in &matrix.gene_sets {
            writeln!(
                writer,
                "{}\t{}\t{}",
                gene_set.name,
                gene_set.english_name.as_deref().unwrap_or(NA_NAME),
                gene_set.members.join("\t")
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
