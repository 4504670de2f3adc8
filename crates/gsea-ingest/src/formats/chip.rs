//! Probe annotation files (chips)
//!
//! Four source layouts share the `Probe Set ID` / `Gene Symbol` /
//! `Gene Title` header contract. Which one applies is decided from the file
//! name alone by [`classify_chip_source`]; parsing then dispatches on the
//! returned [`ChipSource`].
//!
//! Only the tab-delimited dot-chip layout is written back out.

use std::collections::{BTreeSet, HashSet};
use std::io::{BufRead, Write};

use gsea_common::{FileFormat, GseaError, Result};
use tracing::{debug, info};

use super::{
    column_index, file_error, file_name, line_error, log_export, log_import, required_column,
    tokenize_error, Format,
};
use crate::config::ParserOptions;
use crate::model::{symbolize, Chip, Probe};
use crate::text::tokenize::{is_magic_null, split_csv, split_fields, split_tab_fields};
use crate::text::{Line, LineReader};

pub const PROBE_SET_ID: &str = "Probe Set ID";
pub const GENE_SYMBOL: &str = "Gene Symbol";
pub const GENE_TITLE: &str = "Gene Title";
pub const ALIASES: &str = "Aliases";

/// Written for a probe without symbol or title
pub const NULL_VALUE: &str = "NULL";

const UNIGENE_MARKER: &str = "UNIGENE";
const GENE_SYMBOL_MARKER: &str = "GENE_SYMBOL";
const SEQ_ACCESSION_MARKER: &str = "SEQ_ACCESSION";
const SYMBOL_PROBES_MARKER: &str = "Gene_Symbol";
const CHIP_EXTENSION: &str = ".chip";
const CSV_EXTENSION: &str = ".csv";

/// Characters separating the entries of an `Aliases` cell (`A /// B`)
const ALIAS_DELIMS: &str = " /";

/// Layout of a chip file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipSource {
    /// Unigene or gene-symbol annotation with an optional alias column
    UnigeneOrSymbol,
    /// Accession probes layered over a reference symbol chip
    SeqAccession,
    /// Plain tab-delimited `.chip`
    DotChip,
    /// Quoted NetAffx CSV
    Csv,
}

/// Pick the chip layout for `path`.
///
/// Markers are checked in order against the upper-cased path: `UNIGENE` or
/// `GENE_SYMBOL`, then `SEQ_ACCESSION`, then the `.chip` and `.csv`
/// extensions.
pub fn classify_chip_source(path: &str) -> Result<ChipSource> {
    let upper = path.to_uppercase();

    if upper.contains(UNIGENE_MARKER) || upper.contains(GENE_SYMBOL_MARKER) {
        Ok(ChipSource::UnigeneOrSymbol)
    } else if upper.contains(SEQ_ACCESSION_MARKER) {
        Ok(ChipSource::SeqAccession)
    } else if path.ends_with(CHIP_EXTENSION) {
        Ok(ChipSource::DotChip)
    } else if path.ends_with(CSV_EXTENSION) {
        Ok(ChipSource::Csv)
    } else {
        Err(GseaError::UnknownChipSource(path.to_string()))
    }
}

/// Annotations a seq-accession chip is layered over
#[derive(Debug, Clone)]
pub struct ChipReference {
    /// Canonical gene-symbol chip; also supplies titles by symbol
    pub symbol_chip: Chip,
    /// Probes keyed by gene alias
    pub alias_probes: Vec<Probe>,
}

impl ChipReference {
    pub fn new(symbol_chip: Chip, alias_probes: Vec<Probe>) -> Self {
        Self {
            symbol_chip,
            alias_probes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChipFormat {
    options: ParserOptions,
    reference: Option<ChipReference>,
    omit_titles: bool,
}

impl ChipFormat {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Reference used by seq-accession sources
    pub fn with_reference(mut self, reference: ChipReference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Export only the probe and symbol columns
    pub fn without_titles(mut self) -> Self {
        self.omit_titles = true;
        self
    }
}

/// Column positions located in a chip header
struct ChipColumns {
    probe: usize,
    symbol: usize,
    title: Option<usize>,
    aliases: Option<usize>,
}

impl ChipColumns {
    fn locate(headers: &[String], line: usize, need_title: bool) -> Result<Self> {
        let fmt = FileFormat::Chip;
        let title = if need_title {
            Some(required_column(fmt, headers, GENE_TITLE, line)?)
        } else {
            None
        };

        Ok(Self {
            probe: required_column(fmt, headers, PROBE_SET_ID, line)?,
            symbol: required_column(fmt, headers, GENE_SYMBOL, line)?,
            title,
            aliases: column_index(headers, ALIASES),
        })
    }
}

/// `---` and the null words mean no title
fn normalize_title(raw: Option<&String>) -> Option<String> {
    raw.map(|t| t.trim())
        .filter(|t| !t.is_empty() && !is_magic_null(t))
        .map(str::to_string)
}

fn parse_aliases(raw: &str) -> BTreeSet<String> {
    split_fields(raw, ALIAS_DELIMS).into_iter().collect()
}

fn probe_field<'a>(fields: &'a [String], index: usize, line: usize) -> Result<&'a str> {
    fields.get(index).map(String::as_str).ok_or_else(|| {
        line_error(
            FileFormat::Chip,
            line,
            format!(
                "Bad CHIP format: no field at column {} (found {} fields)",
                index + 1,
                fields.len()
            ),
        )
    })
}

fn header_line<R: BufRead>(lines: &mut LineReader<R>) -> Result<(Line, String)> {
    let line = lines.next_line()?;
    match line.content.clone() {
        Some(content) => Ok((line, content)),
        None => Err(file_error(FileFormat::Chip, "Bad CHIP format: no header line")),
    }
}

impl ChipFormat {
    fn parse_unigene_or_symbol<R: BufRead>(&self, source: &str, reader: R) -> Result<Chip> {
        let fmt = Self::FILE_FORMAT;
        let symbol_probes = source.contains(SYMBOL_PROBES_MARKER);

        let mut lines = LineReader::new(reader);
        let (header, content) = header_line(&mut lines)?;
        let columns = ChipColumns::locate(&split_fields(&content, "\t"), header.number, true)?;

        let mut probes = Vec::new();
        let mut names = HashSet::new();
        let mut symbols = HashSet::new();

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            let fields = split_tab_fields(&content);
            if fields.len() != 3 && fields.len() != 4 {
                return Err(line_error(
                    fmt,
                    line.number,
                    format!(
                        "Bad UNIGENE or GENE_SYMBOL CHIP format: expecting 3 or 4 fields but found: {}",
                        fields.len()
                    ),
                ));
            }

            let raw_name = probe_field(&fields, columns.probe, line.number)?;
            let name = if symbol_probes {
                symbolize(raw_name)
            } else {
                Some(raw_name.trim().to_string()).filter(|n| !n.is_empty())
            };
            let Some(name) = name else {
                continue;
            };
            if !names.insert(name.clone()) {
                continue;
            }

            let symbol = symbolize(probe_field(&fields, columns.symbol, line.number)?);
            let title = normalize_title(columns.title.and_then(|i| fields.get(i)));
            let aliases = columns
                .aliases
                .and_then(|i| fields.get(i))
                .map(|raw| parse_aliases(raw))
                .unwrap_or_default();

            if let Some(symbol) = &symbol {
                symbols.insert(symbol.clone());
            }
            probes.push(Probe::new(name, symbol, title).with_aliases(aliases));
        }

        for probe in &mut probes {
            probe.aliases.retain(|alias| !symbols.contains(alias));
        }

        info!(source = %source, probes = probes.len(), "Parsed from unigene / gene symbol");
        let comment = lines.into_comment().to_string();
        Ok(Chip::new(file_name(source), source, probes)?.with_comment(comment))
    }

    fn parse_dot_chip<R: BufRead>(&self, source: &str, reader: R) -> Result<Chip> {
        let mut lines = LineReader::new(reader);
        let (header, content) = header_line(&mut lines)?;
        let columns = ChipColumns::locate(&split_fields(&content, "\t"), header.number, true)?;

        let mut probes = Vec::new();
        let mut names = HashSet::new();

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            let fields = split_tab_fields(&content);
            let name = probe_field(&fields, columns.probe, line.number)?.trim();
            if name.is_empty() || !names.insert(name.to_string()) {
                continue;
            }

            // Short rows leave symbol and title absent
            let symbol = fields.get(columns.symbol).and_then(|s| symbolize(s));
            let title = normalize_title(columns.title.and_then(|i| fields.get(i)));
            probes.push(Probe::new(name, symbol, title));
        }

        info!(source = %source, probes = probes.len(), "Parsed from dotchip");
        let comment = lines.into_comment().to_string();
        Ok(Chip::new(file_name(source), source, probes)?.with_comment(comment))
    }

    fn parse_seq_accession<R: BufRead>(&self, source: &str, reader: R) -> Result<Chip> {
        let reference = self
            .reference
            .as_ref()
            .ok_or_else(|| GseaError::MissingChipReference(source.to_string()))?;

        let mut lines = LineReader::new(reader);
        let (header, content) = header_line(&mut lines)?;
        let columns = ChipColumns::locate(&split_fields(&content, "\t"), header.number, false)?;

        let mut probes: Vec<Probe> = reference.symbol_chip.probes().to_vec();
        let mut names: HashSet<String> = probes.iter().map(|p| p.name.clone()).collect();
        debug!(probes = probes.len(), "Seq accession probes from symbol chip");

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            let fields = split_tab_fields(&content);
            let name = probe_field(&fields, columns.probe, line.number)?.trim();
            if name.is_empty() || !names.insert(name.to_string()) {
                continue;
            }

            let symbol = fields.get(columns.symbol).and_then(|s| symbolize(s));
            let title = symbol
                .as_deref()
                .and_then(|s| reference.symbol_chip.title_for_symbol(s))
                .map(str::to_string);
            probes.push(Probe::new(name, symbol, title));
        }
        debug!(probes = probes.len(), "Seq accession probes after file");

        for alias_probe in &reference.alias_probes {
            if names.insert(alias_probe.name.clone()) {
                probes.push(alias_probe.clone());
            }
        }

        info!(source = %source, probes = probes.len(), "Parsed from seq accession");
        let comment = lines.into_comment().to_string();
        Ok(Chip::new(file_name(source), source, probes)?.with_comment(comment))
    }

    fn parse_csv<R: BufRead>(&self, source: &str, reader: R) -> Result<Chip> {
        let fmt = Self::FILE_FORMAT;

        let mut lines = LineReader::new(reader);
        let (header, content) = header_line(&mut lines)?;
        let headers = split_csv(&content).map_err(|e| tokenize_error(fmt, header.number, e))?;
        let columns = ChipColumns::locate(&headers, header.number, true)?;

        let mut probes = Vec::new();
        let mut names = HashSet::new();

        loop {
            let line = lines.next_line()?;
            let Some(content) = line.content else {
                break;
            };

            let fields = split_csv(&content).map_err(|e| tokenize_error(fmt, line.number, e))?;
            let name = probe_field(&fields, columns.probe, line.number)?.trim();
            if !names.insert(name.to_string()) {
                continue;
            }

            let symbol = symbolize(probe_field(&fields, columns.symbol, line.number)?);
            let title = normalize_title(columns.title.and_then(|i| fields.get(i)));
            probes.push(Probe::new(name, symbol, title));
        }

        info!(source = %source, probes = probes.len(), "Parsed from csv");
        let comment = lines.into_comment().to_string();
        Ok(Chip::new(file_name(source), source, probes)?.with_comment(comment))
    }
}

impl Format for ChipFormat {
    type Object = Chip;
    const FILE_FORMAT: FileFormat = FileFormat::Chip;

    fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse<R: BufRead>(&self, source: &str, reader: R) -> Result<Chip> {
        let kind = classify_chip_source(source)?;
        log_import(&self.options, Self::FILE_FORMAT, source);
        debug!(source = %source, kind = ?kind, "Classified chip source");

        match kind {
            ChipSource::UnigeneOrSymbol => self.parse_unigene_or_symbol(source, reader),
            ChipSource::SeqAccession => self.parse_seq_accession(source, reader),
            ChipSource::DotChip => self.parse_dot_chip(source, reader),
            ChipSource::Csv => self.parse_csv(source, reader),
        }
    }

    fn export<W: Write>(&self, chip: &Chip, mut writer: W) -> Result<()> {
        log_export(Self::FILE_FORMAT, chip.name());

        if self.omit_titles {
            writeln!(writer, "{}\t{}", PROBE_SET_ID, GENE_SYMBOL)?;
        } else {
            writeln!(writer, "{}\t{}\t{}", PROBE_SET_ID, GENE_SYMBOL, GENE_TITLE)?;
        }

        for probe in chip.probes() {
            write!(
                writer,
                "{}\t{}",
                probe.name,
                probe.symbol.as_deref().unwrap_or(NULL_VALUE)
            )?;
            if !self.omit_titles {
                write!(writer, "\t{}", probe.title.as_deref().unwrap_or(NULL_VALUE))?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}
