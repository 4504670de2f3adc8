//! GSEA Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Parsers and exporters for the GSEA input formats, plus the transforms
//! applied to parsed data before enrichment scoring.
//!
//! # Supported Formats
//!
//! - **GCT / TXT / dataframe**: numeric datasets
//! - **SDF**: string-valued dataframes
//! - **GMT / GMX**: gene-set collections, row or column oriented
//! - **RNK**: pre-ranked gene lists
//! - **CHIP**: probe annotations (dot-chip, unigene / gene symbol,
//!   seq accession, NetAffx CSV)
//! - **RPT**: run reports
//!
//! # Example
//!
//! ```no_run
//! use gsea_ingest::collapse::{collapse_dataset, CollapseMode};
//! use gsea_ingest::formats::{ChipFormat, Format, GctFormat};
//! use std::path::Path;
//!
//! # fn main() -> gsea_common::Result<()> {
//! let dataset = GctFormat::default().parse_file(Path::new("P53_hgu95av2.gct"))?;
//! let chip = ChipFormat::default().parse_file(Path::new("HG_U95Av2.chip"))?;
//!
//! let collapsed = collapse_dataset(&dataset, &chip, true, CollapseMode::Max)?;
//! println!("{} genes", collapsed.dataset.num_rows());
//! # Ok(())
//! # }
//! ```

pub mod collapse;
pub mod config;
pub mod extract;
pub mod formats;
pub mod model;
pub mod text;

pub use collapse::{collapse_dataset, collapse_ranked_list, CollapseMode, CollapsedDataset};
pub use config::ParserOptions;
pub use extract::{extract_gene_set, extract_rows, RowExtraction};
pub use formats::Format;
