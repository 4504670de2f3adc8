//! Common types used across the GSEA IO crates

use serde::{Deserialize, Serialize};

/// Identity of a supported file format.
///
/// Every format owns a stable numeric error code so that downstream tooling
/// can link a failure to format-specific documentation. The table covers the
/// whole family of GSEA formats, including ones this workspace does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Probe annotation files (`.chip`, NetAffx `.csv`, symbol/accession tables)
    Chip,
    /// Phenotype class files
    Cls,
    /// Whitespace-delimited numeric dataframe
    Dataframe,
    /// Enrichment database
    Edb,
    /// Legacy fixed-header expression matrix
    Gct,
    /// Row-oriented gene-set matrix
    Gmt,
    /// Column-oriented gene-set matrix
    Gmx,
    /// Anything without a dedicated code
    Misc,
    Pcl,
    Res,
    /// Ranked list
    Rnk,
    /// Run report
    Rpt,
    /// String-valued dataframe
    Sdf,
    /// Tab-delimited dataset with optional description column
    Txt,
}

impl FileFormat {
    /// Stable error code for this format
    pub fn error_code(self) -> u32 {
        match self {
            FileFormat::Chip => 5001,
            FileFormat::Cls => 5002,
            FileFormat::Dataframe => 5003,
            FileFormat::Edb => 5004,
            FileFormat::Gct => 5005,
            FileFormat::Gmt => 5006,
            FileFormat::Gmx => 5007,
            FileFormat::Misc => 5008,
            FileFormat::Pcl => 5009,
            FileFormat::Res => 5010,
            FileFormat::Rnk => 5011,
            FileFormat::Rpt => 5012,
            FileFormat::Sdf => 5013,
            FileFormat::Txt => 5014,
        }
    }

    /// Short upper-case label used in diagnostics ("GCT", "RNK", ...)
    pub fn label(self) -> &'static str {
        match self {
            FileFormat::Chip => "CHIP",
            FileFormat::Cls => "CLS",
            FileFormat::Dataframe => "DataFrame",
            FileFormat::Edb => "EDB",
            FileFormat::Gct => "GCT",
            FileFormat::Gmt => "GMT",
            FileFormat::Gmx => "GMX",
            FileFormat::Misc => "MISC",
            FileFormat::Pcl => "PCL",
            FileFormat::Res => "RES",
            FileFormat::Rnk => "RNK",
            FileFormat::Rpt => "RPT",
            FileFormat::Sdf => "SDF",
            FileFormat::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
