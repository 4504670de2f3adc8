//! Probe-to-gene collapsing
//!
//! Rows of a dataset (or entries of a ranked list) are grouped by the gene
//! symbol a [`ProbeAnnotation`] resolves for them, and every group of more
//! than one probe is reduced to a single row with a [`CollapseMode`].
//!
//! Groups, and therefore output rows, appear in the order their symbol was
//! first seen in the input.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use gsea_common::{GseaError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::formats::NA_DESCRIPTION;
use crate::model::{Dataset, Matrix, NullSymbolMode, ProbeAnnotation, RankedList};

/// How a group of probes sharing one symbol becomes a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapseMode {
    /// Largest value, ignoring NaN
    Max,
    /// Median, ignoring NaN
    Median,
    Mean,
    Sum,
    /// Rename only; more than one probe per symbol is an error
    RemapOnly,
}

impl CollapseMode {
    pub const ALL: [CollapseMode; 5] = [
        CollapseMode::Max,
        CollapseMode::Median,
        CollapseMode::Mean,
        CollapseMode::Sum,
        CollapseMode::RemapOnly,
    ];

    /// Mode for a legacy integer index (0 = max ... 4 = remap only)
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            GseaError::config(format!("Collapse mode index {} is not in 0..=4", index))
        })
    }

    pub fn index(self) -> usize {
        match self {
            CollapseMode::Max => 0,
            CollapseMode::Median => 1,
            CollapseMode::Mean => 2,
            CollapseMode::Sum => 3,
            CollapseMode::RemapOnly => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollapseMode::Max => "max",
            CollapseMode::Median => "median",
            CollapseMode::Mean => "mean",
            CollapseMode::Sum => "sum",
            CollapseMode::RemapOnly => "remap_only",
        }
    }

    /// Whether the mode combines values rather than only renaming
    pub fn reduces(self) -> bool {
        self != CollapseMode::RemapOnly
    }

    fn dataset_suffix(self) -> &'static str {
        if self.reduces() {
            "_collapsed_to_symbols"
        } else {
            "_remapped_to_symbols"
        }
    }

    fn ranked_list_suffix(self) -> &'static str {
        if self.reduces() {
            "_collapsed"
        } else {
            "_remapped"
        }
    }

    /// Reduce one group of values. `symbol` names the group in errors.
    fn reduce(self, symbol: &str, values: &[f32]) -> Result<f32> {
        if let [single] = values {
            return Ok(*single);
        }

        match self {
            CollapseMode::Max => Ok(max_ignoring_nan(values)),
            CollapseMode::Median => Ok(median_ignoring_nan(values)),
            CollapseMode::Mean => Ok(values.iter().sum::<f32>() / values.len() as f32),
            CollapseMode::Sum => Ok(values.iter().sum()),
            CollapseMode::RemapOnly => Err(GseaError::AmbiguousRemap {
                symbol: symbol.to_string(),
            }),
        }
    }
}

impl fmt::Display for CollapseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollapseMode {
    type Err = GseaError;

    /// Accepts the short names, the long UI labels (`Max_probe`,
    /// `Median_of_probes`, ...) and the legacy indices.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "max" | "max_probe" => Ok(CollapseMode::Max),
            "median" | "median_of_probes" => Ok(CollapseMode::Median),
            "mean" | "mean_of_probes" => Ok(CollapseMode::Mean),
            "sum" | "sum_of_probes" => Ok(CollapseMode::Sum),
            "remap_only" | "remap" => Ok(CollapseMode::RemapOnly),
            other => match other.parse::<usize>() {
                Ok(index) => Self::from_index(index),
                Err(_) => Err(GseaError::config(format!("Unknown collapse mode: {}", s))),
            },
        }
    }
}

fn max_ignoring_nan(values: &[f32]) -> f32 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f32::max)
        .unwrap_or(f32::NAN)
}

fn median_ignoring_nan(values: &[f32]) -> f32 {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return f32::NAN;
    }
    sorted.sort_by(f32::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Probes that resolved to one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolGroup {
    pub symbol: String,
    /// Title of the first probe seen for the symbol
    pub title: Option<String>,
    /// Probe ids in input order
    pub probes: Vec<String>,
}

/// Group `ids` by resolved symbol, in first-seen order
fn group_by_symbol<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    annotation: &impl ProbeAnnotation,
    mode: NullSymbolMode,
) -> Vec<SymbolGroup> {
    let mut groups: Vec<SymbolGroup> = Vec::new();
    let mut by_symbol: HashMap<String, usize> = HashMap::new();

    for id in ids {
        let Some(symbol) = annotation.symbol(id, mode).filter(|s| !s.is_empty()) else {
            continue;
        };

        match by_symbol.get(&symbol) {
            Some(&i) => groups[i].probes.push(id.to_string()),
            None => {
                by_symbol.insert(symbol.clone(), groups.len());
                groups.push(SymbolGroup {
                    title: annotation.title(id, mode),
                    symbol,
                    probes: vec![id.to_string()],
                });
            },
        }
    }

    groups
}

/// Dataset collapsed to one row per symbol, with the grouping that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedDataset {
    pub dataset: Dataset,
    pub groups: Vec<SymbolGroup>,
}

impl CollapsedDataset {
    /// Probes behind one output row
    pub fn probes_for(&self, symbol: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.symbol == symbol)
            .map(|g| g.probes.as_slice())
    }
}

/// Collapse dataset rows to gene symbols.
///
/// With `include_only_symbols`, rows whose probe has no symbol are dropped;
/// otherwise they are kept under their probe id. Column names and order are
/// unchanged, and group titles become the row descriptions.
pub fn collapse_dataset(
    dataset: &Dataset,
    annotation: &impl ProbeAnnotation,
    include_only_symbols: bool,
    mode: CollapseMode,
) -> Result<CollapsedDataset> {
    let null_mode = NullSymbolMode::from_include_only_symbols(include_only_symbols);
    let groups = group_by_symbol(
        dataset.row_names().iter().map(String::as_str),
        annotation,
        null_mode,
    );

    let name = format!("{}{}", dataset.name(), mode.dataset_suffix());
    info!(
        name = %name,
        mode = %mode,
        chip = %annotation.annotation_name(),
        rows = dataset.num_rows(),
        symbols = groups.len(),
        "Creating collapsed dataset"
    );

    let num_cols = dataset.num_cols();
    let mut matrix = Matrix::new(groups.len(), num_cols);
    let mut column_values = Vec::new();

    for (r, group) in groups.iter().enumerate() {
        let rows: Vec<&[f32]> = group
            .probes
            .iter()
            .filter_map(|p| dataset.row_index(p))
            .map(|i| dataset.row(i))
            .collect();

        for c in 0..num_cols {
            column_values.clear();
            column_values.extend(rows.iter().map(|row| row[c]));
            matrix.set(r, c, mode.reduce(&group.symbol, &column_values)?);
        }
    }

    let row_names = groups.iter().map(|g| g.symbol.clone()).collect();
    let descriptions = groups
        .iter()
        .map(|g| g.title.clone().unwrap_or_else(|| NA_DESCRIPTION.to_string()))
        .collect();

    let dataset = Dataset::new(
        name,
        matrix,
        row_names,
        dataset.column_names().to_vec(),
        Some(descriptions),
    )?;

    Ok(CollapsedDataset { dataset, groups })
}

/// Collapse ranked-list entries to gene symbols.
///
/// The result is re-sorted by descending score. A collapse that leaves no
/// entries is an error.
pub fn collapse_ranked_list(
    list: &RankedList,
    annotation: &impl ProbeAnnotation,
    include_only_symbols: bool,
    mode: CollapseMode,
) -> Result<RankedList> {
    let null_mode = NullSymbolMode::from_include_only_symbols(include_only_symbols);
    let groups = group_by_symbol(list.ids(), annotation, null_mode);

    let mut entries = Vec::with_capacity(groups.len());
    for group in groups {
        let scores: Vec<f32> = group.probes.iter().filter_map(|p| list.score(p)).collect();
        let score = mode.reduce(&group.symbol, &scores)?;
        entries.push((group.symbol, score));
    }

    if entries.is_empty() {
        return Err(GseaError::EmptyCollapse {
            source_name: list.name().to_string(),
            chip: annotation.annotation_name().to_string(),
        });
    }

    let name = format!("{}{}", list.name(), mode.ranked_list_suffix());
    debug!(name = %name, mode = %mode, entries = entries.len(), "Collapsed ranked list");
    RankedList::new(name, entries)
}
