//! Probe annotations and the symbol lookup used by collapsing

use std::collections::{BTreeSet, HashMap};

use gsea_common::{GseaError, Result};
use serde::{Deserialize, Serialize};

use crate::text::tokenize::{is_magic_null, AFFX_NULL};

/// What a lookup returns for a probe without a symbol (or title)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullSymbolMode {
    /// Return nothing; the caller drops the probe
    OmitNulls,
    /// Return the probe id itself
    ReplaceWithProbeId,
}

impl NullSymbolMode {
    /// `include_only_symbols = true` omits unresolved probes
    pub fn from_include_only_symbols(include_only_symbols: bool) -> Self {
        if include_only_symbols {
            NullSymbolMode::OmitNulls
        } else {
            NullSymbolMode::ReplaceWithProbeId
        }
    }

    fn resolve(self, probe_id: &str, value: Option<&str>) -> Option<String> {
        match (value, self) {
            (Some(v), _) => Some(v.to_string()),
            (None, NullSymbolMode::OmitNulls) => None,
            (None, NullSymbolMode::ReplaceWithProbeId) => Some(probe_id.to_string()),
        }
    }
}

/// Symbol/title resolution for probe ids
pub trait ProbeAnnotation {
    /// Gene symbol of `probe_id` under `mode`
    fn symbol(&self, probe_id: &str, mode: NullSymbolMode) -> Option<String>;

    /// Gene title of `probe_id` under `mode`
    fn title(&self, probe_id: &str, mode: NullSymbolMode) -> Option<String>;

    /// Every probe id known to the annotation
    fn probe_names(&self) -> Vec<&str>;

    /// Name used in diagnostics
    fn annotation_name(&self) -> &str;
}

/// Normalise a gene symbol.
///
/// Trims, maps blanks, the magic null words and `---` to `None`, and
/// upper-cases anything else.
pub fn symbolize(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || s == AFFX_NULL || is_magic_null(s) {
        None
    } else {
        Some(s.to_uppercase())
    }
}

/// One probe of a chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub name: String,
    pub symbol: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl Probe {
    pub fn new(name: impl Into<String>, symbol: Option<String>, title: Option<String>) -> Self {
        Self {
            name: name.into(),
            symbol,
            title,
            aliases: BTreeSet::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: BTreeSet<String>) -> Self {
        self.aliases = aliases;
        self
    }
}

/// In-memory probe annotation table
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    name: String,
    source_path: String,
    comment: String,
    probes: Vec<Probe>,
    index: HashMap<String, usize>,
}

impl Chip {
    /// Probe names must be unique
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<String>,
        probes: Vec<Probe>,
    ) -> Result<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(probes.len());
        for (i, probe) in probes.iter().enumerate() {
            if index.insert(probe.name.clone(), i).is_some() {
                return Err(GseaError::invalid_object(format!(
                    "Chip {}: duplicate probe {}",
                    name, probe.name
                )));
            }
        }

        Ok(Self {
            name,
            source_path: source_path.into(),
            comment: String::new(),
            probes,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn num_probes(&self) -> usize {
        self.probes.len()
    }

    pub fn probe(&self, name: &str) -> Option<&Probe> {
        self.index.get(name).map(|&i| &self.probes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Title of the first probe carrying `symbol`
    pub fn title_for_symbol(&self, symbol: &str) -> Option<&str> {
        self.probes
            .iter()
            .find(|p| p.symbol.as_deref() == Some(symbol))
            .and_then(|p| p.title.as_deref())
    }
}

impl ProbeAnnotation for Chip {
    fn symbol(&self, probe_id: &str, mode: NullSymbolMode) -> Option<String> {
        let symbol = self.probe(probe_id).and_then(|p| p.symbol.as_deref());
        mode.resolve(probe_id, symbol)
    }

    fn title(&self, probe_id: &str, mode: NullSymbolMode) -> Option<String> {
        let title = self.probe(probe_id).and_then(|p| p.title.as_deref());
        mode.resolve(probe_id, title)
    }

    fn probe_names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name.as_str()).collect()
    }

    fn annotation_name(&self) -> &str {
        &self.name
    }
}
