//! Gene sets and gene-set collections

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Separator between the source path and the set name in qualified names
pub const QUALIFIER: char = '#';

/// A named set of member identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneSet {
    /// Upper-cased set name
    pub name: String,
    /// Free-text name from the second field (GMT) or second line (GMX)
    pub english_name: Option<String>,
    /// File the set was read from, if any
    pub source: Option<String>,
    pub members: Vec<String>,
}

impl GeneSet {
    pub fn new(
        name: impl Into<String>,
        english_name: Option<String>,
        members: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            english_name,
            source: None,
            members,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// `<source>#<NAME>`, or the bare name when there is no source
    pub fn qualified_name(&self) -> String {
        match self.source {
            Some(ref source) => format!("{}{}{}", source, QUALIFIER, self.name),
            None => self.name.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// Drop repeated members, keeping the first occurrence.
    ///
    /// Returns how many members were removed.
    pub fn dedup_members(&mut self) -> usize {
        let before = self.members.len();
        let mut seen = HashSet::with_capacity(before);
        self.members.retain(|m| seen.insert(m.clone()));

        let removed = before - self.members.len();
        if removed > 0 {
            warn!(
                gene_set = %self.name,
                removed,
                "Duplicate members removed from gene set"
            );
        }
        removed
    }
}

/// Ordered collection of gene sets read from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneSetMatrix {
    pub name: String,
    pub gene_sets: Vec<GeneSet>,
    #[serde(default)]
    pub comment: String,
}

impl GeneSetMatrix {
    pub fn new(name: impl Into<String>, gene_sets: Vec<GeneSet>) -> Self {
        Self {
            name: name.into(),
            gene_sets,
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn len(&self) -> usize {
        self.gene_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gene_sets.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&GeneSet> {
        self.gene_sets.iter().find(|gs| gs.name == name)
    }

    /// Size of the largest set
    pub fn max_members(&self) -> usize {
        self.gene_sets.iter().map(GeneSet::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let gs = GeneSet::new("HALLMARK_X", None, vec![]).with_source("sets.gmt");
        assert_eq!(gs.qualified_name(), "sets.gmt#HALLMARK_X");
        assert_eq!(GeneSet::new("A", None, vec![]).qualified_name(), "A");
    }

    #[test]
    fn test_dedup_members() {
        let mut gs = GeneSet::new(
            "S",
            None,
            vec!["A".to_string(), "B".to_string(), "A".to_string()],
        );
        assert_eq!(gs.dedup_members(), 1);
        assert_eq!(gs.members, vec!["A", "B"]);
    }
}
