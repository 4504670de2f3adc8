//! Ranked list of unique identifiers ordered by descending score

use std::cmp::Ordering;
use std::collections::HashMap;

use gsea_common::{GseaError, Result};
use serde::Serialize;

/// Ordered `(id, score)` entries, highest score first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedList {
    name: String,
    comment: String,
    entries: Vec<(String, f32)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl RankedList {
    /// Sort `entries` by descending score and wrap them.
    ///
    /// The sort is stable; NaN scores go last. Ids must be unique.
    pub fn new(name: impl Into<String>, mut entries: Vec<(String, f32)>) -> Result<Self> {
        let name = name.into();
        entries.sort_by(|a, b| descending(a.1, b.1));

        let mut index = HashMap::with_capacity(entries.len());
        for (i, (id, _)) in entries.iter().enumerate() {
            if index.insert(id.clone(), i).is_some() {
                return Err(GseaError::invalid_object(format!(
                    "Ranked list {}: duplicate id {}",
                    name, id
                )));
            }
        }

        Ok(Self {
            name,
            comment: String::new(),
            entries,
            index,
        })
    }

    /// Attach harvested comment text
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(String, f32)] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Score of `id`, if present
    pub fn score(&self, id: &str) -> Option<f32> {
        self.index.get(id).map(|&i| self.entries[i].1)
    }

    /// 0-based rank of `id`
    pub fn rank(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
