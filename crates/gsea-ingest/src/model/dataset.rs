//! Numeric dataset: a matrix with named rows and columns

use std::collections::HashMap;

use gsea_common::{GseaError, Result};

use super::matrix::Matrix;

/// Expression-style dataset
///
/// Row names are unique. Row descriptions, when present, line up with rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    matrix: Matrix,
    row_names: Vec<String>,
    column_names: Vec<String>,
    row_descriptions: Option<Vec<String>>,
    comment: String,
    row_index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        matrix: Matrix,
        row_names: Vec<String>,
        column_names: Vec<String>,
        row_descriptions: Option<Vec<String>>,
    ) -> Result<Self> {
        let name = name.into();

        if matrix.num_rows() != row_names.len() {
            return Err(GseaError::invalid_object(format!(
                "Dataset {}: {} row names for {} matrix rows",
                name,
                row_names.len(),
                matrix.num_rows()
            )));
        }
        if matrix.num_cols() != column_names.len() {
            return Err(GseaError::invalid_object(format!(
                "Dataset {}: {} column names for {} matrix columns",
                name,
                column_names.len(),
                matrix.num_cols()
            )));
        }
        if let Some(ref descs) = row_descriptions {
            if descs.len() != row_names.len() {
                return Err(GseaError::invalid_object(format!(
                    "Dataset {}: {} row descriptions for {} rows",
                    name,
                    descs.len(),
                    row_names.len()
                )));
            }
        }

        let mut row_index = HashMap::with_capacity(row_names.len());
        for (i, row_name) in row_names.iter().enumerate() {
            if row_index.insert(row_name.clone(), i).is_some() {
                return Err(GseaError::invalid_object(format!(
                    "Dataset {}: duplicate row name {}",
                    name, row_name
                )));
            }
        }

        Ok(Self {
            name,
            matrix,
            row_names,
            column_names,
            row_descriptions,
            comment: String::new(),
            row_index,
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

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn num_rows(&self) -> usize {
        self.row_names.len()
    }

    pub fn num_cols(&self) -> usize {
        self.column_names.len()
    }

    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    pub fn row_name(&self, row: usize) -> &str {
        &self.row_names[row]
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn row(&self, row: usize) -> &[f32] {
        self.matrix.row(row)
    }

    pub fn value(&self, row: usize, col: usize) -> f32 {
        self.matrix.get(row, col)
    }

    /// Index of the row with exactly this name
    pub fn row_index(&self, row_name: &str) -> Option<usize> {
        self.row_index.get(row_name).copied()
    }

    pub fn row_descriptions(&self) -> Option<&[String]> {
        self.row_descriptions.as_deref()
    }

    pub fn row_description(&self, row: usize) -> Option<&str> {
        self.row_descriptions
            .as_ref()
            .and_then(|descs| descs.get(row))
            .map(String::as_str)
    }
}
