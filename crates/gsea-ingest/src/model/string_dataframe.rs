//! Matrix of optional strings with named rows and columns

use gsea_common::{GseaError, Result};

/// Default label written in the header's first cell
pub const DEFAULT_ROW_LABEL: &str = "NAME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDataframe {
    name: String,
    row_label: Option<String>,
    row_names: Vec<String>,
    column_names: Vec<String>,
    cells: Vec<Option<String>>,
    comment: String,
}

impl StringDataframe {
    /// `cells` is row-major and must hold `rows * columns` entries
    pub fn new(
        name: impl Into<String>,
        row_names: Vec<String>,
        column_names: Vec<String>,
        cells: Vec<Option<String>>,
    ) -> Result<Self> {
        let name = name.into();
        if cells.len() != row_names.len() * column_names.len() {
            return Err(GseaError::invalid_object(format!(
                "String dataframe {}: {} cells for {} x {}",
                name,
                cells.len(),
                row_names.len(),
                column_names.len()
            )));
        }

        Ok(Self {
            name,
            row_label: None,
            row_names,
            column_names,
            cells,
            comment: String::new(),
        })
    }

    pub fn with_row_label(mut self, label: impl Into<String>) -> Self {
        self.row_label = Some(label.into());
        self
    }

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

    /// Header label for the row-name column, `NAME` unless set
    pub fn row_label(&self) -> &str {
        self.row_label.as_deref().unwrap_or(DEFAULT_ROW_LABEL)
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

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells[row * self.column_names.len() + col].as_deref()
    }
}
