//! Row subsetting by name

use gsea_common::Result;
use tracing::{debug, warn};

use crate::model::{Dataset, GeneSet, Matrix};

/// Rows pulled out of a dataset and the count of names that matched nothing
#[derive(Debug, Clone, PartialEq)]
pub struct RowExtraction {
    pub dataset: Dataset,
    pub missing: usize,
}

/// Copy the named rows into a new dataset, in the order requested.
///
/// Names without an exact match are skipped and counted. The result is
/// named `<dataset>_nrows<k>`, `k` being the number of names asked for, and
/// keeps row descriptions when the source has them.
pub fn extract_rows<S: AsRef<str>>(dataset: &Dataset, row_names: &[S]) -> Result<RowExtraction> {
    let name = format!("{}_nrows{}", dataset.name(), row_names.len());
    extract_named(name, dataset, row_names.iter().map(AsRef::as_ref))
}

/// Rows for the members of `gene_set`, named `<dataset>_<GENE_SET>`
pub fn extract_gene_set(dataset: &Dataset, gene_set: &GeneSet) -> Result<RowExtraction> {
    let name = format!("{}_{}", dataset.name(), gene_set.name);
    extract_named(name, dataset, gene_set.members.iter().map(String::as_str))
}

fn extract_named<'a>(
    name: String,
    dataset: &Dataset,
    requested: impl Iterator<Item = &'a str>,
) -> Result<RowExtraction> {
    let mut requested_count = 0;
    let hits: Vec<usize> = requested
        .inspect(|_| requested_count += 1)
        .filter_map(|row_name| dataset.row_index(row_name))
        .collect();
    let missing = requested_count - hits.len();

    if missing > 0 {
        warn!(
            dataset = %dataset.name(),
            requested = requested_count,
            missing,
            hits = hits.len(),
            "Not all rows had matches"
        );
    }

    let rows = hits.iter().map(|&i| dataset.row(i).to_vec()).collect();
    let matrix = Matrix::from_rows(rows, dataset.num_cols())?;
    let row_names = hits.iter().map(|&i| dataset.row_name(i).to_string()).collect();
    let descriptions = dataset
        .row_descriptions()
        .map(|descs| hits.iter().map(|&i| descs[i].clone()).collect());

    debug!(name = %name, rows = hits.len(), "Extracted rows");

    let dataset = Dataset::new(
        name,
        matrix,
        row_names,
        dataset.column_names().to_vec(),
        descriptions,
    )?;

    Ok(RowExtraction { dataset, missing })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            "ds",
            Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 2).unwrap(),
            vec!["n1".to_string(), "n2".to_string()],
            vec!["a".to_string(), "b".to_string()],
            Some(vec!["first".to_string(), "second".to_string()]),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_in_requested_order() {
        let extraction = extract_rows(&dataset(), &["n2", "n3", "n1"]).unwrap();
        let out = &extraction.dataset;

        assert_eq!(extraction.missing, 1);
        assert_eq!(out.name(), "ds_nrows3");
        assert_eq!(out.row_names(), &["n2".to_string(), "n1".to_string()]);
        assert_eq!(out.row(0), &[3.0, 4.0]);
        assert_eq!(out.row_description(1), Some("first"));
        assert_eq!(out.column_names(), dataset().column_names());
    }

    #[test]
    fn test_empty_request_gives_empty_dataset() {
        let names: [&str; 0] = [];
        let extraction = extract_rows(&dataset(), &names).unwrap();
        assert_eq!(extraction.dataset.num_rows(), 0);
        assert_eq!(extraction.dataset.num_cols(), 2);
        assert_eq!(extraction.missing, 0);
    }

    #[test]
    fn test_extract_gene_set() {
        let gene_set = GeneSet::new("SET", None, vec!["n1".to_string(), "x".to_string()]);
        let extraction = extract_gene_set(&dataset(), &gene_set).unwrap();
        assert_eq!(extraction.dataset.name(), "ds_SET");
        assert_eq!(extraction.dataset.num_rows(), 1);
        assert_eq!(extraction.missing, 1);
    }
}
