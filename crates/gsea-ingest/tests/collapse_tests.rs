//! Collapsing and extraction over parsed inputs.

use gsea_ingest::formats::{ChipFormat, Format, GctFormat, GmtFormat, RnkFormat};
use gsea_ingest::model::{Chip, Dataset};
use gsea_ingest::{
    collapse_dataset, collapse_ranked_list, extract_gene_set, extract_rows, CollapseMode,
};

const CHIP: &str = "Probe Set ID\tGene Symbol\tGene Title\n\
                    P1\tX\tgene x\n\
                    P2\tX\tgene x again\n\
                    P3\tY\tgene y\n\
                    P4\t---\t---\n";

const GCT: &str = "#1.2\n4\t2\nNAME\tDescription\tA\tB\n\
                   P1\tna\t0.5\t3.0\n\
                   P2\tna\t0.9\t1.0\n\
                   P3\tna\t0.1\t0.2\n\
                   UNMAPPED\tna\t7.0\t8.0\n";

fn chip() -> Chip {
    ChipFormat::default().parse_str("HG_TEST.chip", CHIP).unwrap()
}

fn dataset() -> Dataset {
    GctFormat::default().parse_str("expr.gct", GCT).unwrap()
}

// ============================================================================
// Dataset Collapse
// ============================================================================

#[test]
fn test_max_keeps_largest_probe_per_column() {
    let collapsed = collapse_dataset(&dataset(), &chip(), true, CollapseMode::Max).unwrap();
    let out = &collapsed.dataset;

    assert_eq!(out.name(), "expr_collapsed_to_symbols");
    assert_eq!(out.row_names(), &["X".to_string(), "Y".to_string()]);
    assert_eq!(out.row(0), &[0.9, 3.0]);
    assert_eq!(out.row(1), &[0.1, 0.2]);
    assert_eq!(out.row_description(0), Some("gene x"));
    assert_eq!(out.column_names(), &["A".to_string(), "B".to_string()]);
}

#[test]
fn test_remap_only_names_colliding_symbol() {
    let err = collapse_dataset(&dataset(), &chip(), true, CollapseMode::RemapOnly).unwrap_err();
    assert_eq!(err.code(), Some(1020));
    assert!(err.to_string().contains("'X'"));
}

#[test]
fn test_unresolved_probe_follows_include_only_symbols() {
    let kept = collapse_dataset(&dataset(), &chip(), false, CollapseMode::Mean).unwrap();
    assert_eq!(kept.dataset.row_index("UNMAPPED"), Some(2));
    assert_eq!(kept.dataset.row(2), &[7.0, 8.0]);

    let omitted = collapse_dataset(&dataset(), &chip(), true, CollapseMode::Mean).unwrap();
    assert_eq!(omitted.dataset.row_index("UNMAPPED"), None);
    assert_eq!(omitted.dataset.num_rows(), 2);
}

#[test]
fn test_probe_without_symbol_is_kept_under_its_id() {
    let gct = "#1.2\n1\t1\nNAME\tDescription\tA\nP4\tna\t1.0\n";
    let ds = GctFormat::default().parse_str("p4.gct", gct).unwrap();

    let kept = collapse_dataset(&ds, &chip(), false, CollapseMode::Max).unwrap();
    assert_eq!(kept.dataset.row_names(), &["P4".to_string()]);

    let omitted = collapse_dataset(&ds, &chip(), true, CollapseMode::Max).unwrap();
    assert_eq!(omitted.dataset.num_rows(), 0);
}

// ============================================================================
// Ranked List Collapse
// ============================================================================

#[test]
fn test_ranked_list_collapse_resorts() {
    let list = RnkFormat::default()
        .parse_str("pre.rnk", "P1\t0.5\nP2\t1.5\nP3\t2.0\n")
        .unwrap();

    let collapsed = collapse_ranked_list(&list, &chip(), true, CollapseMode::Median).unwrap();
    assert_eq!(collapsed.name(), "pre_collapsed");
    assert_eq!(
        collapsed.entries(),
        &[("Y".to_string(), 2.0), ("X".to_string(), 1.0)]
    );
}

#[test]
fn test_ranked_list_remap_and_empty_result() {
    let list = RnkFormat::default().parse_str("pre.rnk", "P3\t1\nP1\t2\n").unwrap();
    let remapped = collapse_ranked_list(&list, &chip(), true, CollapseMode::RemapOnly).unwrap();
    assert_eq!(remapped.name(), "pre_remapped");
    assert_eq!(remapped.len(), 2);

    let list = RnkFormat::default().parse_str("pre.rnk", "P4\t1\nNOPE\t2\n").unwrap();
    let err = collapse_ranked_list(&list, &chip(), true, CollapseMode::Max).unwrap_err();
    assert_eq!(err.code(), Some(1005));
}

// ============================================================================
// Row Extraction
// ============================================================================

#[test]
fn test_extract_rows_order_and_misses() {
    let extraction = extract_rows(&dataset(), &["P1", "P9", "P3"]).unwrap();

    assert_eq!(extraction.missing, 1);
    assert_eq!(extraction.dataset.name(), "expr_nrows3");
    assert_eq!(
        extraction.dataset.row_names(),
        &["P1".to_string(), "P3".to_string()]
    );
    assert_eq!(extraction.dataset.row(1), &[0.1, 0.2]);
}

#[test]
fn test_extract_gene_set_members() {
    let sets = GmtFormat::default()
        .parse_str("sets.gmt", "probes\tna\tP3\tP2\tMISSING\n")
        .unwrap();
    let extraction = extract_gene_set(&dataset(), &sets.gene_sets[0]).unwrap();

    assert_eq!(extraction.dataset.name(), "expr_PROBES");
    assert_eq!(
        extraction.dataset.row_names(),
        &["P3".to_string(), "P2".to_string()]
    );
    assert_eq!(extraction.missing, 1);
}
