//! File-path entry points: plain and gzip inputs, export to disk, and
//! chip layout dispatch on real file names.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use gsea_common::GseaError;
use gsea_ingest::formats::{
    ChipFormat, DataframeFormat, Format, GctFormat, GmtFormat, RnkFormat, RptFormat,
};
use tempfile::TempDir;

const GCT: &str = "#1.2\n2\t3\nNAME\tDescription\ts1\ts2\ts3\n\
                   1007_s_at\tDDR1\t1.0\t2.0\t3.0\n\
                   1053_at\t\t4.0\t\t6.0\n";

fn write_gz(path: &Path, content: &str) {
    let mut encoder = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

// ============================================================================
// Gzip Transparency
// ============================================================================

#[test]
fn test_plain_and_gzip_inputs_parse_identically() {
    let tmp = TempDir::new().unwrap();
    let plain = tmp.path().join("P53.gct");
    let gz = tmp.path().join("P53.gct.gz");
    fs::write(&plain, GCT).unwrap();
    write_gz(&gz, GCT);

    let format = GctFormat::default();
    let from_plain = format.parse_file(&plain).unwrap();
    let from_gz = format.parse_file(&gz).unwrap();

    assert_eq!(from_gz.name(), "P53");
    assert_eq!(from_plain.name(), from_gz.name());
    assert_eq!(from_plain.row_names(), from_gz.row_names());
    assert_eq!(from_plain.column_names(), from_gz.column_names());
    assert_eq!(from_gz.row(0), &[1.0, 2.0, 3.0]);
    assert_eq!(from_gz.row_description(1), Some("NA"));
    assert!(from_gz.value(1, 1).is_nan());
    assert_eq!(from_gz.value(1, 2), 6.0);
}

#[test]
fn test_gzip_chip_is_classified_without_suffix() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("HG_U95Av2.chip.gz");
    write_gz(
        &path,
        "Probe Set ID\tGene Symbol\tGene Title\n1000_at\tMAPK3\tkinase 3\n",
    );

    let chip = ChipFormat::default().parse_file(&path).unwrap();
    assert_eq!(chip.name(), "HG_U95Av2.chip");
    assert_eq!(chip.probe("1000_at").unwrap().symbol.as_deref(), Some("MAPK3"));
}

#[test]
fn test_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = RnkFormat::default()
        .parse_file(&tmp.path().join("absent.rnk"))
        .unwrap_err();
    assert!(matches!(err, GseaError::Io(_)));
}

// ============================================================================
// Export To Disk
// ============================================================================

#[test]
fn test_export_file_then_parse_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sets.gmt");

    let format = GmtFormat::default();
    let sets = format
        .parse_str("sets.gmt", "SET_A\tfirst\tTP53\tMDM2\nSET_B\tNA\tEGFR\n")
        .unwrap();
    format.export_file(&sets, &path).unwrap();

    let reparsed = format.parse_file(&path).unwrap();
    assert_eq!(reparsed.gene_sets, sets.gene_sets);
}

#[test]
fn test_report_roundtrip_on_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gsea_run.rpt");

    let format = RptFormat::default();
    let report = format
        .parse_str(
            "gsea_run.rpt",
            "producer_class\tGsea\ntimestamp\t42\nparam\tnperm\t1000\nfile\tindex.html\n",
        )
        .unwrap();
    format.export_file(&report, &path).unwrap();

    let reparsed = format.parse_file(&path).unwrap();
    assert_eq!(reparsed.timestamp, 42);
    assert_eq!(reparsed.param("nperm"), Some("1000"));
    assert_eq!(reparsed.files, vec!["index.html"]);
}

// ============================================================================
// Dataframe Round Trip
// ============================================================================

#[test]
fn test_dataframe_roundtrip_keeps_names_and_values() {
    let input = "ID c1 c2\nr1 1.5 -2\nr2\t0.25\t1e3\n";
    let format = DataframeFormat::default();

    let first = format.parse_str("values.txt", input).unwrap();
    let exported = format.export_to_string(&first).unwrap();
    let second = format.parse_str("values.txt", &exported).unwrap();

    assert_eq!(second.row_names(), first.row_names());
    assert_eq!(second.column_names(), first.column_names());
    assert_eq!(second.matrix(), first.matrix());
    assert_eq!(second.value(1, 1), 1000.0);
}

// ============================================================================
// GCT Header Contract
// ============================================================================

fn gct_with(header: &str, rows: &[&str]) -> String {
    let mut text = format!("#1.2\n2\t3\n{}\n", header);
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

#[test]
fn test_gct_declared_shape_is_enforced() {
    let format = GctFormat::default();
    let good_header = "NAME\tDescription\ta\tb\tc";
    let row = "g\td\t1\t2\t3";
    let other = "h\td\t1\t2\t3";
    let third = "k\td\t1\t2\t3";

    assert!(format.parse_str("x.gct", &gct_with(good_header, &[row, other])).is_ok());

    for rows in [vec![row], vec![row, other, third]] {
        let err = format.parse_str("x.gct", &gct_with(good_header, &rows)).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.code(), Some(5005));
    }

    for header in ["NAME\tDescription\ta\tb", "NAME\tDescription\ta\tb\tc\td"] {
        let err = format
            .parse_str("x.gct", &gct_with(header, &[row, other]))
            .unwrap_err();
        assert_eq!(err.line(), Some(2));
    }
}
