// tests/export_files.rs
use std::fs;
use std::path::PathBuf;

use cdms_scrape::export::{self, write_lines};
use cdms_scrape::table::{ColumnLayout, parse_results_table};
use cdms_scrape::{CdmsError, ExportFormat, ExportOptions, LineTable};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("cdms_export_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn co_lines() -> LineTable {
    parse_results_table(CO_ROWS, &ColumnLayout::species()).unwrap()
}

// Rows keep their leading spaces; the species offsets count from column 0.
const CO_ROWS: &str = concat!(
    "  115271.2018  0.0005 -5.0105 3    0.0000  3 -28503 101 1           0\n",
    "  230538.0000  0.0005 -4.1197 3    3.8450  5 -28503 101 2           1\n",
);

#[test]
fn fixture_rows_keep_their_indent() {
    assert!(CO_ROWS.lines().all(|l| l.starts_with("  ") && !l.starts_with("   ")));
    let table = co_lines();
    assert_eq!(table.len(), 2);
    assert_eq!(table.lines[0].gup, 3);
    assert_eq!(table.lines[1].qnum2, "1");
    assert!((table.lines[0].freq_rest - 115.271_201_8).abs() < 1e-9);
    assert!((table.lines[1].elow_cm - 3.845).abs() < 1e-12);
}

#[test]
fn csv_lands_in_nested_directory() {
    let dir = tmp_dir("nested");
    let path = dir.join("a").join("b").join("co.csv");
    let opts = ExportOptions { out_path: Some(path.clone()), ..Default::default() };
    let table = co_lines();

    let written = export::export_to_path(&opts, "unused", |w, o| write_lines(w, &table, o)).unwrap();
    assert_eq!(written, path);

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("freq_rest [GHz],freqerr [GHz],aij [log10(nm2 MHz)],dofrot,"));
    assert!(header.ends_with("elow [K],eup [K],eup_cm [1/cm]"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn json_export_round_trips_through_serde() {
    let dir = tmp_dir("json");
    let path = dir.join("co.json");
    let opts = ExportOptions { format: ExportFormat::Json, out_path: Some(path.clone()), ..Default::default() };
    let table = co_lines();
    export::export_to_path(&opts, "co", |w, o| write_lines(w, &table, o)).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["gup"], 5);
    assert_eq!(rows[1]["qnum1"], "2");
    assert!(rows[0]["eup"].as_f64().unwrap() > 5.5);
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let dir = tmp_dir("blocked");
    let blocker = dir.join("out");
    fs::write(&blocker, "not a dir").unwrap();
    assert!(matches!(export::ensure_directory(&blocker), Err(CdmsError::Io(_))));
}
