// src/export.rs
//! Writing line lists and partition tables as CSV, TSV or JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::catalog::CatalogEntry;
use crate::config::options::ExportOptions;
use crate::error::{CdmsError, Result};
use crate::partition::PartitionTable;
use crate::table::{ColumnInfo, LineTable};

const CATALOG_COLUMNS: [ColumnInfo; 2] = [
    ColumnInfo { name: "id", unit: "" },
    ColumnInfo { name: "name", unit: "" },
];

const PARTITION_COLUMNS: [ColumnInfo; 2] = [
    ColumnInfo { name: "temperature", unit: "K" },
    ColumnInfo { name: "q", unit: "" },
];

pub fn write_lines<W: Write>(w: W, table: &LineTable, opts: &ExportOptions) -> Result<()> {
    match opts.format.delimiter() {
        Some(delim) => write_delimited(
            w,
            delim,
            header(LineTable::columns(), opts),
            table.iter().map(|l| l.to_cells()),
        ),
        None => write_json(w, &table.lines),
    }
}

pub fn write_partition<W: Write>(w: W, table: &PartitionTable, opts: &ExportOptions) -> Result<()> {
    match opts.format.delimiter() {
        Some(delim) => write_delimited(
            w,
            delim,
            header(&PARTITION_COLUMNS, opts),
            table.points.iter().map(|p| vec![p.temperature.to_string(), p.value.to_string()]),
        ),
        None => write_json(w, &table.points),
    }
}

pub fn write_catalog<W: Write>(w: W, entries: &[&CatalogEntry], opts: &ExportOptions) -> Result<()> {
    match opts.format.delimiter() {
        Some(delim) => write_delimited(
            w,
            delim,
            header(&CATALOG_COLUMNS, opts),
            entries.iter().map(|e| vec![e.id.clone(), e.name.clone()]),
        ),
        None => write_json(w, entries),
    }
}

/// Run `write` against `opts.out_path` (or `out/<stem>.<ext>`), creating parent
/// directories. Returns the path written.
pub fn export_to_path<F>(opts: &ExportOptions, stem: &str, write: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BufWriter<File>, &ExportOptions) -> Result<()>,
{
    let path = opts.out_path_or(stem);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(&path)?);
    write(&mut out, opts)?;
    out.flush()?;
    info!(path = %path.display(), format = opts.format.ext(), "export written");
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(CdmsError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn header(columns: &[ColumnInfo], opts: &ExportOptions) -> Option<Vec<String>> {
    opts.include_headers.then(|| {
        columns
            .iter()
            .map(|c| if opts.units_in_headers { c.label() } else { s!(c.name) })
            .collect()
    })
}

fn write_delimited<W, I>(w: W, delim: u8, header: Option<Vec<String>>, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = csv::WriterBuilder::new().delimiter(delim).from_writer(w);
    if let Some(h) = header {
        wtr.write_record(&h)?;
    }
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(mut w: W, rows: &[T]) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, rows)?;
    writeln!(w)?;
    Ok(())
}
