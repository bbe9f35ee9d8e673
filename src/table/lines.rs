// src/table/lines.rs
//! Typed line lists with derived energies.

use serde::Serialize;
use tracing::info;

use super::fixed_width::{ColumnLayout, FixedWidthDecoder, LayoutKind, Value};
use crate::config::consts::MHZ_TO_GHZ;
use crate::error::{DecodeError, Result};
use crate::physics;

/// One transition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineRecord {
    /// Rest frequency, GHz.
    pub freq_rest: f64,
    /// Frequency uncertainty, GHz.
    ///
    /// Rescaled from MHz like `freq_rest`. The catalog sometimes reports this
    /// column in other units depending on sign conventions; that case is not
    /// detected here.
    pub freqerr: f64,
    /// log10 of the integrated intensity at 300 K, nm² MHz.
    pub aij: f64,
    /// Degrees of freedom of the rotational partition function.
    pub dofrot: i64,
    /// Lower-state energy, cm⁻¹.
    pub elow_cm: f64,
    /// Upper-state degeneracy.
    pub gup: i64,
    /// Species tag; negative when the frequency is laboratory-measured.
    pub tag: i64,
    /// Quantum-number format code.
    pub qenq: i64,
    pub qnum1: String,
    pub qnum2: String,
    pub species: String,
    /// Lower-state energy, K.
    pub elow: f64,
    /// Upper-state energy, K.
    pub eup: f64,
    /// Upper-state energy, cm⁻¹.
    pub eup_cm: f64,
}

impl LineRecord {
    pub fn is_experimental(&self) -> bool {
        self.tag < 0
    }

    /// Cells in [`LineTable::columns`] order, formatted for text export.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.freq_rest.to_string(),
            self.freqerr.to_string(),
            self.aij.to_string(),
            self.dofrot.to_string(),
            self.elow_cm.to_string(),
            self.gup.to_string(),
            self.tag.to_string(),
            self.qenq.to_string(),
            self.qnum1.clone(),
            self.qnum2.clone(),
            self.species.clone(),
            self.elow.to_string(),
            self.eup.to_string(),
            self.eup_cm.to_string(),
        ]
    }
}

/// Column name and unit (empty when dimensionless).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub unit: &'static str,
}

impl ColumnInfo {
    pub fn label(&self) -> String {
        if self.unit.is_empty() { s!(self.name) } else { format!("{} [{}]", self.name, self.unit) }
    }
}

const COLUMNS: [ColumnInfo; 14] = [
    ColumnInfo { name: "freq_rest", unit: "GHz" },
    ColumnInfo { name: "freqerr", unit: "GHz" },
    ColumnInfo { name: "aij", unit: "log10(nm2 MHz)" },
    ColumnInfo { name: "dofrot", unit: "" },
    ColumnInfo { name: "elow_cm", unit: "1/cm" },
    ColumnInfo { name: "gup", unit: "" },
    ColumnInfo { name: "tag", unit: "" },
    ColumnInfo { name: "qenq", unit: "" },
    ColumnInfo { name: "qnum1", unit: "" },
    ColumnInfo { name: "qnum2", unit: "" },
    ColumnInfo { name: "species", unit: "" },
    ColumnInfo { name: "elow", unit: "K" },
    ColumnInfo { name: "eup", unit: "K" },
    ColumnInfo { name: "eup_cm", unit: "1/cm" },
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineTable {
    pub source_url: Option<String>,
    pub layout: LayoutKind,
    pub lines: Vec<LineRecord>,
}

impl LineTable {
    pub fn columns() -> &'static [ColumnInfo] {
        &COLUMNS
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineRecord> {
        self.lines.iter()
    }

    pub fn with_source(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Lines with `lo <= freq_rest <= hi` (GHz).
    pub fn in_window(&self, lo: f64, hi: f64) -> impl Iterator<Item = &LineRecord> {
        self.lines.iter().filter(move |l| l.freq_rest >= lo && l.freq_rest <= hi)
    }
}

impl<'a> IntoIterator for &'a LineTable {
    type Item = &'a LineRecord;
    type IntoIter = std::slice::Iter<'a, LineRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Decode a catalog line list and attach derived energies.
///
/// `layout` must name every column of [`crate::config::consts::LINE_COLUMNS`];
/// use [`ColumnLayout::general`] for search results and
/// [`ColumnLayout::species`] for per-species catalog files.
pub fn parse_results_table(text: &str, layout: &ColumnLayout) -> Result<LineTable> {
    let decoder = FixedWidthDecoder::new(layout.clone());
    let fields = LineFields::locate(layout)?;

    let mut lines = Vec::new();
    for raw in decoder.split(text) {
        let row = decoder.coerce_record(&raw)?;
        lines.push(fields.build(&row, raw.line)?);
    }
    info!(rows = lines.len(), layout = ?layout.kind, "decoded line list");

    Ok(LineTable { source_url: None, layout: layout.kind, lines })
}

/// Column positions of each named field in a layout.
struct LineFields {
    idx: [usize; 11],
    names: [&'static str; 11],
}

impl LineFields {
    fn locate(layout: &ColumnLayout) -> std::result::Result<Self, DecodeError> {
        let names = crate::config::consts::LINE_COLUMNS;
        let mut idx = [0usize; 11];
        for (slot, name) in idx.iter_mut().zip(names) {
            *slot = layout.index_of(name).ok_or_else(|| DecodeError {
                line: 0,
                column: s!(name),
                value: s!("<column missing from layout>"),
            })?;
        }
        Ok(Self { idx, names })
    }

    fn build(&self, row: &[Value], line: usize) -> std::result::Result<LineRecord, DecodeError> {
        let type_err = |i: usize| DecodeError {
            line,
            column: s!(self.names[i]),
            value: format!("{:?}", row[self.idx[i]]),
        };
        let f = |i: usize| row[self.idx[i]].as_f64().ok_or_else(|| type_err(i));
        let n = |i: usize| row[self.idx[i]].as_i64().ok_or_else(|| type_err(i));
        let t = |i: usize| match &row[self.idx[i]] {
            Value::Text(s) => s.clone(),
            other => format!("{other:?}"),
        };

        let freq_rest = f(0)? * MHZ_TO_GHZ;
        let freqerr = f(1)? * MHZ_TO_GHZ;
        let elow_cm = f(4)?;
        let physics::Derived { elow, eup, eup_cm } = physics::derive(elow_cm, freq_rest);

        Ok(LineRecord {
            freq_rest,
            freqerr,
            aij: f(2)?,
            dofrot: n(3)?,
            elow_cm,
            gup: n(5)?,
            tag: n(6)?,
            qenq: n(7)?,
            qnum1: t(8),
            qnum2: t(9),
            species: t(10),
            elow,
            eup,
            eup_cm,
        })
    }
}
