// src/table/fixed_width.rs
//! Column-aligned text decoding.
//!
//! A [`ColumnLayout`] is an ordered list of columns, each with a start offset.
//! A column ends where the next begins; the last runs to end of line. Offsets are
//! character positions. Nothing checks that the offsets fit the text: a wrong
//! layout yields shifted slices, and only a slice that then fails numeric
//! coercion is reported (as a [`DecodeError`]).

use serde::Serialize;

use crate::config::consts::{GENERAL_STARTS, LINE_COLUMNS, SPECIES_STARTS};
use crate::error::DecodeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Float,
    Int,
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub start: usize,
    pub kind: ColumnKind,
}

/// Which page a line list came from; the two differ only in spacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LayoutKind {
    /// Search-results page.
    General,
    /// Full catalog file of a single species.
    Species,
    Custom,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    pub kind: LayoutKind,
    columns: Vec<ColumnSpec>,
}

const LINE_KINDS: [ColumnKind; 11] = {
    use ColumnKind::{Float, Int, Text};
    [Float, Float, Float, Int, Float, Int, Int, Int, Text, Text, Text]
};

impl ColumnLayout {
    /// Columns must be given in ascending start order.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        debug_assert!(columns.windows(2).all(|w| w[0].start <= w[1].start));
        Self { kind: LayoutKind::Custom, columns }
    }

    pub fn general() -> Self {
        Self::line_list(LayoutKind::General, &GENERAL_STARTS)
    }

    pub fn species() -> Self {
        Self::line_list(LayoutKind::Species, &SPECIES_STARTS)
    }

    fn line_list(kind: LayoutKind, starts: &[usize; 11]) -> Self {
        let columns = LINE_COLUMNS
            .iter()
            .zip(starts)
            .zip(LINE_KINDS)
            .map(|((name, &start), kind)| ColumnSpec { name: s!(*name), start, kind })
            .collect();
        Self { kind, columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn starts(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.start).collect()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// One input line cut at the layout offsets, before any coercion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// 1-based line number in the source text.
    pub line: usize,
    pub fields: Vec<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Int(i64),
    Text(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(i) => Some(*i as f64),
            Value::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self { Value::Int(i) => Some(*i), _ => None }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self { Value::Text(s) => Some(s), _ => None }
    }
}

/// Cut `line` at the given character offsets. Offsets past the end give "".
pub fn split_line<'a>(line: &'a str, starts: &[usize]) -> Vec<&'a str> {
    // Byte index of every char boundary, plus the end.
    let bounds: Vec<usize> = line.char_indices().map(|(b, _)| b).chain([line.len()]).collect();
    let nchars = bounds.len() - 1;
    let byte_at = |c: usize| bounds[c.min(nchars)];

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(nchars);
            let (b0, b1) = (byte_at(start), byte_at(end.max(start)));
            &line[b0..b1]
        })
        .collect()
}

/// Integer parse that also accepts the catalog's letter overflow code in the
/// leading position: `A01` = 1001, `Z99` = 3599.
pub fn parse_catalog_int(s: &str) -> Option<i64> {
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let mut chars = s.chars();
    let lead = chars.next()?;
    if !lead.is_ascii_uppercase() {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let high = 10 + (lead as i64 - 'A' as i64);
    let scale = 10i64.checked_pow(rest.len() as u32)?;
    Some(high * scale + rest.parse::<i64>().ok()?)
}

pub fn coerce(slice: &str, kind: ColumnKind) -> Option<Value> {
    let t = slice.trim();
    match kind {
        ColumnKind::Float => t.parse::<f64>().ok().map(Value::Float),
        ColumnKind::Int => parse_catalog_int(t).map(Value::Int),
        ColumnKind::Text => Some(Value::Text(t.to_string())),
    }
}

pub struct FixedWidthDecoder {
    layout: ColumnLayout,
    starts: Vec<usize>,
}

impl FixedWidthDecoder {
    pub fn new(layout: ColumnLayout) -> Self {
        let starts = layout.starts();
        Self { layout, starts }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Split every non-blank line; no coercion.
    pub fn split<'a>(&self, text: &'a str) -> Vec<RawRecord<'a>> {
        text.lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| RawRecord { line: i + 1, fields: split_line(l, &self.starts) })
            .collect()
    }

    pub fn coerce_record(&self, raw: &RawRecord<'_>) -> Result<Vec<Value>, DecodeError> {
        self.layout
            .columns
            .iter()
            .zip(&raw.fields)
            .map(|(col, slice)| {
                coerce(slice, col.kind).ok_or_else(|| DecodeError {
                    line: raw.line,
                    column: col.name.clone(),
                    value: slice.trim().to_string(),
                })
            })
            .collect()
    }

    /// Split and coerce; stops at the first bad slice.
    pub fn decode(&self, text: &str) -> Result<Vec<Vec<Value>>, DecodeError> {
        self.split(text).iter().map(|raw| self.coerce_record(raw)).collect()
    }
}
