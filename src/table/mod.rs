// src/table/mod.rs
pub mod fixed_width;
pub mod lines;

pub use fixed_width::{ColumnKind, ColumnLayout, ColumnSpec, FixedWidthDecoder, LayoutKind, RawRecord, Value};
pub use lines::{parse_results_table, ColumnInfo, LineRecord, LineTable};
