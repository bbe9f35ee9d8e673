// src/lib.rs
//! Client and parsers for the CDMS molecular spectroscopy catalog.
//!
//! ```no_run
//! use cdms_scrape::{Catalog, ClientOptions, Http, QueryOptions, QueryRequest, query_lines};
//!
//! let http = Http::new(ClientOptions::default())?;
//! let catalog = Catalog::load(&http)?;
//! let co = catalog.resolve("CO, v=0", 0.8)?;
//! let lines = query_lines(&http, &QueryRequest::new(100.0, 250.0).molecule(co), &QueryOptions::default())?;
//! println!("{} lines", lines.len());
//! # Ok::<(), cdms_scrape::CdmsError>(())
//! ```

#[macro_use]
pub mod macros;

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod matcher;
pub mod partition;
pub mod physics;
pub mod query;
pub mod specs;
pub mod table;

#[cfg(feature = "cli")]
pub mod cli;

pub use catalog::{Catalog, CatalogEntry};
pub use config::options::{ClientOptions, ExportFormat, ExportOptions, FrequencyUnit, QueryOptions};
pub use crate::core::{Http, Page};
pub use error::{CdmsError, DecodeError, Result};
pub use matcher::{SequenceMatcher, name_ratio};
pub use partition::{
    PartitionInterpolator, PartitionPoint, PartitionTable, get_partition_interpolator, get_partition_table,
};
pub use query::{QueryRequest, query_lines, species_lines};
pub use table::{ColumnLayout, LineRecord, LineTable, parse_results_table};
