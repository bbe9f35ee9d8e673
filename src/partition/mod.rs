// src/partition/mod.rs
//! Partition function Q(T) of one species, raw or interpolated.

pub mod spline;

use serde::Serialize;
use tracing::info;

use crate::catalog::CatalogEntry;
use crate::core::Http;
use crate::error::Result;
use crate::specs::partition::parse_partition_rows;

pub use spline::BSpline;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PartitionPoint {
    /// K
    pub temperature: f64,
    pub value: f64,
}

/// `Q(T)` rows, ascending in temperature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PartitionTable {
    pub species: String,
    pub source_url: Option<String>,
    pub points: Vec<PartitionPoint>,
}

impl PartitionTable {
    /// Sorts `points` by temperature.
    pub fn new(species: impl Into<String>, mut points: Vec<PartitionPoint>) -> Self {
        points.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));
        Self { species: species.into(), source_url: None, points }
    }

    pub fn from_info_html(species: impl Into<String>, body: &str) -> Result<Self> {
        let points = parse_partition_rows(body)?
            .into_iter()
            .map(|(temperature, value)| PartitionPoint { temperature, value })
            .collect();
        Ok(Self::new(species, points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.temperature).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Spline through a [`PartitionTable`].
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionInterpolator {
    table: PartitionTable,
    spline: BSpline,
}

impl PartitionInterpolator {
    /// Exact interpolation through the table points, no smoothing.
    pub fn from_table(table: PartitionTable, degree: usize) -> Result<Self> {
        let spline = BSpline::interpolate(&table.temperatures(), &table.values(), degree)?;
        Ok(Self { table, spline })
    }

    /// Q at `temperature` K. Outside the tabulated range the end pieces are extended.
    pub fn value_at(&self, temperature: f64) -> f64 {
        self.spline.eval(temperature)
    }

    pub fn table(&self) -> &PartitionTable {
        &self.table
    }

    pub fn degree(&self) -> usize {
        self.spline.degree()
    }
}

/// Fetch and parse the `Q(T)` rows of `entry`'s info page.
pub fn get_partition_table(http: &Http, entry: &CatalogEntry) -> Result<PartitionTable> {
    let url = http.options().info_url(&entry.id);
    let page = http.get(&url)?;
    let mut table = PartitionTable::from_info_html(&entry.name, &page.body)?;
    table.source_url = Some(page.url.to_string());
    info!(species = %entry.name, points = table.len(), "partition function");
    Ok(table)
}

/// As [`get_partition_table`], with an order-`degree` spline on top.
///
/// The spline interpolates: it passes through every tabulated `Q(T)` point
/// (smoothing factor s = 0), so `value_at` returns the table value exactly at
/// each tabulated temperature. Outside the table the end pieces are extended.
pub fn get_partition_interpolator(
    http: &Http,
    entry: &CatalogEntry,
    degree: usize,
) -> Result<PartitionInterpolator> {
    PartitionInterpolator::from_table(get_partition_table(http, entry)?, degree)
}
