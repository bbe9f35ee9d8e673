// src/specs/partition.rs
//! `Q(T)` rows of the species info page.
//!
//! The page's parameter table has rows like
//! `<tr><td>Q(300.0)</td><td>108.8651</td></tr>`. Some species list the total
//! followed by its parts in parentheses: `2521.8958 (2141.5366, 380.3592)`.

use scraper::Html;
use tracing::debug;

use crate::config::consts::PARTITION_ROW_PREFIX;
use crate::core::html;
use crate::core::sanitize::first_token;
use crate::error::{CdmsError, Result};

/// (temperature K, value) pairs, ascending in temperature.
pub fn parse_partition_rows(body: &str) -> Result<Vec<(f64, f64)>> {
    let doc = Html::parse_document(body);
    let mut rows = Vec::new();

    for cells in html::table_rows(&doc) {
        let Some(label) = cells.first().map(|c| c.trim()) else { continue };
        if !label.starts_with(PARTITION_ROW_PREFIX) {
            continue;
        }
        let raw = cells.get(1).map(|c| c.trim()).unwrap_or_default();
        let bad = || CdmsError::PartitionValue { label: s!(label), value: s!(raw) };

        let temperature = label[PARTITION_ROW_PREFIX.len()..]
            .strip_suffix(')')
            .and_then(|t| t.trim().parse::<f64>().ok())
            .ok_or_else(bad)?;
        let value = raw
            .parse::<f64>()
            .or_else(|_| first_token(raw).parse::<f64>())
            .map_err(|_| bad())?;
        rows.push((temperature, value));
    }

    rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    debug!(rows = rows.len(), "partition function rows");
    Ok(rows)
}
