// src/query.rs
//! Line-list retrieval: the search form for a frequency window, or the full
//! catalog file of one species.

use tracing::{debug, info, warn};

use crate::catalog::CatalogEntry;
use crate::config::consts::WIDE_SPAN_WARN_GHZ;
use crate::config::options::QueryOptions;
use crate::core::Http;
use crate::error::{CdmsError, Result};
use crate::specs::results;
use crate::table::{ColumnLayout, LineTable, parse_results_table};

const WIDE_SPAN_ADVISORY: &str =
    "wide frequency span; consider narrower windows to avoid overloading the CDMS service";

/// A frequency window (GHz) and the species to search in it.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryRequest {
    pub min_ghz: f64,
    pub max_ghz: f64,
    /// Option texts as the form lists them, e.g. `"028503 CO, v=0"`.
    pub molecules: Vec<String>,
}

impl QueryRequest {
    pub fn new(min_ghz: f64, max_ghz: f64) -> Self {
        Self { min_ghz, max_ghz, molecules: Vec::new() }
    }

    pub fn molecule(mut self, entry: &CatalogEntry) -> Self {
        self.molecules.push(entry.label());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_ghz.is_finite() || !self.max_ghz.is_finite() {
            return Err(CdmsError::InvalidQuery(s!("frequency bounds must be finite")));
        }
        if self.min_ghz > self.max_ghz {
            return Err(CdmsError::InvalidQuery(format!(
                "min frequency {} GHz is above max {} GHz",
                self.min_ghz, self.max_ghz
            )));
        }
        if self.molecules.is_empty() {
            return Err(CdmsError::InvalidQuery(s!("no molecules selected")));
        }
        let span = self.max_ghz - self.min_ghz;
        if span > WIDE_SPAN_WARN_GHZ {
            warn!(span_ghz = span, "{WIDE_SPAN_ADVISORY}");
        }
        Ok(())
    }

    /// Form fields in submission order. `Molecules` repeats per species;
    /// `MinNu`/`MaxNu` are converted from GHz to `opts.unit`.
    pub fn payload(&self, opts: &QueryOptions) -> Vec<(String, String)> {
        let mut form = vec![
            (s!("MinNu"), opts.unit.scale_from_ghz(self.min_ghz).to_string()),
            (s!("MaxNu"), opts.unit.scale_from_ghz(self.max_ghz).to_string()),
            (s!("UnitNu"), s!(opts.unit.as_form_value())),
            (s!("StrLim"), opts.str_lim.to_string()),
        ];
        form.extend(self.molecules.iter().map(|m| (s!("Molecules"), m.clone())));
        form.extend([
            (s!("temp"), opts.temp.to_string()),
            (s!("output"), opts.output.clone()),
            (s!("sort"), opts.sort.clone()),
            (s!("mol_sort_query"), opts.mol_sort_query.clone()),
            (s!("logscale"), opts.logscale.clone()),
            (s!("but_action"), opts.but_action.clone()),
        ]);
        form
    }
}

/// Submit the search form, follow the result link and decode the table.
pub fn query_lines(http: &Http, request: &QueryRequest, opts: &QueryOptions) -> Result<LineTable> {
    request.validate()?;
    let form_url = http.options().form_url();
    let response = http.post_form(&form_url, &request.payload(opts))?;

    let link = results::result_link(&response.body)?;
    let results_url = response.join(&link)?;
    debug!(url = %results_url, "following result link");
    let page = http.get(results_url.as_str())?;

    let text = results::results_text(&page.body)?;
    let table = parse_results_table(&text, &ColumnLayout::general())?.with_source(page.url.as_str());
    info!(lines = table.len(), min_ghz = request.min_ghz, max_ghz = request.max_ghz, "query done");
    Ok(table)
}

/// Every line of one species, from its catalog file.
pub fn species_lines(http: &Http, entry: &CatalogEntry) -> Result<LineTable> {
    let info_url = http.options().info_url(&entry.id);
    let info_page = http.get(&info_url)?;

    let link = results::catalog_file_link(&info_page.body)?;
    let file_url = info_page.join(&link)?;
    debug!(url = %file_url, species = %entry.name, "fetching catalog file");
    let file = http.get(file_url.as_str())?;

    let text = results::catalog_file_text(&file.body)?;
    let table = parse_results_table(&text, &ColumnLayout::species())?.with_source(file.url.as_str());
    info!(lines = table.len(), species = %entry.name, "species catalog done");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::FrequencyUnit;

    fn co() -> CatalogEntry {
        CatalogEntry::from_option("028503 CO, v=0")
    }

    #[test]
    fn payload_order_and_repeats() {
        let req = QueryRequest::new(100.0, 120.0)
            .molecule(&co())
            .molecule(&CatalogEntry::from_option("029501 HCO+, v=0"));
        let form = req.payload(&QueryOptions::default());
        let keys: Vec<&str> = form.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "MinNu", "MaxNu", "UnitNu", "StrLim", "Molecules", "Molecules", "temp", "output",
                "sort", "mol_sort_query", "logscale", "but_action"
            ]
        );
        assert_eq!(form[0].1, "100");
        assert_eq!(form[2].1, "GHz");
        assert_eq!(form[3].1, "-10");
        assert_eq!(form[4].1, "028503 CO, v=0");
        assert_eq!(form[5].1, "029501 HCO+, v=0");
    }

    #[test]
    fn payload_in_mhz() {
        let opts = QueryOptions { unit: FrequencyUnit::MHz, ..Default::default() };
        let form = QueryRequest::new(115.0, 116.5).molecule(&co()).payload(&opts);
        assert_eq!(form[0].1, "115000");
        assert_eq!(form[1].1, "116500");
        assert_eq!(form[2].1, "MHz");
    }

    #[test]
    fn inverted_window_rejected() {
        let req = QueryRequest::new(120.0, 100.0).molecule(&co());
        assert!(matches!(req.validate(), Err(CdmsError::InvalidQuery(_))));
    }

    #[test]
    fn empty_molecules_rejected() {
        assert!(matches!(QueryRequest::new(1.0, 2.0).validate(), Err(CdmsError::InvalidQuery(_))));
    }

    #[test]
    fn wide_span_is_only_advisory() {
        assert!(QueryRequest::new(0.0, 1000.0).molecule(&co()).validate().is_ok());
    }

    #[test]
    fn wide_span_advisory_warns_about_service_load() {
        assert!(WIDE_SPAN_ADVISORY.contains("overloading the CDMS service"));
        assert!(!WIDE_SPAN_ADVISORY.contains("truncate"));
    }
}
