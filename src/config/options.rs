// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// HTTP behaviour. Everything the upstream client left implicit is spelled out here.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra attempts after a failed request (network errors only).
    pub retries: u32,
    pub retry_pause: Duration,
    pub user_agent: String,
    /// Honour HTTP(S)_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            timeout: REQUEST_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            retries: RETRIES,
            retry_pause: Duration::from_millis(RETRY_PAUSE_MS),
            user_agent: s!(USER_AGENT),
            use_system_proxy: true,
        }
    }
}

impl ClientOptions {
    pub fn form_url(&self) -> String {
        join!(self.base_url.trim_end_matches('/'), FORM_PATH)
    }

    pub fn info_url(&self, mol_id: &str) -> String {
        format!("{}{}?file=e{}.cat", self.base_url.trim_end_matches('/'), INFO_PATH, mol_id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    #[default]
    GHz,
    MHz,
}

impl FrequencyUnit {
    pub fn as_form_value(self) -> &'static str {
        match self { FrequencyUnit::GHz => "GHz", FrequencyUnit::MHz => "MHz" }
    }

    /// `ghz` expressed in this unit.
    pub fn scale_from_ghz(self, ghz: f64) -> f64 {
        match self { FrequencyUnit::GHz => ghz, FrequencyUnit::MHz => ghz / MHZ_TO_GHZ }
    }
}

/// Search-form fields other than the frequency window and molecule list.
/// Defaults reproduce the values the catalog's own form submits for a text export.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOptions {
    pub unit: FrequencyUnit,
    pub str_lim: i32,
    pub temp: i32,
    pub output: String,
    pub sort: String,
    pub mol_sort_query: String,
    pub logscale: String,
    pub but_action: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            unit: FrequencyUnit::GHz,
            str_lim: DEFAULT_STR_LIM,
            temp: 0,
            output: s!("text"),
            sort: s!("frequency"),
            mol_sort_query: s!("tag"),
            logscale: s!("yes"),
            but_action: s!("Submit"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv", ExportFormat::Json => "json" }
    }

    /// Parse a user-facing format name (`csv`, `tsv`, `json`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    /// Field separator; `None` for formats that aren't delimited.
    pub fn delimiter(&self) -> Option<u8> {
        match self { ExportFormat::Csv => Some(b','), ExportFormat::Tsv => Some(b'\t'), ExportFormat::Json => None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    /// Header names carry units, e.g. `freq_rest [GHz]`.
    pub units_in_headers: bool,
    pub out_path: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            units_in_headers: true,
            out_path: None,
        }
    }
}

impl ExportOptions {
    /// Output path, falling back to `out/<stem>.<ext>`.
    pub fn out_path_or(&self, stem: &str) -> PathBuf {
        match &self.out_path {
            Some(p) => p.clone(),
            None => PathBuf::from(DEFAULT_OUT_DIR).join(join!(stem, ".", self.format.ext())),
        }
    }
}
