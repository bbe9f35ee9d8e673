// src/config/consts.rs
use std::time::Duration;

// Net config
pub const BASE_URL: &str = "https://cdms.astro.uni-koeln.de";
pub const FORM_PATH: &str = "/cgi-bin/cdmssearch";
pub const INFO_PATH: &str = "/cgi-bin/cdmsinfo";
pub const USER_AGENT: &str = concat!("cdms_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const RETRIES: u32 = 0; // upstream has none; opt in via ClientOptions
pub const RETRY_PAUSE_MS: u64 = 500;

// Query
pub const WIDE_SPAN_WARN_GHZ: f64 = 100.0; // advisory only
pub const DEFAULT_STR_LIM: i32 = -10;

// Matcher
pub const DEFAULT_MATCH_LIMIT: f64 = 0.8;
pub const MOL_ID_LEN: usize = 6;

// Fixed-width layouts
pub const LINE_COLUMNS: [&str; 11] = [
    "freq_rest", "freqerr", "aij", "dofrot", "elow_cm", "gup", "tag", "qenq", "qnum1", "qnum2",
    "species",
];
// (F13.4,F8.4, F8.4,  I2,F10.4,  I3,  I7,    I4,  6I2,  6I2) as laid out by the search results page
pub const GENERAL_STARTS: [usize; 11] = [0, 13, 24, 35, 37, 47, 50, 57, 61, 72, 89];
// Same format, native catalog file spacing
pub const SPECIES_STARTS: [usize; 11] = [0, 13, 21, 29, 31, 41, 44, 51, 55, 67, 79];
pub const MHZ_TO_GHZ: f64 = 1e-3;

// Partition function
pub const PARTITION_ROW_PREFIX: &str = "Q(";
pub const DEFAULT_SPLINE_DEGREE: usize = 2;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
