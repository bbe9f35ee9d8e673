// src/specs/mod.rs
//! # Page "specs"
//!
//! One module per catalog page. Each spec encodes *where the data lives in the
//! HTML* and *how to pull it out*, and nothing else.
//!
//! ## What lives here
//! - **Pure parsing** of fetched page bodies: the search form (`search_form`),
//!   the link and results pages a query produces, the species info page (`results`),
//!   and the `Q(T)` table of the info page (`partition`).
//! - **Selector choice**, via the `core::html` helpers, so that a missing element
//!   becomes `CdmsError::ElementNotFound` naming the selector and the page.
//!
//! ## What does **not** live here
//! - **Networking.** Callers fetch with `core::net::Http` and hand over the body.
//! - **Decoding the fixed-width table** (`table`) or building typed results
//!   (`catalog`, `query`, `partition`).
//!
//! ## Typical call chain
//! ```text
//! query::query_lines → Http::post_form → specs::results::result_link
//!                    → Http::get       → specs::results::results_text
//!                    → table::parse_results_table
//! ```
//!
//! ## Testing notes
//! Every function takes `&str` HTML and is tested offline against small fixtures.

pub mod partition;
pub mod results;
pub mod search_form;
