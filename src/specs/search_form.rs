// src/specs/search_form.rs
//! Molecule list of the search form (`/cgi-bin/cdmssearch`).
//!
//! The form's first `<select>` holds one `<option>` per species, text
//! `"<6-char id> <name>"`, e.g. `"028503 CO, v=0"`.

use scraper::Html;
use tracing::debug;

use crate::core::html;
use crate::error::Result;

/// Option texts of the first `<select>`, whitespace-collapsed, in page order.
pub fn molecule_options(body: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(body);
    let options = html::first_select_options(&doc, "search form")?;
    debug!(count = options.len(), "search form options");
    Ok(options)
}
