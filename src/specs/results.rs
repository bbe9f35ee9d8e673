// src/specs/results.rs
//! Pages reached after a search or from a species info page.
//!
//! - The POST response is a short page whose **first anchor** points at the
//!   generated results page.
//! - The results page carries the line list inside its first `<pre>`.
//! - The species info page links the full catalog file (`c<id>.cat`); that file
//!   is served as plain text, though some mirrors wrap it in `<pre>`.

use scraper::Html;

use crate::core::html;
use crate::error::Result;

/// `href` of the first anchor on the search response.
pub fn result_link(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    html::first_anchor_href(&doc, "search response")
}

/// The fixed-width table text of a results page.
pub fn results_text(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    html::first_pre_text(&doc, "results page")
}

/// `href` of the species catalog file on an info page.
pub fn catalog_file_link(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    html::find_anchor_href(&doc, "species info page", |href| {
        href.split(['?', '#']).next().is_some_and(|path| path.ends_with(".cat"))
    })
}

/// Catalog file contents, unwrapping `<pre>` when the body is HTML.
pub fn catalog_file_text(body: &str) -> Result<String> {
    let head = body.trim_start();
    if head.starts_with('<') {
        results_text(body)
    } else {
        Ok(s!(body))
    }
}
