// src/core/html.rs
// Thin selector helpers over `scraper`. Every lookup names its selector so a missing
// element surfaces as ElementNotFound instead of an index panic.

use scraper::{ElementRef, Html, Selector};

use crate::core::sanitize::normalize_ws;
use crate::error::{CdmsError, Result};

pub const SELECT: &str = "select";
pub const OPTION: &str = "option";
pub const ANCHOR: &str = "a[href]";
pub const PRE: &str = "pre";
pub const ROW: &str = "tr";
pub const CELL: &str = "td, th";

/// Selectors here are compile-time constants; a parse failure is a programming error.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector `{css}`: {e}"))
}

pub fn first<'a>(doc: &'a Html, css: &'static str, context: &str) -> Result<ElementRef<'a>> {
    doc.select(&selector(css))
        .next()
        .ok_or_else(|| CdmsError::not_found(css, context))
}

/// Visible text of an element, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Raw text of an element with whitespace kept (for `<pre>` blocks).
pub fn raw_text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Option texts of the first `<select>` on the page, in document order.
pub fn first_select_options(doc: &Html, context: &str) -> Result<Vec<String>> {
    let select = first(doc, SELECT, context)?;
    let opt = selector(OPTION);
    Ok(select
        .select(&opt)
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect())
}

/// `href` of the first anchor that has one.
pub fn first_anchor_href(doc: &Html, context: &str) -> Result<String> {
    let a = first(doc, ANCHOR, context)?;
    Ok(a.value().attr("href").unwrap_or_default().to_string())
}

/// `href` of the first anchor whose href satisfies `pred`.
pub fn find_anchor_href<P>(doc: &Html, context: &str, pred: P) -> Result<String>
where
    P: Fn(&str) -> bool,
{
    doc.select(&selector(ANCHOR))
        .filter_map(|a| a.value().attr("href"))
        .find(|href| pred(href))
        .map(str::to_string)
        .ok_or_else(|| CdmsError::not_found(ANCHOR, context))
}

/// Text content of the first `<pre>` block, untouched.
pub fn first_pre_text(doc: &Html, context: &str) -> Result<String> {
    first(doc, PRE, context).map(raw_text_of)
}

/// Every `<tr>` as a list of cell texts.
pub fn table_rows(doc: &Html) -> Vec<Vec<String>> {
    let cell = selector(CELL);
    doc.select(&selector(ROW))
        .map(|tr| tr.select(&cell).map(text_of).collect())
        .collect()
}
