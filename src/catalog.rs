// src/catalog.rs
//! The species directory, loaded once from the search form.

use serde::Serialize;
use tracing::info;

use crate::config::consts::MOL_ID_LEN;
use crate::core::Http;
use crate::core::sanitize::strip_hyphens;
use crate::error::{CdmsError, Result};
use crate::matcher::name_ratio;
use crate::specs::search_form;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Six-character species id, zero-padded tag (`"028503"`).
    pub id: String,
    pub name: String,
}

impl CatalogEntry {
    /// Split an option text `"028503 CO, v=0"` at the fixed id width.
    pub fn from_option(text: &str) -> Self {
        let id: String = text.chars().take(MOL_ID_LEN).collect();
        let name: String = text.chars().skip(MOL_ID_LEN + 1).collect();
        Self { id, name }
    }

    /// Numeric tag, if the id is all digits.
    pub fn tag(&self) -> Option<u32> {
        self.id.trim().parse().ok()
    }

    pub fn name_without_hyphens(&self) -> String {
        strip_hyphens(&self.name)
    }

    /// The option text this entry came from.
    pub fn label(&self) -> String {
        join!(&self.id, " ", &self.name)
    }
}

/// Immutable, ordered list of species.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    source_url: Option<String>,
}

impl Catalog {
    /// GET the search form and read its molecule list.
    pub fn load(http: &Http) -> Result<Self> {
        let url = http.options().form_url();
        let page = http.get(&url)?;
        let mut catalog = Self::from_form_html(&page.body)?;
        catalog.source_url = Some(page.url.to_string());
        info!(entries = catalog.len(), url = %page.url, "catalog loaded");
        Ok(catalog)
    }

    pub fn from_form_html(body: &str) -> Result<Self> {
        let entries = search_form::molecule_options(body)?
            .iter()
            .map(|t| CatalogEntry::from_option(t))
            .collect();
        Ok(Self { entries, source_url: None })
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries, source_url: None }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn by_id(&self, id: &str) -> Option<&CatalogEntry> {
        let id = id.trim();
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose name scores `>= lim` against `name`, in catalog order.
    ///
    /// Hyphens are dropped from both sides before comparing.
    pub fn find_molecules(&self, name: &str, lim: f64) -> Vec<&CatalogEntry> {
        let query = strip_hyphens(name);
        self.entries
            .iter()
            .filter(|e| name_ratio(&query, &e.name) >= lim)
            .collect()
    }

    /// Like [`Catalog::find_molecules`], but an empty result is an error.
    pub fn require_match(&self, name: &str, lim: f64) -> Result<Vec<&CatalogEntry>> {
        let found = self.find_molecules(name, lim);
        if found.is_empty() {
            return Err(CdmsError::NoMatch { query: s!(name), limit: lim });
        }
        Ok(found)
    }

    /// An exact id first, otherwise the best-scoring name at or above `lim`.
    pub fn resolve(&self, id_or_name: &str, lim: f64) -> Result<&CatalogEntry> {
        if let Some(e) = self.by_id(id_or_name) {
            return Ok(e);
        }
        let query = strip_hyphens(id_or_name);
        self.require_match(id_or_name, lim)?
            .into_iter()
            .map(|e| (name_ratio(&query, &e.name), e))
            // first of the best scores
            .min_by(|a, b| b.0.total_cmp(&a.0))
            .map(|(_, e)| e)
            .ok_or_else(|| CdmsError::NoMatch { query: s!(id_or_name), limit: lim })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
