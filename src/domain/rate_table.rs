//! The in-memory rate table: an ordered sequence of tiers, replaced wholesale
//! on every successful load and queried read-only by the quote pipeline.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::entities::RateEntry;

#[derive(Clone, Debug, Default)]
pub struct RateTable {
    entries: Vec<RateEntry>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<RateEntry>) -> Self {
        Self { entries }
    }

    /// Replaces the whole table. Loads never merge.
    pub fn load(&mut self, entries: Vec<RateEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Distinct non-empty countries, ascending string order.
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self
            .entries
            .iter()
            .filter(|e| !e.country.is_empty())
            .map(|e| e.country.clone())
            .collect();
        countries.sort();
        countries.dedup();
        countries
    }

    /// Distinct methods for `country` in first-seen order. An empty result is
    /// a displayable "no methods" state, not an error.
    pub fn methods(&self, country: &str) -> Vec<String> {
        let mut methods = Vec::new();
        for entry in self.entries.iter().filter(|e| e.country == country) {
            if !methods.contains(&entry.method) {
                methods.push(entry.method.clone());
            }
        }
        methods
    }

    /// First entry matching (country, method) exactly, else the first entry
    /// for the country alone. The method narrows, it never fails on its own;
    /// `None` means no rates exist for the country at all.
    pub fn find(&self, country: &str, method: &str) -> Option<&RateEntry> {
        self.entries
            .iter()
            .find(|e| e.country == country && e.method == method)
            .or_else(|| self.entries.iter().find(|e| e.country == country))
    }

    /// Like [`find`](Self::find), but among the candidate tiers prefers the
    /// first whose declared weight band contains `weight_g`, falling back to
    /// the first candidate so band-less tables behave exactly as before.
    pub fn find_for_weight(&self, country: &str, method: &str, weight_g: f64) -> Option<&RateEntry> {
        let exact: Vec<&RateEntry> = self
            .entries
            .iter()
            .filter(|e| e.country == country && e.method == method)
            .collect();
        let candidates = if exact.is_empty() {
            self.entries.iter().filter(|e| e.country == country).collect()
        } else {
            exact
        };
        candidates
            .iter()
            .find(|e| e.band_contains(weight_g))
            .or_else(|| candidates.first())
            .copied()
    }
}

/// Rate table for concurrent hosts: the whole table sits behind one atomic
/// pointer, so a replacement is a single swap (last write wins) and readers
/// always see a fully-old or fully-new table, never a mix.
#[derive(Debug, Default)]
pub struct SharedRateTable {
    inner: ArcSwap<RateTable>,
}

impl SharedRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, table: RateTable) {
        self.inner.store(Arc::new(table));
    }

    /// A coherent snapshot of the current table.
    pub fn snapshot(&self) -> Arc<RateTable> {
        self.inner.load_full()
    }
}
