#![forbid(unsafe_code)]

//! Session-owned reference data with a stale-response guard.
//!
//! Reference lists arrive from the backend asynchronously relative to the
//! session: the host fires the fetches, the operator may meanwhile reset
//! or restore the session, and a response for a superseded load must not
//! overwrite newer state. Each load carries a [`LoadTicket`] stamped with
//! the store generation at issue time; completing a load with a ticket
//! from an older generation is a no-op.
//!
//! # Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Empty-before-load | Every accessor yields an empty list until its load completes |
//! | Latest-wins | Only the most recently issued ticket can commit data |
//!
//! # Failure Modes
//!
//! A failed fetch simply never completes its ticket; the store stays on
//! its previous (possibly empty) lists and the wizard keeps rendering
//! empty dropdowns for the missing data.

use tracing::debug;

use cbam_core::{
    CountryOption, ElectricitySource, IndustryGroup, ReferenceData, resolve_default_country,
};

/// Proof of which load generation a fetch belongs to. Issued by
/// [`ReferenceStore::begin_load`]; stale tickets are silently discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// All backend reference lists for one wizard session.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    generation: u64,
    countries: Vec<CountryOption>,
    tree: ReferenceData,
    electricity: Vec<ElectricitySource>,
}

impl ReferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh load round. Any ticket issued earlier becomes stale,
    /// so responses from a superseded round can no longer commit.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        debug!(generation = self.generation, "reference load round started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Invalidate every outstanding ticket without starting a new round.
    /// Used when the session resets or restores from a snapshot.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    fn accept(&self, ticket: LoadTicket, what: &'static str) -> bool {
        if ticket.generation == self.generation {
            true
        } else {
            debug!(
                what,
                ticket = ticket.generation,
                current = self.generation,
                "stale reference response discarded"
            );
            false
        }
    }

    /// Commit a fetched country list. Returns whether the data was taken.
    pub fn complete_countries(&mut self, ticket: LoadTicket, countries: Vec<CountryOption>) -> bool {
        if !self.accept(ticket, "countries") {
            return false;
        }
        self.countries = countries;
        true
    }

    /// Commit the fetched industry/goods tree.
    pub fn complete_goods_tree(&mut self, ticket: LoadTicket, groups: Vec<IndustryGroup>) -> bool {
        if !self.accept(ticket, "goods tree") {
            return false;
        }
        self.tree = ReferenceData::new(groups);
        true
    }

    /// Commit the fetched electricity-source list.
    pub fn complete_electricity(
        &mut self,
        ticket: LoadTicket,
        sources: Vec<ElectricitySource>,
    ) -> bool {
        if !self.accept(ticket, "electricity sources") {
            return false;
        }
        self.electricity = sources;
        true
    }

    #[must_use]
    pub fn countries(&self) -> &[CountryOption] {
        &self.countries
    }

    #[must_use]
    pub fn tree(&self) -> &ReferenceData {
        &self.tree
    }

    #[must_use]
    pub fn electricity_sources(&self) -> &[ElectricitySource] {
        &self.electricity
    }

    /// The session default country (Thailand), once the country list has
    /// loaded and contains it.
    #[must_use]
    pub fn default_country(&self) -> Option<&CountryOption> {
        resolve_default_country(&self.countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> Vec<CountryOption> {
        vec![
            CountryOption {
                label: "Viet Nam".to_owned(),
                value: 240,
                abbreviation: "VN".to_owned(),
            },
            CountryOption {
                label: "Thailand".to_owned(),
                value: 222,
                abbreviation: "TH".to_owned(),
            },
        ]
    }

    #[test]
    fn store_is_empty_before_any_load_completes() {
        let store = ReferenceStore::new();
        assert!(store.countries().is_empty());
        assert!(store.tree().is_empty());
        assert!(store.electricity_sources().is_empty());
        assert!(store.default_country().is_none());
    }

    #[test]
    fn current_ticket_commits_and_resolves_default_country() {
        let mut store = ReferenceStore::new();
        let ticket = store.begin_load();
        assert!(store.complete_countries(ticket, countries()));
        assert_eq!(store.default_country().map(|c| c.value), Some(222));
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut store = ReferenceStore::new();
        let first = store.begin_load();
        let second = store.begin_load();
        // The first round's response arrives after the second round began.
        assert!(!store.complete_countries(first, countries()));
        assert!(store.countries().is_empty());
        assert!(store.complete_countries(second, countries()));
        assert_eq!(store.countries().len(), 2);
    }

    #[test]
    fn invalidate_voids_outstanding_tickets() {
        let mut store = ReferenceStore::new();
        let ticket = store.begin_load();
        store.invalidate();
        assert!(!store.complete_electricity(ticket, Vec::new()));
    }
}
