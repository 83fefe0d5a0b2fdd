use crate::core::inventory::Inventory;
use crate::core::ledger::ProvenanceLedger;
use crate::core::population::Population;
use crate::domain::model::{PartMap, Serial, Unit};
use std::collections::BTreeMap;

/// Owns the population, the inventory and the provenance ledger.
///
/// The generator mutates it through `&mut` while building both lines; once
/// generation is done it is only read through the query methods below.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(crate) population: Population,
    pub(crate) inventory: Inventory,
    pub(crate) ledger: ProvenanceLedger,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_unit(&self, serial: Serial) -> Option<&Unit> {
        self.population.get(serial)
    }

    /// Donor per category for a recipient. Complete for every constructed recipient.
    pub fn origin_of(&self, recipient: Serial) -> Option<&PartMap> {
        self.ledger.origin_of(recipient)
    }

    /// Recipient per harvested category for a donor. A missing category is a
    /// part that is still in inventory.
    pub fn destination_of(&self, donor: Serial) -> Option<&PartMap> {
        self.ledger.destination_of(donor)
    }

    pub fn all_units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.population.iter()
    }

    pub fn units_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Unit> + 'a {
        self.population
            .iter()
            .filter(move |unit| unit.category_tag() == tag)
    }

    pub fn count_by_tag(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for unit in self.population.iter() {
            *counts.entry(unit.category_tag().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn is_recipient(&self, serial: Serial) -> bool {
        self.population.contains(serial) && self.ledger.is_recipient(serial)
    }

    pub fn recipients(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.population
            .iter()
            .filter(|unit| self.ledger.is_recipient(unit.serial()))
    }

    pub fn donors(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.population
            .iter()
            .filter(|unit| !self.ledger.is_recipient(unit.serial()))
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn ledger(&self) -> &ProvenanceLedger {
        &self.ledger
    }
}
