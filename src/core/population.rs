use crate::domain::model::{Serial, Unit};
use std::collections::BTreeMap;

/// Every generated unit keyed by serial. Units are only ever added.
#[derive(Debug, Clone, Default)]
pub struct Population {
    units: BTreeMap<Serial, Unit>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the population untouched if the serial is taken.
    pub(crate) fn insert(&mut self, unit: Unit) -> bool {
        if self.units.contains_key(&unit.serial()) {
            return false;
        }
        self.units.insert(unit.serial(), unit);
        true
    }

    pub fn get(&self, serial: Serial) -> Option<&Unit> {
        self.units.get(&serial)
    }

    pub fn contains(&self, serial: Serial) -> bool {
        self.units.contains_key(&serial)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
