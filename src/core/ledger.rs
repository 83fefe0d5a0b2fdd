use crate::domain::model::{PartMap, PartType, Serial};
use std::collections::BTreeMap;

/// Which donor gave which part to which recipient, indexed both ways.
///
/// Entries are only ever added. `origin` and `destination` mirror each other:
/// `origin[r][p] == d` exactly when `destination[d][p] == r`.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceLedger {
    origin: BTreeMap<Serial, PartMap>,
    destination: BTreeMap<Serial, PartMap>,
}

impl ProvenanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts both directions. Each (donor, part) is recorded at most once
    /// because the inventory refuses to hand out a consumed part.
    pub(crate) fn record(&mut self, donor: Serial, recipient: Serial, part: PartType) {
        self.destination
            .entry(donor)
            .or_default()
            .insert(part, recipient);
        self.origin.entry(recipient).or_default().insert(part, donor);
    }

    pub fn donor_of(&self, recipient: Serial, part: PartType) -> Option<Serial> {
        self.origin.get(&recipient)?.get(&part).copied()
    }

    /// `None` means that donor's part has not been harvested.
    pub fn recipient_of(&self, donor: Serial, part: PartType) -> Option<Serial> {
        self.destination.get(&donor)?.get(&part).copied()
    }

    pub fn origin_of(&self, recipient: Serial) -> Option<&PartMap> {
        self.origin.get(&recipient)
    }

    pub fn destination_of(&self, donor: Serial) -> Option<&PartMap> {
        self.destination.get(&donor)
    }

    /// How many of `recipient`'s recorded parts came from `donor`.
    pub fn parts_from(&self, recipient: Serial, donor: Serial) -> usize {
        self.origin
            .get(&recipient)
            .map(|parts| parts.values().filter(|d| **d == donor).count())
            .unwrap_or(0)
    }

    pub fn is_recipient(&self, serial: Serial) -> bool {
        self.origin.contains_key(&serial)
    }

    pub fn recipients(&self) -> impl Iterator<Item = (Serial, &PartMap)> + '_ {
        self.origin.iter().map(|(serial, parts)| (*serial, parts))
    }

    pub fn donations(&self) -> impl Iterator<Item = (Serial, &PartMap)> + '_ {
        self.destination.iter().map(|(serial, parts)| (*serial, parts))
    }
}
