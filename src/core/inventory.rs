use crate::domain::model::{PartType, Serial};
use crate::utils::error::{Result, SalvageError};
use std::collections::BTreeSet;

/// Donor parts that have not been harvested yet, one set per category.
///
/// Serials only ever leave a set; a consumed part is never put back.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    sets: [BTreeSet<Serial>; 6],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every part of a freshly seeded donor available.
    pub(crate) fn register(&mut self, donor: Serial) {
        for set in &mut self.sets {
            set.insert(donor);
        }
    }

    pub fn available(&self, part: PartType) -> &BTreeSet<Serial> {
        &self.sets[part.index()]
    }

    pub fn remaining(&self, part: PartType) -> usize {
        self.available(part).len()
    }

    pub fn is_available(&self, part: PartType, donor: Serial) -> bool {
        self.available(part).contains(&donor)
    }

    /// Removes `donor` from the `part` set. Consuming a part twice is a
    /// bookkeeping bug and fails with `PartNotAvailable`.
    pub(crate) fn consume(&mut self, part: PartType, donor: Serial) -> Result<()> {
        if self.sets[part.index()].remove(&donor) {
            Ok(())
        } else {
            Err(SalvageError::PartNotAvailable {
                part,
                serial: donor,
            })
        }
    }
}
