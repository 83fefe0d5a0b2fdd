use salvage_line::{PartType, Registry, Serial};
use std::collections::{BTreeMap, BTreeSet};

/// Checks every population, inventory and provenance invariant of a finished run.
pub fn assert_consistent(registry: &Registry, donors: &[Serial], recipients: &[Serial]) {
    // Uniqueness
    let serials: BTreeSet<Serial> = registry.all_units().map(|u| u.serial()).collect();
    assert_eq!(serials.len(), donors.len() + recipients.len());
    assert_eq!(registry.all_units().count(), serials.len());

    assert_fair_and_linked(registry);

    for recipient in recipients {
        let unit = registry.get_unit(*recipient).expect("recipient is in the population");
        let origin = registry.origin_of(*recipient).expect("recipient has provenance");
        assert_eq!(origin.len(), 6, "recipient {} is missing parts", recipient);
        for (part, donor) in origin {
            assert!(donors.contains(donor));
            let donor_unit = registry.get_unit(*donor).unwrap();
            assert_eq!(unit.part(*part), donor_unit.part(*part));
        }
    }

    for part in PartType::ALL {
        // Inventory conservation
        assert_eq!(
            registry.inventory().remaining(part),
            donors.len() - recipients.len(),
            "wrong remaining count for {}",
            part
        );
        // A part is either still in inventory or recorded as donated, never both
        for donor in donors {
            let available = registry.inventory().is_available(part, *donor);
            let harvested = registry.ledger().recipient_of(*donor, part).is_some();
            assert!(available != harvested, "{} of {} is in both states", part, donor);
        }
    }
}

/// Fairness, exactly-once consumption and bidirectional consistency over
/// whatever the ledger holds, including a half-built recipient.
pub fn assert_fair_and_linked(registry: &Registry) {
    let ledger = registry.ledger();
    let mut harvested: BTreeMap<(Serial, PartType), Serial> = BTreeMap::new();

    for (recipient, origin) in ledger.recipients() {
        let mut per_donor: BTreeMap<Serial, usize> = BTreeMap::new();
        for (part, donor) in origin {
            *per_donor.entry(*donor).or_insert(0) += 1;
            assert_eq!(ledger.recipient_of(*donor, *part), Some(recipient));
            let previous = harvested.insert((*donor, *part), recipient);
            assert!(previous.is_none(), "{} of {} harvested twice", part, donor);
        }
        assert!(
            per_donor.values().all(|count| *count <= 2),
            "recipient {} breaks the two-part rule: {:?}",
            recipient,
            per_donor
        );
    }

    for (donor, destination) in ledger.donations() {
        for (part, recipient) in destination {
            assert_eq!(ledger.donor_of(*recipient, *part), Some(donor));
        }
    }
}
