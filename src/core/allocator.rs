use crate::core::ledger::ProvenanceLedger;
use crate::core::registry::Registry;
use crate::domain::model::{PartType, Serial};
use crate::domain::ports::RandomSource;
use crate::utils::error::{Result, SalvageError};

/// A donor may supply at most this many of one recipient's six parts.
pub const MAX_PARTS_PER_DONOR: usize = 2;

pub const DEFAULT_MAX_RESAMPLE_ATTEMPTS: usize = 10_000;

/// Rejections before an accepted pick that are worth a warning.
pub const HIGH_REJECTION_COUNT: usize = 64;

/// Picks donors for a recipient's parts by rejection sampling over the
/// inventory, enforcing `MAX_PARTS_PER_DONOR`.
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    max_resample_attempts: usize,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESAMPLE_ATTEMPTS)
    }
}

impl Allocator {
    /// A cap of zero is raised to one so an eligible first draw is still accepted.
    pub fn new(max_resample_attempts: usize) -> Self {
        Self {
            max_resample_attempts: max_resample_attempts.max(1),
        }
    }

    pub fn max_resample_attempts(&self) -> usize {
        self.max_resample_attempts
    }

    /// Harvests one `part` for `recipient`: picks a donor, consumes the part
    /// from inventory, records provenance and returns the donor's descriptor.
    ///
    /// Parts must be requested in `PartType::ALL` order for the leading-part
    /// shortcut to hold.
    pub fn allocate<R: RandomSource>(
        &self,
        rng: &mut R,
        registry: &mut Registry,
        recipient: Serial,
        part: PartType,
    ) -> Result<String> {
        let candidates: Vec<Serial> = registry.inventory.available(part).iter().copied().collect();
        let exhausted = || SalvageError::InventoryExhausted { part, recipient };

        let donor = if part.is_leading() {
            *rng.choose_uniform(&candidates).ok_or_else(exhausted)?
        } else {
            if candidates.is_empty() {
                return Err(exhausted());
            }
            self.pick_constrained(rng, &registry.ledger, &candidates, recipient, part)?
        };

        let descriptor = registry
            .population
            .get(donor)
            .ok_or(SalvageError::UnknownUnit { serial: donor })?
            .part(part)
            .to_string();

        registry.inventory.consume(part, donor)?;
        registry.ledger.record(donor, recipient, part);

        tracing::debug!(%recipient, %donor, %part, "part harvested");
        Ok(descriptor)
    }

    fn pick_constrained<R: RandomSource>(
        &self,
        rng: &mut R,
        ledger: &ProvenanceLedger,
        candidates: &[Serial],
        recipient: Serial,
        part: PartType,
    ) -> Result<Serial> {
        let eligible = |donor: Serial| ledger.parts_from(recipient, donor) < MAX_PARTS_PER_DONOR;

        // Without this check a pool made only of saturated donors would spin
        // until the attempt cap.
        if !candidates.iter().any(|donor| eligible(*donor)) {
            return Err(SalvageError::NoEligibleDonor { part, recipient });
        }

        for attempt in 0..self.max_resample_attempts {
            let Some(&donor) = rng.choose_uniform(candidates) else {
                break;
            };
            if eligible(donor) {
                if attempt >= HIGH_REJECTION_COUNT {
                    tracing::warn!(%recipient, %part, rejected = attempt, "high donor rejection count");
                } else if attempt > 0 {
                    tracing::debug!(%recipient, %part, rejected = attempt, "resampled donor");
                }
                return Ok(donor);
            }
        }

        tracing::warn!(
            %recipient,
            %part,
            attempts = self.max_resample_attempts,
            "donor resampling hit the attempt cap"
        );
        Err(SalvageError::ResampleLimitExceeded {
            part,
            recipient,
            attempts: self.max_resample_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Unit, UnitParts};
    use crate::utils::logger::capture_logs;
    use std::collections::VecDeque;

    /// Replays a fixed list of indices, then keeps returning the last one.
    struct ScriptedRandom {
        picks: VecDeque<usize>,
        last: usize,
    }

    impl ScriptedRandom {
        fn new(picks: &[usize]) -> Self {
            Self {
                picks: picks.iter().copied().collect(),
                last: 0,
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn index_below(&mut self, len: usize) -> usize {
            if let Some(next) = self.picks.pop_front() {
                self.last = next;
            }
            self.last % len
        }

        fn value_in(&mut self, min: u32, _max: u32) -> u32 {
            min
        }
    }

    const A: Serial = Serial::new(1_000_001);
    const B: Serial = Serial::new(1_000_002);
    const C: Serial = Serial::new(1_000_003);
    const RECIPIENT: Serial = Serial::new(2_000_000);

    fn donor(serial: Serial) -> Unit {
        let parts = UnitParts::try_from_fn::<()>(|p| Ok(format!("{}-{}", p.as_str(), serial))).unwrap();
        Unit::new("mk1", serial, parts)
    }

    fn registry_with(donors: &[Serial]) -> Registry {
        let mut registry = Registry::new();
        for serial in donors {
            registry.population.insert(donor(*serial));
            registry.inventory.register(*serial);
        }
        registry
    }

    /// Gives RECIPIENT brain and mobility from the same donor.
    fn saturate(registry: &mut Registry, serial: Serial) {
        for part in [PartType::Brain, PartType::Mobility] {
            registry.inventory.consume(part, serial).unwrap();
            registry.ledger.record(serial, RECIPIENT, part);
        }
    }

    #[test]
    fn test_leading_part_is_accepted_and_recorded() {
        let mut registry = registry_with(&[A, B, C]);
        let mut rng = ScriptedRandom::new(&[1]);

        let descriptor = Allocator::default()
            .allocate(&mut rng, &mut registry, RECIPIENT, PartType::Brain)
            .unwrap();

        assert_eq!(descriptor, format!("brain-{}", B));
        assert!(!registry.inventory.is_available(PartType::Brain, B));
        assert_eq!(registry.ledger.donor_of(RECIPIENT, PartType::Brain), Some(B));
        assert_eq!(registry.ledger.recipient_of(B, PartType::Brain), Some(RECIPIENT));
    }

    #[test]
    fn test_saturated_donor_is_rejected_and_stays_available() {
        let mut registry = registry_with(&[A, B, C]);
        saturate(&mut registry, A);
        // first draw hits A (already supplies two parts), second draws C
        let mut rng = ScriptedRandom::new(&[0, 2]);

        let descriptor = Allocator::default()
            .allocate(&mut rng, &mut registry, RECIPIENT, PartType::Vision)
            .unwrap();

        assert_eq!(descriptor, format!("vision-{}", C));
        assert!(registry.inventory.is_available(PartType::Vision, A));
        assert_eq!(registry.ledger.parts_from(RECIPIENT, A), 2);
    }

    #[test]
    fn test_donor_with_one_part_can_supply_a_second() {
        let mut registry = registry_with(&[A, B]);
        registry.inventory.consume(PartType::Brain, A).unwrap();
        registry.ledger.record(A, RECIPIENT, PartType::Brain);
        let mut rng = ScriptedRandom::new(&[0]);

        Allocator::default()
            .allocate(&mut rng, &mut registry, RECIPIENT, PartType::Arms)
            .unwrap();

        assert_eq!(registry.ledger.parts_from(RECIPIENT, A), 2);
    }

    #[test]
    fn test_only_saturated_donors_left_fails_fast() {
        let mut registry = registry_with(&[A]);
        saturate(&mut registry, A);
        let mut rng = ScriptedRandom::new(&[0]);

        let err = Allocator::default()
            .allocate(&mut rng, &mut registry, RECIPIENT, PartType::PowerPlant)
            .unwrap_err();

        assert!(matches!(
            err,
            SalvageError::NoEligibleDonor { part: PartType::PowerPlant, recipient } if recipient == RECIPIENT
        ));
        assert!(registry.inventory.is_available(PartType::PowerPlant, A));
    }

    #[test]
    fn test_resampling_is_capped() {
        let mut registry = registry_with(&[A, B]);
        saturate(&mut registry, A);
        // always draws A even though B is eligible
        let mut rng = ScriptedRandom::new(&[0]);

        let err = Allocator::new(5)
            .allocate(&mut rng, &mut registry, RECIPIENT, PartType::MediaCenter)
            .unwrap_err();

        assert!(matches!(err, SalvageError::ResampleLimitExceeded { attempts: 5, .. }));
        assert!(registry.ledger.donor_of(RECIPIENT, PartType::MediaCenter).is_none());
    }

    #[test]
    fn test_zero_attempt_cap_still_accepts_an_eligible_draw() {
        let mut registry = registry_with(&[A, B]);
        saturate(&mut registry, A);
        let mut rng = ScriptedRandom::new(&[1]);
        let allocator = Allocator::new(0);

        allocator
            .allocate(&mut rng, &mut registry, RECIPIENT, PartType::Vision)
            .unwrap();

        assert_eq!(allocator.max_resample_attempts(), 1);
        assert_eq!(registry.ledger.donor_of(RECIPIENT, PartType::Vision), Some(B));
    }

    #[test]
    fn test_each_harvest_is_logged_at_debug() {
        let mut registry = registry_with(&[A, B, C]);
        let mut rng = ScriptedRandom::new(&[2]);

        let logs = capture_logs(|| {
            Allocator::default()
                .allocate(&mut rng, &mut registry, RECIPIENT, PartType::Brain)
                .unwrap();
        });

        assert!(logs.contains("DEBUG"));
        assert!(logs.contains("part harvested"));
        assert!(logs.contains(&C.to_string()));
        assert!(!logs.contains("WARN"));
    }

    #[test]
    fn test_many_rejections_before_a_pick_warn() {
        let mut registry = registry_with(&[A, B, C]);
        saturate(&mut registry, A);
        let mut picks = vec![0; HIGH_REJECTION_COUNT + 6];
        picks.push(2);
        let mut rng = ScriptedRandom::new(&picks);

        let logs = capture_logs(|| {
            Allocator::default()
                .allocate(&mut rng, &mut registry, RECIPIENT, PartType::Arms)
                .unwrap();
        });

        assert!(logs.contains("WARN"));
        assert!(logs.contains("high donor rejection count"));
        assert_eq!(registry.ledger.donor_of(RECIPIENT, PartType::Arms), Some(C));
    }

    #[test]
    fn test_empty_inventory_is_exhaustion() {
        let mut registry = registry_with(&[A]);
        registry.inventory.consume(PartType::Mobility, A).unwrap();
        let mut rng = ScriptedRandom::new(&[0]);

        let err = Allocator::default()
            .allocate(&mut rng, &mut registry, RECIPIENT, PartType::Mobility)
            .unwrap_err();

        assert!(matches!(err, SalvageError::InventoryExhausted { part: PartType::Mobility, .. }));
    }
}
