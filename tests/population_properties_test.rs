mod common;

use proptest::prelude::*;
use salvage_line::{Catalog, Generator, Registry, SeededRandom};

/// Donor and recipient counts with at least two spare donors, so every
/// category keeps three or more serials for the last recipient.
fn population_sizes() -> impl Strategy<Value = (usize, usize)> {
    (2usize..60).prop_flat_map(|donors| (Just(donors), 0..=donors - 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: with two spare donors generation never fails and every
    /// invariant holds.
    #[test]
    fn generation_keeps_invariants(
        seed in any::<u64>(),
        (donor_count, recipient_count) in population_sizes(),
    ) {
        let mut registry = Registry::new();
        let mut generator = Generator::new(SeededRandom::from_seed(seed), Catalog::default());

        let donors = generator.seed_donors(&mut registry, donor_count).unwrap();
        let recipients = generator.grow_recipients(&mut registry, recipient_count).unwrap();

        prop_assert_eq!(registry.recipients().count(), recipient_count);
        prop_assert_eq!(registry.donors().count(), donor_count);
        common::assert_consistent(&registry, &donors, &recipients);
    }

    /// Property: tag counts add up to the whole population.
    #[test]
    fn tag_counts_cover_population(seed in any::<u64>(), donor_count in 3usize..40) {
        let mut registry = Registry::new();
        let mut generator = Generator::new(SeededRandom::from_seed(seed), Catalog::default());
        generator.seed_donors(&mut registry, donor_count).unwrap();
        generator.grow_recipients(&mut registry, donor_count / 2).unwrap();

        let counts = registry.count_by_tag();
        prop_assert_eq!(counts.values().sum::<usize>(), registry.population().len());
        for (tag, count) in counts {
            prop_assert_eq!(registry.units_with_tag(&tag).count(), count);
        }
    }
}
