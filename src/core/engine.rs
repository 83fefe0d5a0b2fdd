use crate::adapters::SeededRandom;
use crate::core::generator::Generator;
use crate::core::registry::Registry;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::time::Instant;

/// A finished generation: both lines plus the seed that reproduces them.
#[derive(Debug)]
pub struct SalvageRun {
    pub registry: Registry,
    pub seed: u64,
}

pub struct SalvageEngine<C: ConfigProvider + Validate> {
    config: C,
}

impl<C: ConfigProvider + Validate> SalvageEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Validates the config, seeds the donor line, then harvests it into the
    /// recipient line.
    pub fn run(&self) -> Result<SalvageRun> {
        self.config.validate()?;

        let rng = match self.config.seed() {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        let seed = rng.seed();
        tracing::info!(seed, "Starting salvage run");

        let started = Instant::now();
        let mut registry = Registry::new();
        let mut generator = Generator::from_config(rng, &self.config);

        // Donors
        let donors = generator.seed_donors(&mut registry, self.config.donor_count())?;
        tracing::debug!("Seeded {} donors in {:?}", donors.len(), started.elapsed());

        // Recipients
        let recipients = generator.grow_recipients(&mut registry, self.config.recipient_count())?;
        tracing::debug!(
            "Assembled {} recipients in {:?}",
            recipients.len(),
            started.elapsed()
        );

        tracing::info!(
            units = registry.population().len(),
            elapsed = ?started.elapsed(),
            "Salvage run complete"
        );
        Ok(SalvageRun { registry, seed })
    }
}
