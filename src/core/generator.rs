use crate::core::allocator::Allocator;
use crate::core::registry::Registry;
use crate::domain::model::{Catalog, PartType, Serial, SerialRange, Unit, UnitParts};
use crate::domain::ports::{ConfigProvider, RandomSource};
use crate::utils::error::{Result, SalvageError};

pub const DEFAULT_MAX_SERIAL_ATTEMPTS: usize = 10_000;

/// Builds the donor line and then the recipient line on top of a `Registry`.
pub struct Generator<R: RandomSource> {
    rng: R,
    catalog: Catalog,
    serial_range: SerialRange,
    max_serial_attempts: usize,
    allocator: Allocator,
}

impl<R: RandomSource> Generator<R> {
    pub fn new(rng: R, catalog: Catalog) -> Self {
        Self {
            rng,
            catalog,
            serial_range: SerialRange::default(),
            max_serial_attempts: DEFAULT_MAX_SERIAL_ATTEMPTS,
            allocator: Allocator::default(),
        }
    }

    pub fn from_config<C: ConfigProvider>(rng: R, config: &C) -> Self {
        Self::new(rng, config.catalog().clone())
            .with_serial_range(config.serial_range())
            .with_max_serial_attempts(config.max_serial_attempts())
            .with_allocator(Allocator::new(config.max_resample_attempts()))
    }

    pub fn with_serial_range(mut self, serial_range: SerialRange) -> Self {
        self.serial_range = serial_range;
        self
    }

    pub fn with_max_serial_attempts(mut self, attempts: usize) -> Self {
        self.max_serial_attempts = attempts;
        self
    }

    pub fn with_allocator(mut self, allocator: Allocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Creates `count` donors with uniformly drawn attributes and makes all
    /// six of each donor's parts available for harvesting.
    pub fn seed_donors(&mut self, registry: &mut Registry, count: usize) -> Result<Vec<Serial>> {
        let mut seeded = Vec::with_capacity(count);

        for _ in 0..count {
            let serial = self.fresh_serial(registry)?;
            let tag = pick(&mut self.rng, "catalog.donor_tags", &self.catalog.donor_tags)?;
            let parts = UnitParts::try_from_fn(|part| {
                pick(&mut self.rng, field_name(part), self.catalog.options(part))
            })?;

            registry.population.insert(Unit::new(tag, serial, parts));
            registry.inventory.register(serial);
            seeded.push(serial);
        }

        tracing::info!(donors = seeded.len(), "seeded donor line");
        Ok(seeded)
    }

    /// Assembles `count` recipients, each from six harvested donor parts.
    ///
    /// An error is fatal: the registry may hold a half-built recipient's
    /// provenance and should be discarded.
    pub fn grow_recipients(&mut self, registry: &mut Registry, count: usize) -> Result<Vec<Serial>> {
        let mut grown = Vec::with_capacity(count);

        for _ in 0..count {
            let serial = self.fresh_serial(registry)?;
            let tag = pick(&mut self.rng, "catalog.recipient_tags", &self.catalog.recipient_tags)?;

            let allocator = self.allocator;
            let rng = &mut self.rng;
            let parts = UnitParts::try_from_fn(|part| allocator.allocate(&mut *rng, registry, serial, part))?;

            tracing::debug!(%serial, %tag, "assembled recipient");
            registry.population.insert(Unit::new(tag, serial, parts));
            grown.push(serial);
        }

        tracing::info!(recipients = grown.len(), "assembled recipient line");
        Ok(grown)
    }

    fn fresh_serial(&mut self, registry: &Registry) -> Result<Serial> {
        let population = &registry.population;
        self.rng
            .random_serial(self.serial_range, |s| population.contains(s), self.max_serial_attempts)
    }
}

fn pick<R: RandomSource>(rng: &mut R, field: &str, options: &[String]) -> Result<String> {
    rng.choose_uniform(options)
        .cloned()
        .ok_or_else(|| SalvageError::InvalidConfigValueError {
            field: field.to_string(),
            value: "[]".to_string(),
            reason: "Option list cannot be empty".to_string(),
        })
}

fn field_name(part: PartType) -> &'static str {
    match part {
        PartType::Brain => "catalog.brain",
        PartType::Mobility => "catalog.mobility",
        PartType::Vision => "catalog.vision",
        PartType::Arms => "catalog.arms",
        PartType::MediaCenter => "catalog.media_center",
        PartType::PowerPlant => "catalog.power_plant",
    }
}
