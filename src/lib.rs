pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliArgs, Command};

pub use adapters::SeededRandom;
pub use config::TomlConfig;
pub use crate::core::{
    allocator::Allocator, engine::SalvageEngine, engine::SalvageRun, generator::Generator,
    registry::Registry,
};
pub use domain::model::{Catalog, PartMap, PartType, Serial, SerialRange, Unit};
pub use utils::error::{Result, SalvageError};
