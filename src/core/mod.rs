pub mod allocator;
pub mod engine;
pub mod generator;
pub mod inventory;
pub mod ledger;
pub mod population;
pub mod registry;

pub use crate::domain::model::{PartMap, PartType, Serial, Unit};
pub use crate::domain::ports::{ConfigProvider, RandomSource};
pub use crate::utils::error::Result;
