// Domain layer: unit model, part categories and the ports the core depends on.

pub mod model;
pub mod ports;
