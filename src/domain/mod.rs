// Domain layer: deck models and ports (interfaces).

pub mod model;
pub mod ports;
