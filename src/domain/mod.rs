// Domain layer: value types and ports. Nothing here depends on config or adapters.

pub mod model;
pub mod ports;
