// Domain layer: core models, ports and pure services. No database access here.

pub mod model;
pub mod ports;

pub mod services;
