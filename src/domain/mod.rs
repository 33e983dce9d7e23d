// Domain layer: draw models and the participant pool port. No I/O here.

pub mod model;
pub mod ports;
