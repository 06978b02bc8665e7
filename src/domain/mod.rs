// Domain layer: core models and ports (interfaces) the controller is written against.

pub mod model;
pub mod ports;
