// Domain layer: booking models, navigation views and ports (interfaces).

pub mod model;
pub mod ports;
pub mod view;
