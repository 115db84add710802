// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod gateway;

pub use clock::{FixedClock, SystemClock};
pub use gateway::SimulatedGateway;
