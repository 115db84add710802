pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{FixedClock, SimulatedGateway, SystemClock};
pub use crate::config::StoreConfig;
pub use crate::core::engine::{BookingEngine, SubmitOutcome};
pub use crate::core::wizard::{FormEvent, WizardStep};
pub use crate::domain::model::{FormState, TimeSlot, ValidationFailure, ValidationResult};
pub use crate::domain::view::View;
pub use crate::utils::error::{BookingError, Result};
