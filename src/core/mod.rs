pub mod engine;
pub mod issuer;
pub mod luhn;
pub mod normalize;
pub mod rules;
pub mod wizard;

pub use crate::domain::model::{FormState, ValidationFailure, ValidationResult};
pub use crate::domain::ports::{Clock, ConfigProvider, PaymentGateway};
pub use crate::utils::error::Result;
