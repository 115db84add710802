use crate::domain::model::ValidationFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationFailure),

    #[error("A payment is already being processed")]
    SubmissionInProgress,

    #[error("Cannot {action} while the booking is {step}")]
    InvalidTransition { action: String, step: String },

    #[error("Payment gateway error: {message}")]
    GatewayError { message: String },
}

/// Broad grouping used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    System,
    Configuration,
    UserInput,
    Workflow,
    Payment,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::IoError(_)
            | BookingError::SerializationError(_) => ErrorCategory::System,
            BookingError::TomlParseError(_)
            | BookingError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BookingError::ValidationError(_) => ErrorCategory::UserInput,
            BookingError::SubmissionInProgress | BookingError::InvalidTransition { .. } => {
                ErrorCategory::Workflow
            }
            BookingError::GatewayError { .. } => ErrorCategory::Payment,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::ValidationError(failure) => failure.to_string(),
            BookingError::SubmissionInProgress => {
                "Your payment is being processed, please wait".to_string()
            }
            BookingError::InvalidTransition { .. } => {
                "Please select a date and a time slot first".to_string()
            }
            BookingError::GatewayError { .. } => {
                "The payment could not be completed, please try again".to_string()
            }
            BookingError::TomlParseError(_) | BookingError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                format!("Unexpected error: {}", self)
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::UserInput => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Workflow | ErrorCategory::Payment => 4,
            ErrorCategory::System => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_surfaces_reason_only() {
        let err = BookingError::from(ValidationFailure::PartySizeOutOfRange);
        assert_eq!(err.category(), ErrorCategory::UserInput);
        assert_eq!(err.user_friendly_message(), "Party size must be between 1 and 10");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_serialization_error_is_a_system_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = BookingError::from(json_err);
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().starts_with("Unexpected error"));
    }

    #[test]
    fn test_config_error_category() {
        let err = BookingError::InvalidConfigValueError {
            field: "payment.currency".to_string(),
            value: "".to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("payment.currency"));
    }
}
