use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The half-hour windows offered by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "09:00 - 09:30")]
    Morning0900,
    #[serde(rename = "09:30 - 10:00")]
    Morning0930,
    #[serde(rename = "16:00 - 16:30")]
    Afternoon1600,
    #[serde(rename = "16:30 - 17:00")]
    Afternoon1630,
    #[serde(rename = "17:00 - 17:30")]
    Evening1700,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::Morning0900,
        TimeSlot::Morning0930,
        TimeSlot::Afternoon1600,
        TimeSlot::Afternoon1630,
        TimeSlot::Evening1700,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning0900 => "09:00 - 09:30",
            TimeSlot::Morning0930 => "09:30 - 10:00",
            TimeSlot::Afternoon1600 => "16:00 - 16:30",
            TimeSlot::Afternoon1630 => "16:30 - 17:00",
            TimeSlot::Evening1700 => "17:00 - 17:30",
        }
    }

    pub fn start(&self) -> &'static str {
        &self.label()[..5]
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown time slot: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for TimeSlot {
    type Err = UnknownSlot;

    /// Accepts either the full label (`"16:00 - 16:30"`) or the start time (`"16:00"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.label() == wanted || slot.start() == wanted)
            .ok_or_else(|| UnknownSlot(wanted.to_string()))
    }
}

/// Payment fields as the customer sees them. `number` holds the grouped
/// display form ("4539 1488 0343 6467") and `expiry` the "MM/YY" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInput {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// `None` when the last keystroke did not parse as an integer.
    pub party_size: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub date: Option<NaiveDate>,
    pub slot: Option<TimeSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardIssuer {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

impl fmt::Display for CardIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardIssuer::Visa => "Visa",
            CardIssuer::Mastercard => "Mastercard",
            CardIssuer::Amex => "American Express",
            CardIssuer::Discover => "Discover",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingField,
    MalformedField,
    OutOfRange,
    SemanticInvalid,
}

/// One variant per submission rule, in the order the rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationFailure {
    #[error("Please enter your full name")]
    MissingFullName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    PhoneTooShort,
    #[error("Party size must be between 1 and 10")]
    PartySizeOutOfRange,
    #[error("Card number is too short")]
    CardNumberTooShort,
    #[error("Card type not supported")]
    UnsupportedIssuer,
    #[error("Invalid card number")]
    ChecksumFailed,
    #[error("Please select a booking date")]
    MissingDate,
    #[error("The selected date is in the past")]
    DateInPast,
    #[error("Expiry date must be in MM/YY format")]
    MalformedExpiry,
    #[error("Invalid expiry month")]
    InvalidExpiryMonth,
    #[error("Card has expired")]
    CardExpired,
    #[error("CVV must be 3 digits")]
    InvalidCvv,
}

impl ValidationFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationFailure::MissingFullName | ValidationFailure::MissingDate => {
                FailureKind::MissingField
            }
            ValidationFailure::InvalidEmail
            | ValidationFailure::PhoneTooShort
            | ValidationFailure::CardNumberTooShort
            | ValidationFailure::MalformedExpiry => FailureKind::MalformedField,
            ValidationFailure::PartySizeOutOfRange
            | ValidationFailure::InvalidExpiryMonth
            | ValidationFailure::InvalidCvv => FailureKind::OutOfRange,
            ValidationFailure::UnsupportedIssuer
            | ValidationFailure::ChecksumFailed
            | ValidationFailure::DateInPast
            | ValidationFailure::CardExpired => FailureKind::SemanticInvalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(failure) => Some(failure.to_string()),
        }
    }
}

impl From<Result<(), ValidationFailure>> for ValidationResult {
    fn from(result: Result<(), ValidationFailure>) -> Self {
        match result {
            Ok(()) => ValidationResult::Valid,
            Err(failure) => ValidationResult::Invalid(failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Minor currency units (cents).
    pub amount: u64,
    pub currency: String,
    pub card_holder: String,
    pub masked_card: String,
    pub issuer: Option<CardIssuer>,
}

/// What the storefront would send to the booking backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub party_size: u8,
    pub customer: CustomerDetails,
    pub payment: PaymentSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub reference: String,
    pub confirmed_at: DateTime<Utc>,
    pub payload: BookingPayload,
}

/// All state owned by one booking session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub selection: BookingSelection,
    pub customer: CustomerInput,
    pub card: CardInput,
    /// The single reason shown to the customer after a failed submission.
    pub error: Option<String>,
    pub submitting: bool,
    pub confirmation: Option<Confirmation>,
}
