use crate::core::normalize::{
    format_card_holder, format_card_number, format_cvv, format_expiry, parse_party_size,
};
use crate::domain::model::{Confirmation, FormState, TimeSlot, ValidationFailure};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    NoDateSelected,
    DateSelected,
    SlotSelected,
    Submitting,
    Confirmed,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WizardStep::NoDateSelected => "waiting for a date",
            WizardStep::DateSelected => "waiting for a time slot",
            WizardStep::SlotSelected => "collecting details",
            WizardStep::Submitting => "processing the payment",
            WizardStep::Confirmed => "confirmed",
        };
        f.write_str(text)
    }
}

/// One variant per input widget. Text payloads are the raw widget contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    DateChanged(Option<NaiveDate>),
    SlotChosen(TimeSlot),
    FullNameChanged(String),
    EmailChanged(String),
    PhoneChanged(String),
    PartySizeChanged(String),
    CardNumberChanged(String),
    ExpiryChanged(String),
    CvvChanged(String),
    CardHolderChanged(String),
}

impl FormEvent {
    fn is_payment_field(&self) -> bool {
        matches!(
            self,
            FormEvent::CardNumberChanged(_)
                | FormEvent::ExpiryChanged(_)
                | FormEvent::CvvChanged(_)
                | FormEvent::CardHolderChanged(_)
        )
    }

    fn action(&self) -> &'static str {
        match self {
            FormEvent::DateChanged(_) => "change the date",
            FormEvent::SlotChosen(_) => "choose a time slot",
            FormEvent::FullNameChanged(_)
            | FormEvent::EmailChanged(_)
            | FormEvent::PhoneChanged(_)
            | FormEvent::PartySizeChanged(_) => "edit customer details",
            _ => "edit payment details",
        }
    }
}

impl FormState {
    pub fn step(&self) -> WizardStep {
        if self.confirmation.is_some() {
            WizardStep::Confirmed
        } else if self.submitting {
            WizardStep::Submitting
        } else {
            match (self.selection.date, self.selection.slot) {
                (Some(_), Some(_)) => WizardStep::SlotSelected,
                (Some(_), None) => WizardStep::DateSelected,
                (None, _) => WizardStep::NoDateSelected,
            }
        }
    }

    /// Reducer form of [`FormState::apply`].
    pub fn reduce(mut self, event: FormEvent) -> Result<Self> {
        self.apply(event)?;
        Ok(self)
    }

    pub fn apply(&mut self, event: FormEvent) -> Result<()> {
        match self.step() {
            WizardStep::Submitting => return Err(BookingError::SubmissionInProgress),
            WizardStep::Confirmed => self.acknowledge(),
            _ => {}
        }

        let step = self.step();
        let allowed = match &event {
            FormEvent::DateChanged(_) => true,
            FormEvent::SlotChosen(_) => step != WizardStep::NoDateSelected,
            _ => step == WizardStep::SlotSelected,
        };
        if !allowed {
            return Err(BookingError::InvalidTransition {
                action: event.action().to_string(),
                step: step.to_string(),
            });
        }

        if event.is_payment_field() {
            self.error = None;
        }

        match event {
            FormEvent::DateChanged(date) => {
                self.selection.date = date;
                if date.is_none() {
                    self.selection.slot = None;
                }
            }
            FormEvent::SlotChosen(slot) => self.selection.slot = Some(slot),
            FormEvent::FullNameChanged(name) => self.customer.full_name = name,
            FormEvent::EmailChanged(email) => self.customer.email = email,
            FormEvent::PhoneChanged(phone) => self.customer.phone = phone,
            FormEvent::PartySizeChanged(raw) => self.customer.party_size = parse_party_size(&raw),
            FormEvent::CardNumberChanged(raw) => self.card.number = format_card_number(&raw),
            FormEvent::ExpiryChanged(raw) => self.card.expiry = format_expiry(&raw),
            FormEvent::CvvChanged(raw) => self.card.cvv = format_cvv(&raw),
            FormEvent::CardHolderChanged(raw) => self.card.holder = format_card_holder(&raw),
        }

        tracing::trace!(step = ?self.step(), "form updated");
        Ok(())
    }

    /// Confirmed -> NoDateSelected; a no-op elsewhere.
    pub fn acknowledge(&mut self) {
        if self.confirmation.take().is_some() {
            tracing::debug!("confirmation acknowledged, starting a new booking");
        }
    }

    pub(crate) fn begin_submission(&mut self) -> Result<()> {
        match self.step() {
            WizardStep::SlotSelected => {
                self.submitting = true;
                Ok(())
            }
            WizardStep::Submitting => Err(BookingError::SubmissionInProgress),
            step => Err(BookingError::InvalidTransition {
                action: "submit the booking".to_string(),
                step: step.to_string(),
            }),
        }
    }

    /// Submitting -> SlotSelected, everything the customer typed stays in place.
    pub(crate) fn reject(&mut self, failure: ValidationFailure) {
        self.submitting = false;
        self.error = Some(failure.to_string());
    }

    /// Submitting -> SlotSelected when the pending payment was interrupted.
    /// Returns whether a submission was actually pending.
    pub fn cancel_submission(&mut self) -> bool {
        if !self.submitting {
            return false;
        }
        self.submitting = false;
        self.error = Some("The payment was interrupted, please try again".to_string());
        true
    }

    pub(crate) fn abort(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    /// Submitting -> Confirmed. Every field is cleared for the next booking.
    pub(crate) fn complete(&mut self, confirmation: Confirmation) {
        *self = FormState {
            confirmation: Some(confirmation),
            ..FormState::default()
        };
    }
}
