use crate::core::issuer::classify;
use crate::core::normalize::{card_digits, mask_card_number};
use crate::core::rules::validate_form;
use crate::domain::model::{
    BookingPayload, Confirmation, CustomerDetails, FormState, PaymentSummary, ValidationFailure,
    ValidationResult,
};
use crate::domain::ports::{Clock, ConfigProvider, PaymentGateway};
use crate::utils::error::{BookingError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Confirmed(Confirmation),
    Rejected(ValidationFailure),
}

pub struct BookingEngine<G: PaymentGateway, K: Clock, C: ConfigProvider> {
    gateway: G,
    clock: K,
    config: C,
}

impl<G: PaymentGateway, K: Clock, C: ConfigProvider> BookingEngine<G, K, C> {
    pub fn new(gateway: G, clock: K, config: C) -> Self {
        Self {
            gateway,
            clock,
            config,
        }
    }

    pub fn validate(&self, form: &FormState) -> ValidationResult {
        validate_form(form, self.clock.today())
    }

    /// Builds the backend payload. Only the last four card digits leave the form.
    pub fn build_payload(&self, form: &FormState) -> Result<BookingPayload> {
        let (Some(date), Some(slot)) = (form.selection.date, form.selection.slot) else {
            return Err(BookingError::InvalidTransition {
                action: "build a booking".to_string(),
                step: form.step().to_string(),
            });
        };
        let party_size = form
            .customer
            .party_size
            .and_then(|size| u8::try_from(size).ok())
            .ok_or(BookingError::ValidationError(
                ValidationFailure::PartySizeOutOfRange,
            ))?;
        let digits = card_digits(&form.card.number);

        Ok(BookingPayload {
            date,
            slot,
            party_size,
            customer: CustomerDetails {
                name: form.customer.full_name.trim().to_string(),
                email: form.customer.email.clone(),
                phone: form.customer.phone.trim().to_string(),
            },
            payment: PaymentSummary {
                amount: self.config.price(),
                currency: self.config.currency().to_string(),
                card_holder: form.card.holder.trim().to_string(),
                masked_card: mask_card_number(&digits),
                issuer: classify(&digits),
            },
        })
    }

    /// Runs the checkout: validation, payload, gateway call.
    ///
    /// A validation failure is not an error; the form goes back to
    /// `SlotSelected` with the reason set and `Rejected` is returned. On
    /// success the form is cleared and holds the confirmation.
    pub async fn submit(&self, form: &mut FormState) -> Result<SubmitOutcome> {
        form.begin_submission()?;
        let mut pending = PendingSubmission { form };
        let form = &mut *pending.form;

        if let ValidationResult::Invalid(failure) = self.validate(form) {
            tracing::warn!("Booking rejected: {}", failure);
            form.reject(failure);
            return Ok(SubmitOutcome::Rejected(failure));
        }

        let payload = match self.build_payload(form) {
            Ok(payload) => payload,
            Err(e) => {
                form.abort(e.user_friendly_message());
                return Err(e);
            }
        };

        let json = serde_json::to_string(&payload)?;
        tracing::info!(
            payload = %json,
            "Sending booking to {}",
            self.config.backend_endpoint()
        );

        match self.gateway.submit(&payload).await {
            Ok(confirmation) => {
                tracing::info!(
                    "✅ Booking {} confirmed for {} {}",
                    confirmation.reference,
                    payload.date,
                    payload.slot
                );
                form.complete(confirmation.clone());
                Ok(SubmitOutcome::Confirmed(confirmation))
            }
            Err(e) => {
                tracing::error!("❌ Payment failed: {}", e);
                form.abort(e.user_friendly_message());
                Err(e)
            }
        }
    }
}

/// Puts the form back to `SlotSelected` if `submit` returns early or its
/// future is dropped before the gateway answers.
struct PendingSubmission<'a> {
    form: &'a mut FormState,
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if self.form.cancel_submission() {
            tracing::warn!("Booking submission interrupted before completion");
        }
    }
}
