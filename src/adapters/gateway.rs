use crate::domain::model::{BookingPayload, Confirmation};
use crate::domain::ports::PaymentGateway;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Stand-in for the booking backend: waits, then always accepts.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn reference_for(payload: &BookingPayload) -> String {
        format!(
            "SLOT-{}-{}",
            payload.date.format("%Y%m%d"),
            payload.slot.start().replace(':', "")
        )
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn submit(&self, payload: &BookingPayload) -> Result<Confirmation> {
        tracing::debug!("Simulating payment round trip ({:?})", self.delay);
        tokio::time::sleep(self.delay).await;

        Ok(Confirmation {
            reference: Self::reference_for(payload),
            confirmed_at: Utc::now(),
            payload: payload.clone(),
        })
    }
}
