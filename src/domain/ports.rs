use crate::domain::model::{BookingPayload, Confirmation};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

/// Accepts a validated booking and settles the payment for it.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit(&self, payload: &BookingPayload) -> Result<Confirmation>;
}

/// Source of "today" for date and expiry checks.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub trait ConfigProvider: Send + Sync {
    fn store_name(&self) -> &str;
    fn backend_endpoint(&self) -> &str;
    /// Price of one booking in minor currency units.
    fn price(&self) -> u64;
    fn currency(&self) -> &str;
    fn submit_delay(&self) -> Duration;
}
