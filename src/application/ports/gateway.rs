//! Outbound port for the external card-charging provider

use async_trait::async_trait;

/// Card details as submitted by the client.
///
/// Never persisted; forwarded to the provider for tokenization only.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub card_number: String,
    pub cvc: String,
    pub exp_month: u8,
    pub exp_year: u16,
}

/// Provider confirmation of a captured charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeReceipt {
    /// Provider-side charge ID, needed for manual reconciliation
    pub charge_id: String,
    /// Amount captured, in minor currency units
    pub amount_minor: i64,
    pub currency: String,
}

/// Gateway failure modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeError {
    /// The provider rejected the card (tokenization failed or the charge
    /// did not reach a terminal "succeeded" state)
    Declined(String),
    /// Network or provider error; the charge outcome is unknown
    Gateway(String),
}

impl std::fmt::Display for ChargeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declined(reason) => write!(f, "declined: {}", reason),
            Self::Gateway(reason) => write!(f, "gateway error: {}", reason),
        }
    }
}

/// External payment processor.
///
/// A charge moves real money; implementations must be called at most once
/// per orchestrator invocation and must not retry internally (no
/// idempotency keying exists yet, so a blind retry risks a double charge).
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        amount_minor: i64,
        currency: &str,
        card: &CardDetails,
    ) -> Result<ChargeReceipt, ChargeError>;
}
