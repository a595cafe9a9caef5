//! Stripe payment gateway
//!
//! Two-step card charge against the Stripe HTTP API: tokenize the card
//! (`/v1/tokens`), then charge the token (`/v1/charges`). A charge counts
//! as captured only when the provider reports the terminal `succeeded`
//! status. No retries: without idempotency keys a repeated charge request
//! can bill the card twice.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::application::ports::{CardDetails, ChargeError, ChargeReceipt, PaymentGateway};
use crate::config::StripeConfig;

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Tokenize card details. A provider-side rejection means the card is
    /// unusable (declined); a transport failure leaves the outcome unknown.
    async fn create_payment_source(&self, card: &CardDetails) -> Result<String, ChargeError> {
        let params = [
            ("card[number]", card.card_number.clone()),
            ("card[cvc]", card.cvc.clone()),
            ("card[exp_month]", card.exp_month.to_string()),
            ("card[exp_year]", card.exp_year.to_string()),
        ];

        let response = self
            .client
            .post(format!("{}/v1/tokens", self.api_base))
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| ChargeError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ChargeError::Declined(format!(
                "card tokenization failed ({})",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ChargeError::Gateway(e.to_string()))?;
        debug!("Created payment source {}", token.id);
        Ok(token.id)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ChargeResponse {
    id: String,
    status: String,
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn charge(
        &self,
        amount_minor: i64,
        currency: &str,
        card: &CardDetails,
    ) -> Result<ChargeReceipt, ChargeError> {
        let source = self.create_payment_source(card).await?;

        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("source", source),
        ];

        let response = self
            .client
            .post(format!("{}/v1/charges", self.api_base))
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| ChargeError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ChargeError::Declined(format!(
                "charge rejected ({})",
                status
            )));
        }

        let charge: ChargeResponse = response
            .json()
            .await
            .map_err(|e| ChargeError::Gateway(e.to_string()))?;

        if charge.status != "succeeded" {
            return Err(ChargeError::Declined(format!(
                "charge {} ended in state {}",
                charge.id, charge.status
            )));
        }

        debug!("Charge {} captured ({} {})", charge.id, amount_minor, currency);
        Ok(ChargeReceipt {
            charge_id: charge.id,
            amount_minor,
            currency: currency.to_string(),
        })
    }
}
