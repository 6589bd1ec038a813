/// Mock payment flow for donor contributions
///
/// Nothing here talks to a payment provider. A started payment waits a
/// fixed delay and then completes, unless it is cancelled first.

mod catalog;

pub use catalog::{
    country, format_amount, method, methods_for_country, Country, MethodType, PaymentMethod,
    COUNTRIES, DEFAULT_COUNTRY, PAYMENT_METHODS, SUGGESTED_AMOUNTS,
};

use crate::{
    config::PaymentConfig,
    error::{HubError, HubResult},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

/// Minimum phone length accepted for mobile money
pub const MIN_PHONE_LENGTH: usize = 9;

/// Payer details entered for the selected method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PaymentDetails {
    Card {
        number: String,
        expiry: String,
        cvv: String,
        holder_name: String,
    },
    Mobile {
        phone_number: String,
    },
    Bank,
}

/// A donation about to be paid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub country_code: String,
    pub method_id: String,
    /// Amount in cents of the country's currency
    pub amount_cents: u64,
    pub details: PaymentDetails,
}

/// Proof of a completed mock payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub method_id: String,
    pub currency: String,
    pub amount_cents: u64,
    pub formatted_amount: String,
    pub completed_at: DateTime<Utc>,
}

/// How a started payment ended; there is no failure state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed(PaymentReceipt),
    Cancelled,
}

/// Parse a typed donation amount ("50", "50.5", "1234,90") into cents
pub fn parse_amount(raw: &str) -> HubResult<u64> {
    let invalid = || HubError::Validation("Por favor, insira um valor válido para a doação".to_string());

    let normalized = raw.trim().replace(',', ".");
    let (whole, fraction) = match normalized.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (normalized.as_str(), ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or_else(invalid)?;

    if cents == 0 {
        return Err(invalid());
    }

    Ok(cents)
}

/// Runs mock payments
#[derive(Debug, Clone)]
pub struct PaymentProcessor {
    processing_delay: Duration,
}

impl PaymentProcessor {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            processing_delay: config.processing_delay,
        }
    }

    /// Check a request before the flow starts
    pub fn validate(&self, request: &PaymentRequest) -> HubResult<()> {
        let method = method(&request.method_id).ok_or_else(|| {
            HubError::Validation(format!("Unknown payment method: {}", request.method_id))
        })?;
        let country = country(&request.country_code).ok_or_else(|| {
            HubError::Validation(format!("Unknown country: {}", request.country_code))
        })?;

        if !method.countries.contains(&country.code) {
            return Err(HubError::Validation(format!(
                "{} is not available in {}",
                method.name, country.name
            )));
        }

        if request.amount_cents == 0 {
            return Err(HubError::Validation(
                "Por favor, insira um valor válido para a doação".to_string(),
            ));
        }

        let details_ok = match (&method.method_type, &request.details) {
            (
                MethodType::Card,
                PaymentDetails::Card {
                    number,
                    expiry,
                    cvv,
                    holder_name,
                },
            ) => [number, expiry, cvv, holder_name].iter().all(|f| !f.trim().is_empty()),
            (MethodType::Mobile, PaymentDetails::Mobile { phone_number }) => {
                phone_number.chars().count() >= MIN_PHONE_LENGTH
            }
            (MethodType::Bank, PaymentDetails::Bank) => true,
            _ => false,
        };

        if !details_ok {
            return Err(HubError::Validation(format!(
                "Incomplete payment details for {}",
                method.name
            )));
        }

        Ok(())
    }

    /// Run a payment to completion
    pub async fn initiate(&self, request: &PaymentRequest) -> HubResult<PaymentOutcome> {
        self.initiate_with_cancel(request, std::future::pending::<()>())
            .await
    }

    /// Run a payment, resolving to `Cancelled` if `cancelled` finishes first
    pub async fn initiate_with_cancel<F>(
        &self,
        request: &PaymentRequest,
        cancelled: F,
    ) -> HubResult<PaymentOutcome>
    where
        F: Future<Output = ()>,
    {
        self.validate(request)?;

        tracing::info!(
            method = %request.method_id,
            country = %request.country_code,
            amount_cents = request.amount_cents,
            "Processing payment"
        );

        let completed = tokio::select! {
            biased;
            _ = cancelled => false,
            _ = tokio::time::sleep(self.processing_delay) => true,
        };

        let outcome = if completed {
            PaymentOutcome::Completed(self.receipt_for(request)?)
        } else {
            PaymentOutcome::Cancelled
        };

        match &outcome {
            PaymentOutcome::Completed(receipt) => {
                tracing::info!(transaction_id = %receipt.transaction_id, "Payment completed")
            }
            PaymentOutcome::Cancelled => tracing::info!("Payment cancelled"),
        }

        Ok(outcome)
    }

    fn receipt_for(&self, request: &PaymentRequest) -> HubResult<PaymentReceipt> {
        let country = country(&request.country_code).ok_or_else(|| {
            HubError::Internal(format!("Country vanished: {}", request.country_code))
        })?;

        Ok(PaymentReceipt {
            transaction_id: Uuid::new_v4(),
            method_id: request.method_id.clone(),
            currency: country.currency.to_string(),
            amount_cents: request.amount_cents,
            formatted_amount: format_amount(country, request.amount_cents),
            completed_at: Utc::now(),
        })
    }
}
