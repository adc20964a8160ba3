use crate::core::{Currency, Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vendor-neutral payment authorization request
///
/// Immutable once built. Construct through [`PaymentRequest::new`], which
/// rejects invalid input before any network I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in minor units (e.g. 1000 = EUR 10.00)
    pub amount: i64,

    /// ISO-4217 currency code
    pub currency: Currency,

    /// Caller-supplied order reference
    pub reference: String,

    /// Opaque payment-method token issued by the vendor's client-side SDK
    pub payment_method_token: String,

    /// Redirect target for flows that leave the merchant site
    pub return_url: Option<String>,
}

impl PaymentRequest {
    /// Validating factory: the only way to obtain a `PaymentRequest`
    pub fn new(
        amount: i64,
        currency: &str,
        reference: impl Into<String>,
        payment_method_token: impl Into<String>,
    ) -> Result<Self> {
        if amount <= 0 {
            return Err(Error::validation(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }

        let currency: Currency = currency
            .parse()
            .map_err(Error::Validation)?;

        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(Error::validation("Reference must not be empty"));
        }

        let payment_method_token = payment_method_token.into();
        if payment_method_token.trim().is_empty() {
            return Err(Error::validation("Payment method token must not be empty"));
        }

        Ok(Self {
            amount,
            currency,
            reference,
            payment_method_token,
            return_url: None,
        })
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }
}

/// Normalized payment outcome
///
/// Produced only by an adapter's response normalizer; immutable once
/// returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub status: PaymentStatus,

    /// Vendor transaction reference (empty when the vendor supplied none)
    pub gateway_reference: String,

    /// Vendor-supplied rejection details, present when status is `Error`
    pub errors: Vec<GatewayError>,

    /// Creation timestamp parsed from the vendor response, when present
    pub created_at: Option<DateTime<Utc>>,

    /// Full vendor response body
    pub raw_response: serde_json::Value,
}

impl PaymentResult {
    pub fn is_authorized(&self) -> bool {
        self.status == PaymentStatus::Authorized
    }

    /// Fallback mapping for response shapes no normalizer rule recognizes
    pub(crate) fn unmapped(raw_response: serde_json::Value) -> Self {
        Self {
            status: PaymentStatus::Error,
            gateway_reference: String::new(),
            errors: vec![GatewayError {
                category: "unmapped_response".to_string(),
                code: String::new(),
                detail: "Gateway response shape not recognized".to_string(),
            }],
            created_at: None,
            raw_response,
        }
    }
}

/// Normalized payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Authorized,
    Refused,
    Pending,
    Error,
}

/// Vendor-supplied rejection detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    pub category: String,
    pub code: String,
    pub detail: String,
}
