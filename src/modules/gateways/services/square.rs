use super::gateway_trait::PaymentGateway;
use crate::config::SquareConfig;
use crate::core::{Error, Result};
use crate::modules::gateways::models::{
    GatewayError, PaymentRequest, PaymentResult, PaymentStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

const SQUARE_API_VERSION: &str = "2024-08-21";

/// Square payments gateway client
///
/// Implements PaymentGateway against the `/v2/payments` endpoint
/// API Documentation: https://developer.squareup.com/reference/square/payments-api/create-payment
pub struct SquareGateway {
    client: Client,
    access_token: String,
    base_url: String,
}

impl SquareGateway {
    pub fn new(config: &SquareConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::gateway(format!("Failed to build Square HTTP client: {}", e)))?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Build the Square wire shape. Pure; no network access.
    ///
    /// Square requires an idempotency key on every payment; a fresh UUID is
    /// stamped per built request. No retry is layered on top of it.
    fn build_request(&self, request: &PaymentRequest) -> SquarePaymentRequest {
        SquarePaymentRequest {
            source_id: request.payment_method_token.clone(),
            idempotency_key: Uuid::new_v4().to_string(),
            amount_money: SquareMoney {
                amount: request.amount,
                currency: request.currency.as_str().to_string(),
            },
            reference_id: request.reference.clone(),
        }
    }

    /// Map a Square response to the common result shape
    ///
    /// Total: every body maps to a status, unknown shapes included.
    fn normalize(_http_status: StatusCode, body: Value) -> PaymentResult {
        // Error envelope: {"errors": [{category, code, detail}, ..]}
        if let Some(entries) = body["errors"].as_array() {
            let errors = entries.iter().map(fault_from_entry).collect();

            return PaymentResult {
                status: PaymentStatus::Error,
                gateway_reference: String::new(),
                errors,
                created_at: None,
                raw_response: body,
            };
        }

        // Bare error object: {category, code, detail}
        if body.get("category").is_some() && body.get("code").is_some() {
            let fault = fault_from_entry(&body);

            return PaymentResult {
                status: PaymentStatus::Error,
                gateway_reference: String::new(),
                errors: vec![fault],
                created_at: None,
                raw_response: body,
            };
        }

        // Success envelope: {"payment": {id, status, created_at, ..}}
        if body.get("payment").is_some() {
            let Some((status, gateway_reference, created_at)) =
                normalized_payment(&body["payment"])
            else {
                return PaymentResult::unmapped(body);
            };

            return PaymentResult {
                status,
                gateway_reference,
                errors: Vec::new(),
                created_at,
                raw_response: body,
            };
        }

        // Flat shape: {id, status} without the payment envelope
        if body.get("id").is_some() && body.get("status").is_some() {
            if let Some((status, gateway_reference, created_at)) = normalized_payment(&body) {
                return PaymentResult {
                    status,
                    gateway_reference,
                    errors: Vec::new(),
                    created_at,
                    raw_response: body,
                };
            }
        }

        PaymentResult::unmapped(body)
    }
}

fn fault_from_entry(entry: &Value) -> GatewayError {
    GatewayError {
        category: entry["category"].as_str().unwrap_or("").to_string(),
        code: entry["code"].as_str().unwrap_or("").to_string(),
        detail: entry["detail"].as_str().unwrap_or("").to_string(),
    }
}

fn normalized_payment(payment: &Value) -> Option<(PaymentStatus, String, Option<DateTime<Utc>>)> {
    let status = match payment["status"].as_str()? {
        "APPROVED" | "COMPLETED" | "Authorized" | "AUTHORIZED" => PaymentStatus::Authorized,
        "PENDING" | "Pending" => PaymentStatus::Pending,
        "FAILED" | "CANCELED" | "Refused" => PaymentStatus::Refused,
        _ => return None,
    };

    let gateway_reference = payment["id"].as_str().unwrap_or("").to_string();

    let created_at = payment["created_at"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Some((status, gateway_reference, created_at))
}

#[async_trait]
impl PaymentGateway for SquareGateway {
    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentResult> {
        let url = format!("{}/v2/payments", self.base_url);
        let square_request = self.build_request(request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Square-Version", SQUARE_API_VERSION)
            .json(&square_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(format!("Square gateway timed out: {}", e))
                } else {
                    Error::gateway(format!("Square API request failed: {}", e))
                }
            })?;

        let http_status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| Error::gateway(format!("Failed to read Square response: {}", e)))?;

        // Non-JSON bodies fall through to the unmapped_response mapping
        let body: Value = serde_json::from_str(&response_body).unwrap_or(Value::Null);

        Ok(Self::normalize(http_status, body))
    }

    fn name(&self) -> &str {
        "square"
    }

    fn supported_currencies(&self) -> Vec<String> {
        vec![
            "USD".to_string(),
            "CAD".to_string(),
            "GBP".to_string(),
            "AUD".to_string(),
            "JPY".to_string(),
            "EUR".to_string(),
        ]
    }
}

// Square API request structures

#[derive(Debug, Serialize)]
struct SquarePaymentRequest {
    source_id: String,
    idempotency_key: String,
    amount_money: SquareMoney,
    reference_id: String,
}

#[derive(Debug, Serialize)]
struct SquareMoney {
    amount: i64,
    currency: String,
}
