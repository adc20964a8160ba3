use super::gateway_trait::PaymentGateway;
use crate::config::AdyenConfig;
use crate::core::{Error, Result};
use crate::modules::gateways::models::{
    GatewayError, PaymentRequest, PaymentResult, PaymentStatus,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Adyen Checkout gateway client
///
/// Implements PaymentGateway against the Checkout `/payments` endpoint
/// API Documentation: https://docs.adyen.com/api-explorer/Checkout/71/post/payments
pub struct AdyenGateway {
    client: Client,
    api_key: String,
    merchant_account: String,
    base_url: String,
}

impl AdyenGateway {
    pub fn new(config: &AdyenConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::gateway(format!("Failed to build Adyen HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            merchant_account: config.merchant_account.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Build the Adyen wire shape. Pure; no network access.
    fn build_request(&self, request: &PaymentRequest) -> AdyenPaymentRequest {
        AdyenPaymentRequest {
            amount: AdyenAmount {
                currency: request.currency.as_str().to_string(),
                value: request.amount,
            },
            reference: request.reference.clone(),
            merchant_account: self.merchant_account.clone(),
            payment_method: AdyenPaymentMethod {
                kind: "scheme".to_string(),
                stored_payment_method_id: request.payment_method_token.clone(),
            },
            return_url: request.return_url.clone(),
        }
    }

    /// Map an Adyen response to the common result shape
    ///
    /// Total: every body maps to a status, unknown shapes included.
    fn normalize(http_status: StatusCode, body: Value) -> PaymentResult {
        let gateway_reference = body["pspReference"].as_str().unwrap_or("").to_string();

        if let Some(result_code) = body["resultCode"].as_str() {
            let status = match result_code {
                "Authorised" => PaymentStatus::Authorized,
                "Refused" => PaymentStatus::Refused,
                "Pending" | "Received" => PaymentStatus::Pending,
                _ => return PaymentResult::unmapped(body),
            };

            let errors = if status == PaymentStatus::Refused {
                vec![GatewayError {
                    category: "refused".to_string(),
                    code: body["refusalReasonCode"].as_str().unwrap_or("").to_string(),
                    detail: body["refusalReason"].as_str().unwrap_or("").to_string(),
                }]
            } else {
                Vec::new()
            };

            return PaymentResult {
                status,
                gateway_reference,
                errors,
                created_at: None,
                raw_response: body,
            };
        }

        // Adyen error envelope: {status, errorCode, errorType, message}
        if !http_status.is_success() && body.get("errorCode").is_some() {
            let fault = GatewayError {
                category: body["errorType"].as_str().unwrap_or("api_error").to_string(),
                code: body["errorCode"].as_str().unwrap_or("").to_string(),
                detail: body["message"].as_str().unwrap_or("").to_string(),
            };

            return PaymentResult {
                status: PaymentStatus::Error,
                gateway_reference,
                errors: vec![fault],
                created_at: None,
                raw_response: body,
            };
        }

        PaymentResult::unmapped(body)
    }
}

#[async_trait]
impl PaymentGateway for AdyenGateway {
    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentResult> {
        let url = format!("{}/v71/payments", self.base_url);
        let adyen_request = self.build_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&adyen_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(format!("Adyen gateway timed out: {}", e))
                } else {
                    Error::gateway(format!("Adyen API request failed: {}", e))
                }
            })?;

        let http_status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| Error::gateway(format!("Failed to read Adyen response: {}", e)))?;

        // Non-JSON bodies fall through to the unmapped_response mapping
        let body: Value = serde_json::from_str(&response_body).unwrap_or(Value::Null);

        Ok(Self::normalize(http_status, body))
    }

    fn name(&self) -> &str {
        "adyen"
    }

    fn supported_currencies(&self) -> Vec<String> {
        vec![
            "EUR".to_string(),
            "USD".to_string(),
            "GBP".to_string(),
            "JPY".to_string(),
            "AUD".to_string(),
        ]
    }
}

// Adyen API request structures

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdyenPaymentRequest {
    amount: AdyenAmount,
    reference: String,
    merchant_account: String,
    payment_method: AdyenPaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct AdyenAmount {
    currency: String,
    value: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdyenPaymentMethod {
    #[serde(rename = "type")]
    kind: String,
    stored_payment_method_id: String,
}
