use crate::core::{Currency, Result};
use crate::modules::gateways::models::{PaymentRequest, PaymentResult};
use async_trait::async_trait;

/// Common capability set every vendor adapter satisfies
///
/// One authorize call maps to exactly one outbound HTTP request; no retry
/// is performed at this layer.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorize a payment and return the normalized outcome
    ///
    /// Vendor refusals come back as a `PaymentResult` (status `Refused` or
    /// `Error` with the vendor's error list attached); only transport-level
    /// failures produce an `Err`.
    async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentResult>;

    /// Get gateway name
    fn name(&self) -> &str;

    /// Currencies this gateway accepts
    fn supported_currencies(&self) -> Vec<String>;

    /// Check if gateway supports a currency
    fn supports_currency(&self, currency: Currency) -> bool {
        self.supported_currencies()
            .iter()
            .any(|c| c.eq_ignore_ascii_case(currency.as_str()))
    }
}
