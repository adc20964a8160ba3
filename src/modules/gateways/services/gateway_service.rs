use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::adyen::AdyenGateway;
use super::gateway_trait::PaymentGateway;
use super::pending::PendingPayment;
use super::square::SquareGateway;
use crate::config::Config;
use crate::core::{Error, Result};
use crate::modules::gateways::models::{PaymentRequest, PaymentResult};

/// Owned registry of vendor adapters
///
/// Replaces ambient static client state with an explicitly owned handle:
/// construct with `from_config`, dispatch by gateway name, and `close`
/// before process exit so in-flight detached payments are not dropped.
pub struct GatewayService {
    gateways: HashMap<String, Arc<dyn PaymentGateway>>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl GatewayService {
    /// Create an empty GatewayService
    pub fn new() -> Self {
        Self {
            gateways: HashMap::new(),
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Wire every configured vendor adapter
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut service = Self::new();
        service.register_gateway(Arc::new(AdyenGateway::new(&config.adyen, config.timeout)?));
        service.register_gateway(Arc::new(SquareGateway::new(&config.square, config.timeout)?));
        Ok(service)
    }

    /// Register a gateway
    pub fn register_gateway(&mut self, gateway: Arc<dyn PaymentGateway>) {
        let name = gateway.name().to_string();
        self.gateways.insert(name, gateway);
    }

    /// Get a gateway by name
    pub fn get_gateway(&self, name: &str) -> Result<Arc<dyn PaymentGateway>> {
        self.gateways
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Gateway '{}' not found", name)))
    }

    /// Authorize a payment using the specified gateway, blocking mode
    pub async fn authorize(
        &self,
        gateway_name: &str,
        request: &PaymentRequest,
    ) -> Result<PaymentResult> {
        info!(
            gateway = %gateway_name,
            reference = %request.reference,
            amount = request.amount,
            currency = %request.currency,
            "Authorizing payment"
        );

        let gateway = self.get_gateway(gateway_name)?;

        match gateway.authorize(request).await {
            Ok(result) => {
                info!(
                    gateway = %gateway_name,
                    gateway_reference = %result.gateway_reference,
                    status = ?result.status,
                    "Payment authorization completed"
                );
                Ok(result)
            }
            Err(e) => {
                error!(
                    gateway = %gateway_name,
                    error = %e,
                    "Payment authorization failed"
                );
                Err(e)
            }
        }
    }

    /// Authorize a payment in non-blocking mode
    ///
    /// Returns immediately with a [`PendingPayment`] handle; the request
    /// runs on the tokio I/O scheduler, not a dedicated thread. The task is
    /// tracked so `close` can drain it.
    pub fn authorize_detached(
        &self,
        gateway_name: &str,
        request: PaymentRequest,
    ) -> Result<PendingPayment> {
        let gateway = self.get_gateway(gateway_name)?;
        let (tx, rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let outcome = gateway.authorize(&request).await;
            // A dropped receiver means nobody is waiting; the outcome is
            // discarded, never re-delivered
            let _ = tx.send(outcome);
        });

        lock_in_flight(&self.in_flight).push(handle);
        Ok(PendingPayment::new(rx))
    }

    /// List all registered gateways
    pub fn list_gateways(&self) -> Vec<GatewayInfo> {
        self.gateways
            .values()
            .map(|gateway| GatewayInfo {
                name: gateway.name().to_string(),
                supported_currencies: gateway.supported_currencies(),
            })
            .collect()
    }

    /// Check if a gateway supports a currency
    pub fn supports_currency(&self, gateway_name: &str, currency: &str) -> Result<bool> {
        let gateway = self.get_gateway(gateway_name)?;
        Ok(gateway
            .supported_currencies()
            .iter()
            .any(|c| c.eq_ignore_ascii_case(currency)))
    }

    /// Drain in-flight detached payments and consume the service
    ///
    /// Awaits every task spawned by `authorize_detached`, so completions
    /// are delivered before shutdown. Completed handles resolve instantly
    /// and are never re-run.
    pub async fn close(self) {
        let handles = match self.in_flight.into_inner() {
            Ok(handles) => handles,
            Err(poisoned) => poisoned.into_inner(),
        };

        info!(tasks = handles.len(), "Draining in-flight payments");
        futures_util::future::join_all(handles).await;
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_in_flight(
    in_flight: &Mutex<Vec<JoinHandle<()>>>,
) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
    match in_flight.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Gateway information for listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct GatewayInfo {
    pub name: String,
    pub supported_currencies: Vec<String>,
}
